#![allow(deprecated)]

use std::process::{Command, Output};
use std::time::Duration;

use anyhow::Result;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use tensorcheck_client::test_utils::{StubBehavior, StubServer};
use tonic::Code;

fn tensorcheck() -> Command {
    Command::new(cargo_bin("tensorcheck"))
}

/// Runs the binary off the async runtime so the stub server keeps serving.
async fn run_blocking(args: Vec<String>) -> Result<Output> {
    let output = tokio::task::spawn_blocking(move || tensorcheck().args(args).output()).await??;
    Ok(output)
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn health_against_stub_exits_zero() -> Result<()> {
    let server = StubServer::start(StubBehavior::serving("SERVING")).await?;

    let output = run_blocking(args(&["--addr", &server.addr(), "health"])).await?;

    output.assert().success().stdout("SERVING\n");
    assert_eq!(server.calls(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn check_prints_json() -> Result<()> {
    let server = StubServer::start(StubBehavior::serving("SERVING")).await?;

    let output = run_blocking(args(&[
        "--addr",
        &server.addr(),
        "check",
        "--shape",
        "2,2",
        "--values",
        "1,2,3,4",
    ]))
    .await?;

    output.assert().success().stdout(
        "{\n  \"shape\": [\n    2,\n    2\n  ],\n  \"values\": [\n    1.0,\n    2.0,\n    3.0,\n    4.0\n  ]\n}\n",
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rpc_failure_exits_one_with_diagnostic() -> Result<()> {
    let server =
        StubServer::start(StubBehavior::failing(Code::Unavailable, "no connection")).await?;

    let output = run_blocking(args(&[
        "--addr",
        &server.addr(),
        "check",
        "--shape",
        "2,2",
        "--values",
        "1,2,3,4",
    ]))
    .await?;

    output
        .assert()
        .code(1)
        .stdout("RPC error: code=UNAVAILABLE message=no connection\n");
    assert_eq!(server.calls(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn timeout_exits_one_with_deadline_exceeded() -> Result<()> {
    let server =
        StubServer::start(StubBehavior::delayed(Duration::from_secs(3), "SERVING")).await?;

    let output = run_blocking(args(&[
        "--addr",
        &server.addr(),
        "--timeout",
        "0.2",
        "health",
    ]))
    .await?;

    output
        .assert()
        .code(1)
        .stdout("RPC error: code=DEADLINE_EXCEEDED message=Deadline Exceeded\n");
    Ok(())
}

#[test]
fn parse_failure_exits_one_without_network() {
    // Nothing listens on the default address; parsing fails before any call.
    tensorcheck()
        .args(["check", "--shape", "a,2", "--values", "1,2"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid integer value \"a\""));
}

#[test]
fn check_requires_values() {
    tensorcheck()
        .args(["check", "--shape", "2,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--values"));
}

#[test]
fn unknown_command_is_rejected() {
    tensorcheck()
        .arg("serve")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
