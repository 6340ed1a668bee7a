use std::io::{self, Write};

use tensorcheck_client::{ChannelConfig, ChannelError, RpcFailure, TensorClient};
use tensorcheck_core::{parse_shape, parse_values, ParseError, Tensor};
use thiserror::Error;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::render;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rpc(#[from] RpcFailure),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Runs the selected command and writes its result to `out`.
///
/// The channel is owned by the command and dropped on return, whether or not
/// the call succeeded.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CommandError> {
    let config = cli.channel_config();
    match &cli.command {
        Command::Health => health(&config, out).await,
        Command::Check { shape, values } => check(&config, shape, values, out).await,
    }
}

pub async fn health<W: Write>(config: &ChannelConfig, out: &mut W) -> Result<(), CommandError> {
    let client = TensorClient::connect_lazy(config)?;
    let status = client.health().await?;
    info!(%status, "health");
    render::health(out, &status)?;
    Ok(())
}

/// Both lists are parsed before a channel exists, so bad input never
/// reaches the network.
pub async fn check<W: Write>(
    config: &ChannelConfig,
    shape: &str,
    values: &str,
    out: &mut W,
) -> Result<(), CommandError> {
    let shape = parse_shape(shape)?;
    let values = parse_values(values)?;

    let client = TensorClient::connect_lazy(config)?;
    let tensor = client.check_tensor(Tensor::new(shape, values)).await?;
    render::tensor(out, &tensor)?;
    Ok(())
}

/// Writes the operator-facing diagnostic for a failed command.
///
/// RPC failures go to `out` as a single `RPC error: ...` line; everything
/// else goes to `err`.
pub fn report<O: Write, E: Write>(
    error: &CommandError,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    match error {
        CommandError::Rpc(failure) => writeln!(out, "{failure}"),
        other => writeln!(err, "error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use tensorcheck_core::ScalarKind;

    use super::*;

    fn report_to_strings(error: &CommandError) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        report(error, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn rpc_failure_goes_to_stdout() {
        let error = CommandError::from(RpcFailure::new(
            tonic::Code::DeadlineExceeded,
            "Deadline Exceeded",
        ));
        let (out, err) = report_to_strings(&error);
        assert_eq!(out, "RPC error: code=DEADLINE_EXCEEDED message=Deadline Exceeded\n");
        assert!(err.is_empty());
    }

    #[test]
    fn parse_error_goes_to_stderr() {
        let error = CommandError::from(ParseError {
            segment: "x".to_string(),
            kind: ScalarKind::Float,
        });
        let (out, err) = report_to_strings(&error);
        assert!(out.is_empty());
        assert_eq!(err, "error: invalid float value \"x\"\n");
    }

    #[tokio::test]
    async fn parse_error_comes_before_channel_setup() {
        // An invalid address would fail channel setup; parsing must fail first.
        let config = ChannelConfig::new("not a host");
        let mut out = Vec::new();
        let err = check(&config, "2,2", "1,two", &mut out).await.unwrap_err();
        assert!(matches!(err, CommandError::Parse(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn bad_address_is_channel_error() {
        let mut out = Vec::new();
        let err = health(&ChannelConfig::new("not a host"), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Channel(_)));
    }
}
