use std::io;
use std::process::ExitCode;

use clap::Parser;
use tensorcheck_cli::cli::Cli;
use tensorcheck_cli::dispatch;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries results only; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    match dispatch::run(&cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            if let Err(e) = dispatch::report(&err, &mut stdout, &mut io::stderr()) {
                tracing::error!(error = %e, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}
