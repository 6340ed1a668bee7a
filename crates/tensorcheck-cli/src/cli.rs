use std::time::Duration;

use clap::{Parser, Subcommand};
use tensorcheck_client::{ChannelConfig, DEFAULT_ADDR};

#[derive(Parser, Debug)]
#[command(
    name = "tensorcheck",
    version,
    about = "gRPC client for tensor.v1.TensorService"
)]
pub struct Cli {
    /// gRPC server address (host:port)
    #[arg(long, global = true, default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Request deadline in seconds, applied by the channel
    #[arg(long, global = true, value_name = "SECONDS", value_parser = parse_seconds)]
    pub timeout: Option<Duration>,

    /// Connect deadline in seconds
    #[arg(long, global = true, value_name = "SECONDS", value_parser = parse_seconds)]
    pub connect_timeout: Option<Duration>,

    /// Log filter for stderr diagnostics (RUST_LOG syntax)
    #[arg(long, global = true, default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Call the Health endpoint
    Health,
    /// Call the CheckTensor endpoint
    Check {
        /// Comma-separated dims, e.g. "2,2"
        #[arg(long, allow_hyphen_values = true)]
        shape: String,

        /// Comma-separated values, e.g. "1,2,3,4"
        #[arg(long, allow_hyphen_values = true)]
        values: String,
    },
}

impl Cli {
    pub fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            addr: self.addr.clone(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("expected a number of seconds, got {raw:?}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}
