use std::time::Duration;

use tensorcheck_core::Tensor;
use tensorcheck_proto::tensor::v1 as pb;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::codec::{check_tensor_request, pb_to_tensor};
use crate::rpc::{self, CheckTensor, Health};
use crate::{ChannelError, RpcFailure};

pub const DEFAULT_ADDR: &str = "localhost:50051";

/// Channel options. `timeout` is the request deadline every call made through
/// the channel inherits; `connect_timeout` bounds connection setup.
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub addr: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ChannelConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }
}

/// `host:port` becomes `http://host:port`; anything with a scheme is kept.
pub fn endpoint_uri(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

/// Builds a plaintext channel that connects on first use, so an unreachable
/// server shows up as an `RpcFailure` from the call rather than here.
pub fn connect_lazy(config: &ChannelConfig) -> Result<Channel, ChannelError> {
    let uri = endpoint_uri(&config.addr);
    let mut endpoint =
        Endpoint::from_shared(uri).map_err(|source| ChannelError::InvalidAddress {
            addr: config.addr.clone(),
            source,
        })?;
    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }
    debug!(addr = %config.addr, "opening lazy channel");
    Ok(endpoint.connect_lazy())
}

#[derive(Clone, Debug)]
pub struct TensorClient {
    channel: Channel,
    timeout: Option<Duration>,
}

impl TensorClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_lazy(config: &ChannelConfig) -> Result<Self, ChannelError> {
        let channel = connect_lazy(config)?;
        Ok(Self::new(channel).with_timeout(config.timeout))
    }

    /// Returns the server's free-form status string.
    pub async fn health(&self) -> Result<String, RpcFailure> {
        let response =
            rpc::invoke::<Health>(&self.channel, pb::HealthRequest {}, self.timeout).await?;
        Ok(response.status)
    }

    pub async fn check_tensor(&self, tensor: Tensor) -> Result<Tensor, RpcFailure> {
        debug!(
            rank = tensor.shape.rank(),
            values = tensor.values.len(),
            "checking tensor"
        );
        let request = check_tensor_request(tensor);
        let response = rpc::invoke::<CheckTensor>(&self.channel, request, self.timeout).await?;
        Ok(pb_to_tensor(response))
    }
}
