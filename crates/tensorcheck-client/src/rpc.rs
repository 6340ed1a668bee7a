//! Unary call plumbing for `tensor.v1.TensorService`.
//!
//! Every method the client speaks is listed once in [`METHODS`]; the
//! [`UnaryMethod`] impls bind each descriptor to its request and response
//! messages, which in turn pick the prost codec used to encode and decode.

use std::time::Duration;

use tensorcheck_proto::tensor::v1 as pb;
use tokio::time::timeout;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{GrpcMethod, Request, Status};
use tonic_prost::ProstCodec;
use tracing::debug;

use crate::RpcFailure;

pub const SERVICE: &str = "tensor.v1.TensorService";

const DEADLINE_EXCEEDED_MESSAGE: &str = "Deadline Exceeded";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub service: &'static str,
    pub method: &'static str,
    /// `/<service>/<method>`, as sent in the HTTP/2 `:path`.
    pub path: &'static str,
}

pub const HEALTH: MethodDescriptor = MethodDescriptor {
    service: SERVICE,
    method: "Health",
    path: "/tensor.v1.TensorService/Health",
};

pub const CHECK_TENSOR: MethodDescriptor = MethodDescriptor {
    service: SERVICE,
    method: "CheckTensor",
    path: "/tensor.v1.TensorService/CheckTensor",
};

pub const METHODS: &[MethodDescriptor] = &[HEALTH, CHECK_TENSOR];

pub trait UnaryMethod {
    type Request: prost::Message + Send + Sync + 'static;
    type Response: prost::Message + Default + Send + Sync + 'static;

    const DESCRIPTOR: MethodDescriptor;
}

pub struct Health;

impl UnaryMethod for Health {
    type Request = pb::HealthRequest;
    type Response = pb::HealthResponse;

    const DESCRIPTOR: MethodDescriptor = HEALTH;
}

pub struct CheckTensor;

impl UnaryMethod for CheckTensor {
    type Request = pb::CheckTensorRequest;
    type Response = pb::Tensor;

    const DESCRIPTOR: MethodDescriptor = CHECK_TENSOR;
}

/// Performs one request/response exchange for `M` over `channel`.
///
/// Failures are returned as they come: no retry, no backoff. `deadline` is the
/// channel's configured request timeout; when it elapses first the call fails
/// with `DEADLINE_EXCEEDED`.
pub async fn invoke<M: UnaryMethod>(
    channel: &Channel,
    request: M::Request,
    deadline: Option<Duration>,
) -> Result<M::Response, RpcFailure> {
    let descriptor = M::DESCRIPTOR;
    let mut grpc = Grpc::new(channel.clone());

    let mut request = Request::new(request);
    request
        .extensions_mut()
        .insert(GrpcMethod::new(descriptor.service, descriptor.method));

    debug!(path = descriptor.path, ?deadline, "sending unary request");
    let codec: ProstCodec<M::Request, M::Response> = ProstCodec::default();
    let exchange = async {
        if let Err(e) = grpc.ready().await {
            return Err(Status::unavailable(format!("service was not ready: {e}")));
        }
        grpc.unary(request, PathAndQuery::from_static(descriptor.path), codec)
            .await
    };

    let result = match deadline {
        Some(limit) => timeout(limit, exchange)
            .await
            .unwrap_or_else(|_| Err(Status::deadline_exceeded(DEADLINE_EXCEEDED_MESSAGE))),
        None => exchange.await,
    };

    let response = result.map_err(|status| {
        let failure = RpcFailure::from(status);
        debug!(
            path = descriptor.path,
            code = failure.code_name(),
            message = %failure.message,
            "unary request failed"
        );
        failure
    })?;

    Ok(response.into_inner())
}
