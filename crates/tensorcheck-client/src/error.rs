use thiserror::Error;
use tonic::{Code, Status};

/// A unary call that did not produce a response message.
///
/// Covers transport failures (refused connection, deadline) as well as
/// statuses returned by the service itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RPC error: code={} message={message}", code_label(.code))]
pub struct RpcFailure {
    pub code: Code,
    pub message: String,
}

impl RpcFailure {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Canonical upper-snake name of the status code, e.g. `UNAVAILABLE`.
    pub fn code_name(&self) -> &'static str {
        code_name(self.code)
    }
}

impl From<Status> for RpcFailure {
    fn from(status: Status) -> Self {
        Self {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid server address {addr:?}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },
}

fn code_label(code: &Code) -> &'static str {
    code_name(*code)
}

pub fn code_name(code: Code) -> &'static str {
    match code {
        Code::Ok => "OK",
        Code::Cancelled => "CANCELLED",
        Code::Unknown => "UNKNOWN",
        Code::InvalidArgument => "INVALID_ARGUMENT",
        Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        Code::NotFound => "NOT_FOUND",
        Code::AlreadyExists => "ALREADY_EXISTS",
        Code::PermissionDenied => "PERMISSION_DENIED",
        Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
        Code::FailedPrecondition => "FAILED_PRECONDITION",
        Code::Aborted => "ABORTED",
        Code::OutOfRange => "OUT_OF_RANGE",
        Code::Unimplemented => "UNIMPLEMENTED",
        Code::Internal => "INTERNAL",
        Code::Unavailable => "UNAVAILABLE",
        Code::DataLoss => "DATA_LOSS",
        Code::Unauthenticated => "UNAUTHENTICATED",
    }
}
