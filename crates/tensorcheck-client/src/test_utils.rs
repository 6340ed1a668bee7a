//! In-process `TensorService` for tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tensorcheck_proto::tensor::v1 as pb;
use tensorcheck_proto::tensor::v1::tensor_service_server::{TensorService, TensorServiceServer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Request, Response, Status};

/// What every call to the stub answers with.
#[derive(Clone, Debug)]
pub enum StubBehavior {
    /// Health reports `status`; CheckTensor echoes the request tensor.
    Serving { status: String },
    /// Every method fails with this status.
    Failing { code: Code, message: String },
    /// Like `Serving`, but each call sleeps for `delay` before answering.
    Delayed { delay: Duration, status: String },
}

impl StubBehavior {
    pub fn serving(status: impl Into<String>) -> Self {
        Self::Serving {
            status: status.into(),
        }
    }

    pub fn failing(code: Code, message: impl Into<String>) -> Self {
        Self::Failing {
            code,
            message: message.into(),
        }
    }

    pub fn delayed(delay: Duration, status: impl Into<String>) -> Self {
        Self::Delayed {
            delay,
            status: status.into(),
        }
    }
}

struct StubService {
    behavior: StubBehavior,
    calls: Arc<AtomicUsize>,
}

impl StubService {
    async fn record(&self) -> Result<(), Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Serving { .. } => Ok(()),
            StubBehavior::Failing { code, message } => Err(Status::new(*code, message.clone())),
            StubBehavior::Delayed { delay, .. } => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
        }
    }
}

#[tonic::async_trait]
impl TensorService for StubService {
    async fn health(
        &self,
        _req: Request<pb::HealthRequest>,
    ) -> std::result::Result<Response<pb::HealthResponse>, Status> {
        self.record().await?;
        let status = match &self.behavior {
            StubBehavior::Serving { status } | StubBehavior::Delayed { status, .. } => {
                status.clone()
            }
            StubBehavior::Failing { .. } => String::new(),
        };
        Ok(Response::new(pb::HealthResponse { status }))
    }

    async fn check_tensor(
        &self,
        req: Request<pb::CheckTensorRequest>,
    ) -> std::result::Result<Response<pb::Tensor>, Status> {
        self.record().await?;
        Ok(Response::new(req.into_inner().tensor.unwrap_or_default()))
    }
}

/// Stub server on an ephemeral loopback port, shut down on drop.
pub struct StubServer {
    addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub async fn start(behavior: StubBehavior) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let calls = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let svc = StubService {
            behavior,
            calls: Arc::clone(&calls),
        };
        tokio::spawn(async move {
            let result = tonic::transport::Server::builder()
                .add_service(TensorServiceServer::new(svc))
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!(error = ?e, "stub server exited");
            }
        });

        Ok(Self {
            addr,
            calls,
            shutdown: Some(shutdown_tx),
        })
    }

    /// `host:port`, suitable for `--addr`.
    pub fn addr(&self) -> String {
        self.addr.to_string()
    }

    /// Number of RPCs that reached the service so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
