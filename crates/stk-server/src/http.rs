//! `tiny_http` listener and worker pool.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tiny_http::{Header, Request, Response, Server};
use tracing::{info, warn};

use crate::error::ServerError;
use crate::response::ApiResponse;
use crate::router::{ApiRequest, Router};

/// A bound listener plus the router its workers feed.
pub struct HttpServer {
    server: Arc<Server>,
    router: Arc<Router>,
    workers: usize,
    max_body_bytes: usize,
    stopping: Arc<AtomicBool>,
}

/// Stops a running [`HttpServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    stopping: Arc<AtomicBool>,
    workers: usize,
}

impl ShutdownHandle {
    /// Wake every worker and make it exit after its current request.
    pub fn shutdown(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        for _ in 0..self.workers {
            self.server.unblock();
        }
    }
}

impl HttpServer {
    /// Bind `addr`. Port 0 picks a free port.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound.
    pub fn bind(
        addr: &str,
        router: Router,
        workers: usize,
        max_body_bytes: usize,
    ) -> Result<Self, ServerError> {
        let server = Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            router: Arc::new(router),
            workers: workers.max(1),
            max_body_bytes,
            stopping: Arc::new(AtomicBool::new(false)),
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            stopping: Arc::clone(&self.stopping),
            workers: self.workers,
        }
    }

    /// Serve until [`ShutdownHandle::shutdown`] is called. Blocks.
    pub fn run(&self) {
        info!(
            addr = ?self.local_addr(),
            workers = self.workers,
            "serving asset catalog"
        );
        std::thread::scope(|scope| {
            for _ in 0..self.workers {
                scope.spawn(|| self.worker_loop());
            }
        });
        info!("server stopped");
    }

    fn worker_loop(&self) {
        loop {
            match self.server.recv() {
                Ok(request) => self.serve_one(request),
                Err(e) => {
                    if self.stopping.load(Ordering::SeqCst) {
                        break;
                    }
                    warn!(error = %e, "failed to receive request");
                }
            }
        }
    }

    fn serve_one(&self, mut request: Request) {
        let response = match read_body(&mut request, self.max_body_bytes) {
            Ok(body) => {
                let api_request = ApiRequest {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    authorization: request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.as_str().to_string()),
                    body,
                };
                self.router.handle(&api_request)
            }
            Err(rejection) => rejection,
        };

        let mut reply = Response::from_string(response.body.to_string())
            .with_status_code(response.status);
        if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
            reply = reply.with_header(header);
        }
        if let Err(e) = request.respond(reply) {
            warn!(error = %e, "failed to send response");
        }
    }
}

fn read_body(request: &mut Request, limit: usize) -> Result<String, ApiResponse> {
    let too_large = || {
        ApiResponse::error(
            413,
            "payload_too_large",
            &format!("request body exceeds {limit} bytes"),
        )
    };
    if request.body_length().is_some_and(|len| len > limit) {
        return Err(too_large());
    }
    let mut bytes = Vec::new();
    request
        .as_reader()
        .take(u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| ApiResponse::error(400, "invalid_request", &format!("unreadable body: {e}")))?;
    if bytes.len() > limit {
        return Err(too_large());
    }
    String::from_utf8(bytes)
        .map_err(|_| ApiResponse::error(400, "invalid_request", "body is not UTF-8"))
}
