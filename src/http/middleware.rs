//! Per-registration middleware.
//!
//! # Responsibilities
//! - Define the handler and middleware capabilities
//! - Compose a registration's chain around its action handlers
//!
//! # Design Decisions
//! - Chains are composed once at build time, not per request
//! - The first middleware supplied is the outermost: it sees the request
//!   first and the response last
//! - A middleware may short-circuit by responding without running `next`
//! - The route table and registry never see middleware; only the handlers
//!   stored for serving are wrapped

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
pub use futures_util::future::BoxFuture;

/// A unit of request handling: the innermost action dispatch, or a
/// middleware-wrapped layer around it.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

/// The rest of the chain after the current middleware.
pub struct Next {
    inner: Arc<dyn Handler>,
}

impl Next {
    pub(crate) fn new(inner: Arc<dyn Handler>) -> Self {
        Self { inner }
    }

    /// Run the inner handler.
    pub async fn run(self, request: Request<Body>) -> Response {
        self.inner.call(request).await
    }
}

/// A request/response interceptor supplied at registration time.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response>;
}

/// Plain functions and closures work as middleware.
impl<F> Middleware for F
where
    F: Fn(Request<Body>, Next) -> BoxFuture<'static, Response> + Send + Sync + 'static,
{
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        self(request, next)
    }
}

/// An ordered middleware chain for one registration.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new(layers: Vec<Arc<dyn Middleware>>) -> Self {
        Self { layers }
    }

    /// Wrap `handler` so the first supplied middleware runs outermost.
    pub fn wrap(&self, handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        let mut current = handler;
        for layer in self.layers.iter().rev() {
            current = Arc::new(Wrapped {
                middleware: Arc::clone(layer),
                inner: current,
            });
        }
        current
    }
}

struct Wrapped {
    middleware: Arc<dyn Middleware>,
    inner: Arc<dyn Handler>,
}

impl Handler for Wrapped {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        self.middleware
            .call(request, Next::new(Arc::clone(&self.inner)))
    }
}

/// Logs method, path, status, and latency around the inner handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLog;

impl Middleware for RequestLog {
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let start = std::time::Instant::now();

            let response = next.run(request).await;

            tracing::info!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                elapsed = ?start.elapsed(),
                "request served"
            );
            response
        })
    }
}
