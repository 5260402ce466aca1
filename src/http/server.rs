//! Router assembly and the serving entry point.
//!
//! # Responsibilities
//! - Collect registrations and route sources into an immutable [`Router`]
//! - Expose the router as the axum root handler
//! - Convert lookup and dispatch failures into status responses
//!
//! # Design Decisions
//! - Registration is a builder phase; `build` freezes the table and the
//!   registry before a single request is served, so serving needs no locks
//! - The axum router is a catch-all: all path logic lives in the table
//! - One request's failure becomes a status response, never a crash

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::schema::RouterConfig;
use crate::controller::base::Controller;
use crate::controller::registry::ControllerRegistry;
use crate::error::{ResolveError, RouterError};
use crate::http::middleware::{Middleware, MiddlewareChain};
use crate::routing::loader;
use crate::routing::route::{parse_route, RouteDescriptor};
use crate::routing::table::RouteTable;

fn convention_defaults() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::HEAD,
        Method::OPTIONS,
    ]
}

/// Accumulates route sources and controller registrations, then freezes
/// them into a [`Router`].
///
/// All registration must finish before serving begins; the type system
/// enforces it here because only `build` yields something servable.
pub struct RouterBuilder {
    convention_methods: Vec<Method>,
    table: RouteTable,
    registry: ControllerRegistry,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            convention_methods: convention_defaults(),
            table: RouteTable::default(),
            registry: ControllerRegistry::default(),
        }
    }

    /// Apply a configuration: the convention method set and any inline
    /// route strings. Inline routes must carry a qualified target.
    pub fn with_config(config: &RouterConfig) -> Result<Self, RouterError> {
        let mut builder = Self::new();

        if !config.convention_methods.is_empty() {
            let mut methods = Vec::new();
            for token in &config.convention_methods {
                let method = Method::from_bytes(token.to_ascii_uppercase().as_bytes())
                    .map_err(|_| RouterError::InvalidMethod(token.clone()))?;
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
            builder.convention_methods = methods;
        }

        for raw in &config.routes {
            let descriptor = parse_route(raw)?;
            if descriptor.controller.is_empty() {
                return Err(RouterError::Syntax {
                    route: raw.clone(),
                    reason: "configured routes must use a Controller.Action target".to_string(),
                });
            }
            builder.table.push_explicit(descriptor);
        }

        Ok(builder)
    }

    /// Load a routes file (JSON list of route strings) and append its
    /// entries, in file order, ahead of routes registered later.
    pub fn load_routes_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, RouterError> {
        for descriptor in loader::load_routes_file(path.as_ref())? {
            self.table.push_explicit(descriptor);
        }
        Ok(self)
    }

    /// Register a controller with no middleware.
    pub fn add<C: Controller>(&mut self, template: C) -> Result<&mut Self, RouterError> {
        self.add_with(template, Vec::new())
    }

    /// Register a controller with a middleware chain. The first middleware
    /// supplied is the outermost.
    ///
    /// The template's `routes` are parsed here; its action table becomes
    /// one convention route per action at
    /// `/<controller_name>/<action_name>`, both lower-cased.
    pub fn add_with<C: Controller>(
        &mut self,
        template: C,
        middleware: Vec<Arc<dyn Middleware>>,
    ) -> Result<&mut Self, RouterError> {
        let name = C::controller_name();
        let chain = MiddlewareChain::new(middleware);
        self.registry.register::<C>(&name, &chain)?;

        for raw in template.routes() {
            let mut descriptor = parse_route(&raw)?;
            if descriptor.controller.is_empty() {
                descriptor.controller = name.clone();
            }
            self.table.push_explicit(descriptor);
        }

        let base = name.to_lowercase();
        for (action_name, _) in C::actions().entries() {
            self.table.push_convention(RouteDescriptor {
                methods: self.convention_methods.clone(),
                path: format!("/{}/{}", base, action_name.to_lowercase()),
                controller: name.clone(),
                action: (*action_name).to_string(),
            });
        }

        Ok(self)
    }

    /// The table as assembled so far.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Freeze the builder into a servable router.
    ///
    /// Validates that every descriptor targets a registered controller and
    /// a known action; a dangling route is a configuration defect and
    /// fails here rather than at request time.
    pub fn build(self) -> Result<Router, RouterError> {
        for descriptor in self.table.iter() {
            let registration = self.registry.get(&descriptor.controller).ok_or_else(|| {
                RouterError::UnknownController {
                    controller: descriptor.controller.clone(),
                    path: descriptor.path.clone(),
                }
            })?;
            if !registration.has_action(&descriptor.action) {
                return Err(RouterError::NoSuchAction {
                    controller: descriptor.controller.clone(),
                    action: descriptor.action.clone(),
                });
            }
        }

        tracing::info!(routes = self.table.len(), "route table frozen");
        Ok(Router {
            inner: Arc::new(RouterInner {
                table: self.table,
                registry: self.registry,
            }),
        })
    }
}

struct RouterInner {
    table: RouteTable,
    registry: ControllerRegistry,
}

/// Application state injected into the serving handler.
#[derive(Clone)]
struct AppState {
    inner: Arc<RouterInner>,
}

/// The frozen router. Cheap to clone; safe for unsynchronized concurrent
/// reads while serving.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    /// The frozen route table.
    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    /// Build the axum router that serves this table.
    pub fn into_service(self) -> axum::Router {
        axum::Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(AppState { inner: self.inner })
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on the given listener until ctrl-c.
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "router serving");

        axum::serve(listener, self.into_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("router stopped");
        Ok(())
    }
}

/// Root handler: resolve, dispatch, convert failures to statuses.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let descriptor = match state.inner.table.resolve(&method, &path) {
        Ok(descriptor) => descriptor,
        Err(ResolveError::NotFound) => {
            tracing::debug!(method = %method, path = %path, "no route matched");
            return (StatusCode::NOT_FOUND, "no route matches the request path").into_response();
        }
        Err(ResolveError::MethodNotAllowed { allowed }) => {
            tracing::debug!(method = %method, path = %path, "method not allowed");
            let allow = allowed
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow)],
                "method not allowed for this path",
            )
                .into_response();
        }
    };

    tracing::debug!(
        method = %method,
        path = %path,
        controller = %descriptor.controller,
        action = %descriptor.action,
        "dispatching"
    );

    match state
        .inner
        .registry
        .handler(&descriptor.controller, &descriptor.action)
    {
        Ok(handler) => handler.call(request).await,
        Err(error) => {
            // Build-time validation makes this unreachable for any table
            // assembled through RouterBuilder.
            tracing::error!(error = %error, "resolved route has no handler");
            (StatusCode::INTERNAL_SERVER_ERROR, "misrouted request").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to install Ctrl+C handler");
    }
    tracing::info!("shutdown signal received");
}
