//! Error taxonomy.
//!
//! # Design Decisions
//! - Registration and route-loading failures are fatal: they indicate a
//!   configuration defect and abort startup.
//! - Serving-time failures are converted to HTTP status responses and never
//!   escape the dispatch loop.
//! - Lookup failures distinguish "no such path" (404) from "path exists,
//!   method does not" (405) so the server can answer precisely.

use axum::http::Method;
use thiserror::Error;

/// Errors raised while assembling the router: parsing route strings,
/// loading route files, and registering controllers.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route string does not follow the `"methods;path;target"` grammar.
    #[error("malformed route string {route:?}: {reason}")]
    Syntax { route: String, reason: String },

    /// A configured convention method is not a valid HTTP method token.
    #[error("invalid convention method {0:?}")]
    InvalidMethod(String),

    /// An explicit route names a controller that was never registered.
    #[error("route {path:?} targets unregistered controller {controller:?}")]
    UnknownController { controller: String, path: String },

    /// A route targets an action the controller does not expose.
    #[error("controller {controller:?} has no action named {action:?}")]
    NoSuchAction { controller: String, action: String },

    /// Two registrations resolved to the same controller name.
    #[error("controller {0:?} is already registered")]
    DuplicateController(String),

    /// A routes file could not be read.
    #[error("failed to read routes file")]
    Io(#[from] std::io::Error),

    /// A routes file is not a JSON list of route strings.
    #[error("failed to parse routes file")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a failed route-table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No descriptor path equals the request path.
    #[error("no route matches the request path")]
    NotFound,

    /// At least one descriptor path matched, but none accepted the method.
    /// Carries the methods the path does accept, for an `Allow` header.
    #[error("path is routable but not for this method")]
    MethodNotAllowed { allowed: Vec<Method> },
}

/// Errors surfaced while dispatching a resolved route.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The controller's render step failed, e.g. JSON serialization.
    #[error("response rendering failed")]
    Render(#[source] serde_json::Error),

    /// Render was called with no bound context. Dispatch always binds a
    /// context first, so this indicates a controller driven by hand.
    #[error("render called with no bound context")]
    Unbound,

    /// A descriptor survived table resolution but its controller has no
    /// registration.
    #[error("no registration for controller {0:?}")]
    UnknownController(String),

    /// The registration exists but exposes no such action.
    #[error("controller {controller:?} exposes no action {action:?}")]
    UnknownAction { controller: String, action: String },
}
