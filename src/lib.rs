//! MVC-style request router.
//!
//! Maps incoming HTTP requests to controller actions, either by convention
//! (`/controllername/actionname` derived from type and action names) or
//! through explicit route strings (`"get,post;/hello/world;Hello"`), and
//! dispatches through an optional per-registration middleware chain.
//!
//! # Architecture Overview
//!
//! ```text
//!  Client Request
//!      │
//!      ▼
//!  ┌─────────┐    ┌──────────────┐    ┌──────────────────┐
//!  │  http   │───▶│   routing    │───▶│    controller    │
//!  │ server  │    │    table     │    │ registry+dispatch│
//!  └─────────┘    └──────────────┘    └──────────────────┘
//!      │                 │                     │
//!      │          explicit routes       fresh controller
//!      │          then convention       + bound context
//!      ▼                                       │
//!  middleware chain ◀──────────────────────────┘
//!  (per registration, first added = outermost)
//! ```
//!
//! Registration happens once at startup through [`RouterBuilder`]; the
//! built [`Router`] is immutable and safe for unsynchronized concurrent
//! reads while serving.

// Core subsystems
pub mod config;
pub mod controller;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod error;

pub use config::schema::RouterConfig;
pub use controller::base::{ActionTable, BaseController, Controller};
pub use controller::context::Context;
pub use error::{DispatchError, ResolveError, RouterError};
pub use http::middleware::{Middleware, Next, RequestLog};
pub use http::server::{Router, RouterBuilder};
pub use routing::route::RouteDescriptor;
