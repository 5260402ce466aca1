//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → server.rs (axum catch-all handler)
//!     → routing table (resolve method + path)
//!     → middleware.rs (per-registration chain, outermost first)
//!     → controller dispatch (fresh instance, bind, invoke, render)
//!     → Response to client
//! ```

pub mod middleware;
pub mod server;

pub use server::{Router, RouterBuilder};
