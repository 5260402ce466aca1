//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route sources (at startup):
//!     controller action tables  → convention descriptors
//!     `routes` field strings    → route.rs (parse)
//!     routes file (JSON)        → loader.rs → route.rs (parse)
//!     → table.rs (ordered RouteTable, frozen at build)
//!
//! Incoming request (method, path):
//!     → table.rs (scan explicit, then convention)
//!     → Return: matched descriptor, NotFound, or MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Routes assembled at startup, immutable at runtime
//! - Exact path equality only; no parameters or wildcards
//! - Deterministic: descriptors live in ordered `Vec`s, never in maps
//! - First match wins; duplicate `(method, path)` pairs shadow silently

pub mod loader;
pub mod route;
pub mod table;
