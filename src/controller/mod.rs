//! Controller subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     controller template
//!     → base.rs (action table, explicit route strings)
//!     → registry.rs (type-erased handlers, one per action)
//!
//! Per request:
//!     resolved (controller, action)
//!     → registry.rs (handler lookup)
//!     → fresh controller value + context.rs (bound response state)
//!     → action runs, render commits
//! ```
//!
//! # Design Decisions
//! - The value passed to `add` is a template: its `routes` are read once,
//!   then every request constructs a fresh `Default` value. Controller
//!   state cannot leak across requests.
//! - Action lookup is an explicit table the controller author enumerates;
//!   there is no runtime introspection to lean on.
//! - The context is one-shot: a single commit flushes status and headers.

pub mod base;
pub mod context;
pub mod registry;
