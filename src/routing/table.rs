//! Route lookup.
//!
//! # Responsibilities
//! - Store descriptors in match order
//! - Resolve `(method, path)` to a descriptor
//! - Distinguish "no such path" from "wrong method for path"
//!
//! # Design Decisions
//! - Two ordered segments: explicit routes scan before convention routes
//! - Within a segment, registration order is preserved
//! - Duplicate `(method, path)` pairs: earliest registered wins, silently.
//!   A stricter table would reject the duplicate at startup; the silent
//!   shadowing is kept as the documented, observable behavior.
//! - Linear scan over `Vec`s keeps resolution reproducible

use axum::http::Method;

use crate::error::ResolveError;
use crate::routing::route::RouteDescriptor;

/// Ordered route table. Mutable only while the router is being built;
/// the serving layer holds it behind an `Arc` and only reads.
#[derive(Debug, Default)]
pub struct RouteTable {
    explicit: Vec<RouteDescriptor>,
    convention: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Append an explicit descriptor (route string or routes file).
    pub fn push_explicit(&mut self, descriptor: RouteDescriptor) {
        self.explicit.push(descriptor);
    }

    /// Append a convention-derived descriptor.
    pub fn push_convention(&mut self, descriptor: RouteDescriptor) {
        self.convention.push(descriptor);
    }

    /// All descriptors, in match order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.explicit.iter().chain(self.convention.iter())
    }

    /// Number of explicit descriptors.
    pub fn explicit_len(&self) -> usize {
        self.explicit.len()
    }

    pub fn len(&self) -> usize {
        self.explicit.len() + self.convention.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a request to the first matching descriptor.
    ///
    /// A descriptor matches when its path equals `path` exactly and its
    /// method set contains `method`. When the path is known but no method
    /// matches, the error carries every method the path accepts.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<&RouteDescriptor, ResolveError> {
        let mut allowed: Vec<Method> = Vec::new();
        for descriptor in self.iter() {
            if descriptor.path != path {
                continue;
            }
            if descriptor.allows(method) {
                return Ok(descriptor);
            }
            for m in &descriptor.methods {
                if !allowed.contains(m) {
                    allowed.push(m.clone());
                }
            }
        }
        if allowed.is_empty() {
            Err(ResolveError::NotFound)
        } else {
            Err(ResolveError::MethodNotAllowed { allowed })
        }
    }
}
