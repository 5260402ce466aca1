//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses
//! - Check convention methods and inline routes before they reach the
//!   builder, so a bad config fails at load time with file context
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use axum::http::Method;

use crate::config::schema::RouterConfig;
use crate::routing::route::parse_route;

/// One semantic problem found in a configuration.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("{:?} is not a socket address", config.listener.bind_address),
        });
    }

    if config.convention_methods.is_empty() {
        errors.push(ValidationError {
            field: "convention_methods",
            message: "must not be empty".to_string(),
        });
    }
    for token in &config.convention_methods {
        if Method::from_bytes(token.to_ascii_uppercase().as_bytes()).is_err() {
            errors.push(ValidationError {
                field: "convention_methods",
                message: format!("{token:?} is not an HTTP method"),
            });
        }
    }

    for raw in &config.routes {
        if let Err(error) = parse_route(raw) {
            errors.push(ValidationError {
                field: "routes",
                message: error.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_problem() {
        let config = RouterConfig {
            convention_methods: vec!["not a method".to_string()],
            routes: vec!["broken".to_string()],
            ..RouterConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn rejects_unparseable_bind_address() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "nowhere".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "listener.bind_address");
    }
}
