//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// HTTP methods convention-derived routes accept.
    pub convention_methods: Vec<String>,

    /// Inline route strings in the `"methods;path;Controller.Action"`
    /// grammar, loaded ahead of controller registrations.
    pub routes: Vec<String>,

    /// Optional routes file: a JSON list of route strings.
    pub routes_file: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            convention_methods: vec![
                "get".to_string(),
                "post".to_string(),
                "put".to_string(),
                "delete".to_string(),
                "patch".to_string(),
                "head".to_string(),
                "options".to_string(),
            ],
            routes: Vec::new(),
            routes_file: None,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}
