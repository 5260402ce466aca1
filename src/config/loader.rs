//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let config: RouterConfig = toml::from_str(
            r#"
            convention_methods = ["get", "post"]
            routes = ["get;/hello;Sample.Hello"]

            [listener]
            bind_address = "127.0.0.1:9090"
            "#,
        )
        .unwrap();

        assert!(validate_config(&config).is_ok());
        assert_eq!(config.listener.bind_address, "127.0.0.1:9090");
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert!(validate_config(&config).is_ok());
        assert!(!config.convention_methods.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
