//! Route file loading.
//!
//! # Responsibilities
//! - Read a routes file from disk
//! - Deserialize the ordered list of route strings
//! - Parse each entry into a descriptor
//!
//! # Design Decisions
//! - JSON list of route strings, in file order
//! - File entries must carry a qualified `Controller.Action` target; a
//!   bare action has no registration to attach to
//! - Any failure aborts startup; a half-loaded table never serves

use std::fs;
use std::path::Path;

use crate::error::RouterError;
use crate::routing::route::{parse_route, RouteDescriptor};

/// Parse the contents of a routes file.
pub fn parse_routes_json(raw: &str) -> Result<Vec<RouteDescriptor>, RouterError> {
    let entries: Vec<String> = serde_json::from_str(raw)?;
    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in &entries {
        let descriptor = parse_route(entry)?;
        if descriptor.controller.is_empty() {
            return Err(RouterError::Syntax {
                route: entry.clone(),
                reason: "routes file entries must use a Controller.Action target".to_string(),
            });
        }
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

/// Load and parse a routes file.
pub fn load_routes_file(path: &Path) -> Result<Vec<RouteDescriptor>, RouterError> {
    let raw = fs::read_to_string(path)?;
    parse_routes_json(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn parses_entries_in_file_order() {
        let raw = r#"["get,post;/hello;Sample.Hello", "get;/bang;Sample.Bang"]"#;
        let descriptors = parse_routes_json(raw).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].path, "/hello");
        assert_eq!(descriptors[0].methods, vec![Method::GET, Method::POST]);
        assert_eq!(descriptors[1].action, "Bang");
    }

    #[test]
    fn rejects_bare_action_targets() {
        let raw = r#"["get;/hello;Hello"]"#;
        assert!(matches!(
            parse_routes_json(raw),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_routes_json("not json"),
            Err(RouterError::Json(_))
        ));
    }

    #[test]
    fn rejects_malformed_entry() {
        let raw = r#"["get;/hello"]"#;
        assert!(matches!(
            parse_routes_json(raw),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_routes_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RouterError::Io(_)));
    }
}
