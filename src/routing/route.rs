//! Route descriptors and the route string grammar.
//!
//! A route string has exactly three `;`-separated fields:
//!
//! ```text
//! "<method>[,<method>...];<path>;[<Controller>.]<Action>"
//! ```
//!
//! Methods are case-insensitive HTTP verb tokens. The target splits on the
//! first `.`; when the controller prefix is omitted the route belongs to
//! whichever registration the string is attached to.

use axum::http::Method;

use crate::error::RouterError;

/// A parsed route: the HTTP methods and exact path bound to one
/// controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Accepted methods. Non-empty, deduplicated, in declaration order.
    pub methods: Vec<Method>,
    /// Absolute request path, matched by string equality.
    pub path: String,
    /// Controller name as route targets spell it (e.g. `"Sample"`).
    /// Empty only between parsing and attachment to a registration.
    pub controller: String,
    /// Action name, matched against the controller's action table.
    pub action: String,
}

impl RouteDescriptor {
    /// Whether this route accepts the given method.
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }
}

/// Parse one route string. Pure; does no I/O.
pub fn parse_route(raw: &str) -> Result<RouteDescriptor, RouterError> {
    let syntax = |reason: String| RouterError::Syntax {
        route: raw.to_string(),
        reason,
    };

    let fields: Vec<&str> = raw.split(';').collect();
    if fields.len() != 3 {
        return Err(syntax(format!(
            "expected 3 ';'-separated fields, got {}",
            fields.len()
        )));
    }

    let mut methods = Vec::new();
    for token in fields[0].split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(syntax("empty method token".to_string()));
        }
        let method = Method::from_bytes(token.to_ascii_uppercase().as_bytes())
            .map_err(|_| syntax(format!("invalid method token {token:?}")))?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }

    let path = fields[1].trim();
    if path.is_empty() {
        return Err(syntax("empty path".to_string()));
    }
    if !path.starts_with('/') {
        return Err(syntax(format!("path {path:?} is not absolute")));
    }

    let target = fields[2].trim();
    if target.is_empty() {
        return Err(syntax("empty target".to_string()));
    }
    let (controller, action) = match target.split_once('.') {
        Some((controller, action)) => (controller, action),
        None => ("", target),
    };
    if action.is_empty() {
        return Err(syntax("empty action name".to_string()));
    }

    Ok(RouteDescriptor {
        methods,
        path: path.to_string(),
        controller: controller.to_string(),
        action: action.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_target() {
        let route = parse_route("get,post;/;Hello.Home").unwrap();
        assert_eq!(route.methods, vec![Method::GET, Method::POST]);
        assert_eq!(route.path, "/");
        assert_eq!(route.controller, "Hello");
        assert_eq!(route.action, "Home");
    }

    #[test]
    fn parses_bare_action() {
        let route = parse_route("get,post;/;Home").unwrap();
        assert_eq!(route.controller, "");
        assert_eq!(route.action, "Home");
    }

    #[test]
    fn methods_are_case_insensitive() {
        let lower = parse_route("get,post;/p;C.A").unwrap();
        let upper = parse_route("GET,Post;/p;C.A").unwrap();
        assert_eq!(lower.methods, upper.methods);
    }

    #[test]
    fn method_order_does_not_affect_the_set() {
        let a = parse_route("get,post;/p;C.A").unwrap();
        let b = parse_route("post,get;/p;C.A").unwrap();
        for method in [&Method::GET, &Method::POST] {
            assert!(a.allows(method));
            assert!(b.allows(method));
        }
    }

    #[test]
    fn duplicate_methods_collapse() {
        let route = parse_route("get,GET,get;/p;A").unwrap();
        assert_eq!(route.methods, vec![Method::GET]);
    }

    #[test]
    fn target_splits_on_first_dot() {
        let route = parse_route("get;/p;Api.V1.List").unwrap();
        assert_eq!(route.controller, "Api");
        assert_eq!(route.action, "V1.List");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            parse_route("get;/p"),
            Err(RouterError::Syntax { .. })
        ));
        assert!(matches!(
            parse_route("get;/p;A;extra"),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_empty_methods() {
        assert!(matches!(
            parse_route(";/p;A"),
            Err(RouterError::Syntax { .. })
        ));
        assert!(matches!(
            parse_route("get,;/p;A"),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_empty_or_relative_path() {
        assert!(matches!(parse_route("get;;A"), Err(RouterError::Syntax { .. })));
        assert!(matches!(
            parse_route("get;p;A"),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_empty_action() {
        assert!(matches!(parse_route("get;/p;"), Err(RouterError::Syntax { .. })));
        assert!(matches!(
            parse_route("get;/p;C."),
            Err(RouterError::Syntax { .. })
        ));
    }

    #[test]
    fn syntax_error_names_the_route() {
        let err = parse_route("bogus route").unwrap_err();
        assert!(err.to_string().contains("bogus route"));
    }
}
