//! Controller registration and type-erased dispatch.
//!
//! # Responsibilities
//! - Snapshot a controller's action table at registration
//! - Erase the concrete controller type behind per-action handlers
//! - Look up the handler for a resolved `(controller, action)` pair
//!
//! # Design Decisions
//! - Each stored handler owns the full dispatch protocol: fresh instance,
//!   bind context, invoke action, render. Nothing from registration time
//!   is reused per request except the immutable closure itself.
//! - Handlers are wrapped in the registration's middleware chain once, at
//!   registration, so serving is two map lookups and a call.
//! - Lookup is by exact name; the map is never iterated, so resolution
//!   order cannot depend on it.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::controller::base::Controller;
use crate::controller::context::Context;
use crate::error::{DispatchError, RouterError};
use crate::http::middleware::{BoxFuture, Handler, MiddlewareChain};

/// Innermost handler for one action: runs the dispatch protocol against a
/// fresh controller value.
struct ActionDispatch<C: Controller> {
    action: fn(&mut C),
}

impl<C: Controller> Handler for ActionDispatch<C> {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let action = self.action;
        Box::pin(async move {
            let (head, _body) = request.into_parts();
            let mut controller = C::default();
            controller.bind(Context::new(head));
            (action)(&mut controller);
            match controller.render() {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(error = %error, "controller render failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "response rendering failed")
                        .into_response()
                }
            }
        })
    }
}

/// Immutable record for one registered controller.
pub(crate) struct Registration {
    /// Middleware-wrapped handlers, keyed by action name.
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl Registration {
    pub(crate) fn has_action(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }
}

/// All controller registrations, keyed by controller name. Read-only once
/// the router is built.
#[derive(Default)]
pub(crate) struct ControllerRegistry {
    registrations: HashMap<String, Registration>,
}

impl ControllerRegistry {
    /// Register a controller type under `name`, wrapping every action in
    /// `chain`. Rejects a second registration under the same name.
    pub(crate) fn register<C: Controller>(
        &mut self,
        name: &str,
        chain: &MiddlewareChain,
    ) -> Result<(), RouterError> {
        if self.registrations.contains_key(name) {
            return Err(RouterError::DuplicateController(name.to_string()));
        }

        let mut handlers = HashMap::new();
        for (action_name, action) in C::actions().entries() {
            let inner: Arc<dyn Handler> = Arc::new(ActionDispatch::<C> { action: *action });
            handlers.insert((*action_name).to_string(), chain.wrap(inner));
        }

        self.registrations
            .insert(name.to_string(), Registration { handlers });
        Ok(())
    }

    pub(crate) fn get(&self, controller: &str) -> Option<&Registration> {
        self.registrations.get(controller)
    }

    /// Handler for a resolved `(controller, action)` pair.
    pub(crate) fn handler(
        &self,
        controller: &str,
        action: &str,
    ) -> Result<&Arc<dyn Handler>, DispatchError> {
        let registration = self
            .registrations
            .get(controller)
            .ok_or_else(|| DispatchError::UnknownController(controller.to_string()))?;
        registration
            .handlers
            .get(action)
            .ok_or_else(|| DispatchError::UnknownAction {
                controller: controller.to_string(),
                action: action.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::base::{ActionTable, BaseController};
    use axum::http::Method;

    #[derive(Default)]
    struct Sample {
        base: BaseController,
    }

    impl Sample {
        fn bang(&mut self) {
            self.base.write(b"bang");
            self.base.json(StatusCode::OK);
        }
    }

    impl Controller for Sample {
        fn base(&mut self) -> &mut BaseController {
            &mut self.base
        }

        fn actions() -> ActionTable<Self> {
            ActionTable::new().with("Bang", Self::bang)
        }
    }

    fn request() -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri("/sample/bang")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ControllerRegistry::default();
        let chain = MiddlewareChain::default();
        registry.register::<Sample>("Sample", &chain).unwrap();
        assert!(matches!(
            registry.register::<Sample>("Sample", &chain),
            Err(RouterError::DuplicateController(_))
        ));
    }

    #[test]
    fn lookup_distinguishes_controller_from_action() {
        let mut registry = ControllerRegistry::default();
        registry
            .register::<Sample>("Sample", &MiddlewareChain::default())
            .unwrap();

        assert!(registry.handler("Sample", "Bang").is_ok());
        assert!(matches!(
            registry.handler("Nope", "Bang"),
            Err(DispatchError::UnknownController(_))
        ));
        assert!(matches!(
            registry.handler("Sample", "Nope"),
            Err(DispatchError::UnknownAction { .. })
        ));
    }

    #[tokio::test]
    async fn erased_handler_runs_the_dispatch_protocol() {
        let mut registry = ControllerRegistry::default();
        registry
            .register::<Sample>("Sample", &MiddlewareChain::default())
            .unwrap();

        let handler = registry.handler("Sample", "Bang").unwrap();
        let response = handler.call(request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"bang");
    }
}
