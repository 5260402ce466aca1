//! The controller contract.
//!
//! Controllers are plain structs embedding a [`BaseController`]. The trait
//! supplies the two-method dispatch capability (bind a fresh context,
//! render the response) plus the two route sources: an explicit action
//! table and optional route strings.

use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::controller::context::Context;
use crate::error::DispatchError;

/// One zero-argument action on a controller.
pub type ActionFn<C> = fn(&mut C);

/// Named, zero-argument actions a controller exposes, in declaration
/// order. This explicit enumeration is what route targets are resolved
/// against; an action absent from the table is unreachable.
pub struct ActionTable<C> {
    entries: Vec<(&'static str, ActionFn<C>)>,
}

impl<C> ActionTable<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an action under the name route targets use.
    pub fn with(mut self, name: &'static str, action: ActionFn<C>) -> Self {
        self.entries.push((name, action));
        self
    }

    pub(crate) fn entries(&self) -> &[(&'static str, ActionFn<C>)] {
        &self.entries
    }
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// State every controller embeds: the bound per-request context and the
/// convenience surface for staging responses.
///
/// All helpers only stage status and content type; nothing here commits.
/// The commit happens once, in [`BaseController::render`], at the end of
/// dispatch.
#[derive(Debug, Default)]
pub struct BaseController {
    ctx: Option<Context>,
    render_failure: Option<serde_json::Error>,
}

impl BaseController {
    /// Bind the context for the current request.
    pub fn bind(&mut self, ctx: Context) {
        self.ctx = Some(ctx);
        self.render_failure = None;
    }

    /// The bound context. Valid only between `bind` and `render`; dispatch
    /// guarantees that window for every action invocation.
    pub fn ctx(&mut self) -> &mut Context {
        self.ctx
            .as_mut()
            .expect("controller used outside of dispatch")
    }

    /// Append raw bytes to the response body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.ctx().write(bytes);
    }

    /// Stage `text/html` with the given status.
    pub fn html(&mut self, code: StatusCode) {
        let ctx = self.ctx();
        ctx.html();
        ctx.set(code);
    }

    /// Stage `text/plain` with the given status.
    pub fn string(&mut self, code: StatusCode) {
        let ctx = self.ctx();
        ctx.text_plain();
        ctx.set(code);
    }

    /// Stage `application/json` with the given status.
    pub fn json(&mut self, code: StatusCode) {
        let ctx = self.ctx();
        ctx.json();
        ctx.set(code);
    }

    /// Serialize `value` into the body and stage `application/json` with
    /// the given status. A serialization failure is held back and surfaced
    /// by `render`, so actions stay infallible.
    pub fn render_json<T: Serialize>(&mut self, value: &T, code: StatusCode) {
        if let Err(error) = serde_json::to_writer(&mut *self.ctx(), value) {
            self.render_failure = Some(error);
        }
        self.json(code);
    }

    /// Commit the bound context into the final response.
    pub fn render(&mut self) -> Result<Response, DispatchError> {
        if let Some(error) = self.render_failure.take() {
            return Err(DispatchError::Render(error));
        }
        let mut ctx = self.ctx.take().ok_or(DispatchError::Unbound)?;
        Ok(ctx.commit())
    }
}

/// Implemented by application controllers.
///
/// The value handed to `RouterBuilder::add` is a template: registration
/// reads its `routes` once, and every incoming request constructs a fresh
/// `Default` value to run the action on.
pub trait Controller: Default + Send + 'static {
    /// Access the embedded base state.
    fn base(&mut self) -> &mut BaseController;

    /// Explicit route strings in the `"methods;path;target"` grammar.
    /// A bare-action target binds to this controller.
    fn routes(&self) -> Vec<String> {
        Vec::new()
    }

    /// The controller's actions, by the names route targets use.
    fn actions() -> ActionTable<Self>
    where
        Self: Sized;

    /// Name route targets use for this controller; lower-cased it becomes
    /// the convention base path. Defaults to the type name without its
    /// module path.
    fn controller_name() -> String
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// Bind a fresh per-request context.
    fn bind(&mut self, ctx: Context) {
        self.base().bind(ctx);
    }

    /// Finalize the response.
    fn render(&mut self) -> Result<Response, DispatchError> {
        self.base().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Sample {
        base: BaseController,
    }

    impl Controller for Sample {
        fn base(&mut self) -> &mut BaseController {
            &mut self.base
        }

        fn actions() -> ActionTable<Self> {
            ActionTable::new().with("Bang", |c: &mut Sample| {
                c.base.write(b"bang");
                c.base.json(StatusCode::OK);
            })
        }
    }

    fn bound() -> Sample {
        let (head, _body) = Request::builder().uri("/").body(()).unwrap().into_parts();
        let mut sample = Sample::default();
        sample.bind(Context::new(head));
        sample
    }

    #[test]
    fn controller_name_is_the_bare_type_name() {
        assert_eq!(Sample::controller_name(), "Sample");
    }

    #[test]
    fn helpers_stage_and_render_commits() {
        let mut sample = bound();
        sample.base.write(b"payload");
        sample.base.html(StatusCode::CREATED);

        let response = sample.render().unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn render_json_stages_json_content_type() {
        let mut sample = bound();
        sample
            .base
            .render_json(&serde_json::json!({"ok": true}), StatusCode::OK);

        let response = sample.render().unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn render_surfaces_serialization_failures() {
        // Non-string map keys cannot be serialized to JSON.
        let mut bad = BTreeMap::new();
        bad.insert((1u32, 2u32), "value");

        let mut sample = bound();
        sample.base.render_json(&bad, StatusCode::OK);
        assert!(matches!(
            sample.render(),
            Err(DispatchError::Render(_))
        ));
    }

    #[test]
    fn render_without_bind_is_an_error() {
        let mut sample = Sample::default();
        assert!(matches!(sample.render(), Err(DispatchError::Unbound)));
    }

    #[test]
    fn action_table_preserves_declaration_order() {
        let table = Sample::actions();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].0, "Bang");
    }
}
