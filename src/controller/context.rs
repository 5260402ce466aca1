//! Per-request response context.
//!
//! # Responsibilities
//! - Hold the request head and the staged response state
//! - Buffer body writes until commit
//! - Commit exactly once: status line, headers, body
//!
//! # Design Decisions
//! - Staging and committing are separate: convenience setters only stage
//!   status and content type; `commit` is the one operation that produces
//!   the response.
//! - After commit, every mutation is a silent no-op. Normal dispatch
//!   commits once, at render time, so actions never observe that state.

use std::io;

use axum::body::Body;
use axum::http::{header, request, HeaderValue, StatusCode};
use axum::response::Response;

/// Mutable response state for exactly one request.
///
/// States: fresh → header-configured (status and content type staged any
/// number of times) → committed. Body writes may interleave with staging
/// but land before the commit.
#[derive(Debug)]
pub struct Context {
    head: request::Parts,
    status: Option<StatusCode>,
    content_type: Option<HeaderValue>,
    body: Vec<u8>,
    committed: bool,
}

impl Context {
    /// Bind a context to the head of the request it answers.
    pub fn new(head: request::Parts) -> Self {
        Self {
            head,
            status: None,
            content_type: None,
            body: Vec::new(),
            committed: false,
        }
    }

    /// Head of the request this context answers.
    pub fn request(&self) -> &request::Parts {
        &self.head
    }

    /// Stage the response status. No-op once committed.
    pub fn set(&mut self, code: StatusCode) {
        if !self.committed {
            self.status = Some(code);
        }
    }

    /// Stage `text/html` as the response content type.
    pub fn html(&mut self) {
        self.stage_content_type(HeaderValue::from_static("text/html; charset=utf-8"));
    }

    /// Stage `text/plain` as the response content type.
    pub fn text_plain(&mut self) {
        self.stage_content_type(HeaderValue::from_static("text/plain; charset=utf-8"));
    }

    /// Stage `application/json` as the response content type.
    pub fn json(&mut self) {
        self.stage_content_type(HeaderValue::from_static("application/json"));
    }

    fn stage_content_type(&mut self, value: HeaderValue) {
        if !self.committed {
            self.content_type = Some(value);
        }
    }

    /// Append raw bytes to the response body. Dropped once committed.
    pub fn write(&mut self, bytes: &[u8]) {
        if !self.committed {
            self.body.extend_from_slice(bytes);
        }
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Flush the staged status, content type, and body into a response.
    ///
    /// The first call commits: an unset status defaults to `200 OK`, and
    /// the content-type header is only emitted when one was staged. Later
    /// calls keep the committed status but carry nothing further.
    pub fn commit(&mut self) -> Response {
        let status = self.status.unwrap_or(StatusCode::OK);
        let mut response = if self.committed {
            Response::new(Body::empty())
        } else {
            self.committed = true;
            let mut response = Response::new(Body::from(std::mem::take(&mut self.body)));
            if let Some(content_type) = self.content_type.take() {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
            }
            response
        };
        *response.status_mut() = status;
        response
    }
}

/// Serializers write straight into the body buffer, the way encoders wrote
/// into the response writer in classic MVC stacks.
impl io::Write for Context {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Context::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
