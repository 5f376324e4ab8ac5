use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Output channel for an error response
pub trait ResponseSink {
    /// Set the HTTP status of the response
    fn status(&mut self, status: StatusCode) -> &mut Self;

    /// Write the JSON body, completing the response
    fn json(&mut self, body: Value);
}

/// Buffered sink that becomes an axum response
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSink {
    status: StatusCode,
    body: Option<Value>,
}

impl Default for JsonSink {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSink {
    /// Sink starting at 200 OK
    pub fn new() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// Sink whose status was already set by an earlier stage
    pub fn with_status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn current_status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn is_written(&self) -> bool {
        self.body.is_some()
    }
}

impl ResponseSink for JsonSink {
    fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    fn json(&mut self, body: Value) {
        debug_assert!(self.body.is_none(), "response body written twice");
        self.body = Some(body);
    }
}

impl IntoResponse for JsonSink {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
