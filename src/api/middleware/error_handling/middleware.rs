use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::config::ErrorHandlingConfig;
use super::responder::ErrorResponder;
use super::sink::JsonSink;
use super::utils::ErrorUtils;
use crate::domain::{ErrorName, RawError};

/// Bodies longer than this are never used as an error message
const MAX_MESSAGE_BODY: usize = 1024;

/// Error handling middleware layer
#[derive(Clone)]
pub struct ErrorHandlingLayer {
    responder: Arc<ErrorResponder>,
}

impl ErrorHandlingLayer {
    pub fn new(config: ErrorHandlingConfig) -> Self {
        Self {
            responder: Arc::new(ErrorResponder::from_config(config)),
        }
    }
}

impl<S> tower::Layer<S> for ErrorHandlingLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = ErrorHandlingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandlingService {
            inner,
            responder: Arc::clone(&self.responder),
        }
    }
}

/// Error handling service wrapper
#[derive(Clone)]
pub struct ErrorHandlingService<S> {
    inner: S,
    responder: Arc<ErrorResponder>,
}

impl<S> tower::Service<Request> for ErrorHandlingService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let responder = Arc::clone(&self.responder);

        Box::pin(async move {
            let uri = req.uri().clone();
            let method = req.method().clone();

            let mut response = match inner.call(req).await {
                Ok(response) => response,
                Err(err) => return Err(err),
            };

            if let Some(error) = response.extensions_mut().remove::<RawError>() {
                let mut formatted = respond(&responder, error, response.status(), &uri, &method);
                carry_headers(response.headers(), formatted.headers_mut());
                return Ok(formatted);
            }

            let status = response.status();
            if status.is_client_error() || status.is_server_error() {
                let headers = std::mem::take(response.headers_mut());
                let error = error_from_bare_response(response).await;
                let mut formatted = respond(&responder, error, status, &uri, &method);
                carry_headers(&headers, formatted.headers_mut());
                return Ok(formatted);
            }

            Ok(response)
        })
    }
}

fn respond(
    responder: &ErrorResponder,
    error: RawError,
    prior_status: StatusCode,
    uri: &Uri,
    method: &Method,
) -> Response {
    let mut sink = JsonSink::with_status(prior_status);
    let emitted = responder.handle(error, &mut sink);
    ErrorUtils::log_error(&emitted, uri, method, responder.config());
    sink.into_response()
}

/// Copy headers such as `Allow` and `WWW-Authenticate` from the response
/// being replaced; the body headers describe the old body and are dropped
fn carry_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}

/// Build an error for a 4xx/5xx response that did not come from `ApiError`,
/// such as an extractor rejection or a bare status code
async fn error_from_bare_response(response: Response) -> RawError {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("Unknown error").to_string();

    if status.is_server_error() {
        return RawError::new(ErrorName::Error, reason).with_status_code(status.as_u16());
    }

    let message = match axum::body::to_bytes(response.into_body(), MAX_MESSAGE_BODY).await {
        Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) if !text.trim().is_empty() => text,
            _ => reason,
        },
        Err(err) => {
            debug!("Discarding oversized error body: {}", err);
            reason
        }
    };

    RawError::app(message, status.as_u16())
}

/// Create error handling middleware
pub fn create_error_handling_middleware(config: ErrorHandlingConfig) -> ErrorHandlingLayer {
    ErrorHandlingLayer::new(config)
}

/// Response carrying `error` for the error handling layer to format
pub fn error_response(error: RawError) -> Response {
    let status = error
        .status_code
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, Body::empty()).into_response();
    response.extensions_mut().insert(error);
    response
}
