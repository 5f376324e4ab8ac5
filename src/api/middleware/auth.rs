use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::infrastructure::TokenVerifier;

/// Bearer token authentication; verified claims are added to request extensions
pub async fn auth_middleware(
    State(verifier): State<Option<Arc<TokenVerifier>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let verifier = verifier
        .ok_or_else(|| ApiError::internal_error("JWT_SECRET is not configured"))?;

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::unauthorized("You are not logged in! Please log in to get access.")
        })?;

    let claims = verifier.verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
