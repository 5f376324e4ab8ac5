use axum::{Extension, Json};

use crate::infrastructure::Claims;

/// GET /v1/session
/// Claims of the bearer token the auth middleware verified
pub async fn session_handler(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
