use axum::{
    extract::Request,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::errors::ApiError;
use crate::api::handlers::{
    create_account_handler, get_account_handler, health_handler, session_handler,
};
use crate::api::middleware::{auth, create_error_handling_middleware, ErrorHandlingConfig};
use crate::infrastructure::{AccountStore, TokenVerifier};

/// Largest JSON body accepted by the account routes
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Application state container
#[derive(Clone, Default)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub verifier: Option<Arc<TokenVerifier>>,
}

impl AppState {
    pub fn new(jwt_secret: Option<&str>) -> Self {
        Self {
            accounts: Arc::new(AccountStore::new()),
            verifier: jwt_secret.map(|secret| Arc::new(TokenVerifier::new(secret))),
        }
    }
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState, error_config: ErrorHandlingConfig) -> Router {
    let accounts = Router::new()
        .route("/v1/accounts", post(create_account_handler))
        .route("/v1/accounts/{id}", get(get_account_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(Arc::clone(&state.accounts));

    let session = Router::new()
        .route("/v1/session", get(session_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            state.verifier.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .merge(accounts)
        .merge(session)
        .fallback(not_found_handler)
        // Outermost, so it also sees errors from the auth middleware
        .layer(create_error_handling_middleware(error_config))
}

async fn not_found_handler(request: Request) -> ApiError {
    ApiError::not_found(format!(
        "Can't find {} on this server",
        request.uri().path()
    ))
}
