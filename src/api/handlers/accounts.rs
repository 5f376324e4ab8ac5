use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::domain::RawError;
use crate::infrastructure::{Account, AccountStore};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 100, message = "An account must have a name"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// POST /v1/accounts
pub async fn create_account_handler(
    State(store): State<Arc<AccountStore>>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    payload.validate()?;

    let account = store.create(&payload.name, &payload.email)?;
    info!(account_id = %account.id, "Account created");

    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /v1/accounts/{id}
pub async fn get_account_handler(
    State(store): State<Arc<AccountStore>>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| RawError::cast("id", id.as_str()))?;

    store
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No account found with that ID"))
}
