/// Registration, login and verification handlers. Thin plumbing: parse,
/// validate shape, delegate to the service, map to a response.
use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::AccountError;
use crate::models::{
    AccountView, LoginRequest, MessageResponse, RegisterRequest, TokenResponse, VerifyRequest,
};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountView>), AccountError> {
    payload
        .validate()
        .map_err(|err| AccountError::Validation(err.to_string()))?;

    let view = state
        .service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AccountError> {
    payload
        .validate()
        .map_err(|err| AccountError::Validation(err.to_string()))?;

    let access_token = state
        .service
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn verify_account(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, AccountError> {
    payload
        .validate()
        .map_err(|err| AccountError::Validation(err.to_string()))?;

    state.service.verify(&payload.email, &payload.code).await?;

    Ok(Json(MessageResponse {
        message: "Verification successful!".to_string(),
    }))
}
