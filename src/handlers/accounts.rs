/// Account read/update/delete handlers. Listing, fetching by id and
/// deletion are admin-only; updates are self-or-admin.
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AccountError;
use crate::middleware::CurrentAccount;
use crate::models::{AccountView, MessageResponse, UpdateAccountRequest};
use crate::AppState;

pub async fn me(CurrentAccount(account): CurrentAccount) -> Json<AccountView> {
    Json(AccountView::from(account))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
) -> Result<Json<Vec<AccountView>>, AccountError> {
    actor.require_admin()?;
    let accounts = state.service.list_accounts().await?;
    Ok(Json(accounts))
}

pub async fn get_account(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountView>, AccountError> {
    actor.require_admin()?;
    let view = state.service.get_account(account_id).await?;
    Ok(Json(view))
}

pub async fn update_account(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountView>, AccountError> {
    payload
        .validate()
        .map_err(|err| AccountError::Validation(err.to_string()))?;

    let view = state
        .service
        .update_profile(&actor, account_id, payload)
        .await?;
    Ok(Json(view))
}

pub async fn delete_account(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(account_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AccountError> {
    actor.require_admin()?;
    state.service.delete_account(account_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully.".to_string(),
    }))
}
