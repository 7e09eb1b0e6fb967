//! Bearer token extraction for authenticated routes.
//!
//! The extractor validates the `Authorization: Bearer <token>` header and
//! re-fetches the account by id on every request. Tokens are stateless and
//! unrevocable, so this re-fetch is the only thing keeping authorization
//! fresh: a deleted account is rejected here even while its token is still
//! within its expiry window.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AccountError;
use crate::models::Account;
use crate::AppState;

/// The account behind the request's bearer token.
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AccountError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AccountError::InvalidToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AccountError::InvalidToken)?;

        let account = state.service.current_account(token).await?;
        Ok(CurrentAccount(account))
    }
}
