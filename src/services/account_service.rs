//! Account lifecycle orchestration: registration, email verification,
//! authentication and profile mutation. Persistence is delegated to the
//! [`AccountStore`]; this layer owns the rules.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AccountError, Result};
use crate::models::{Account, AccountView, NewAccount, Role, UpdateAccountRequest};
use crate::notify::CodeNotifier;
use crate::security::jwt::TokenIssuer;
use crate::security::password;
use crate::security::verification::{CodeCheck, VerificationCodes};
use crate::store::AccountStore;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    tokens: TokenIssuer,
    codes: VerificationCodes,
    notifier: Arc<dyn CodeNotifier>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: TokenIssuer,
        codes: VerificationCodes,
        notifier: Arc<dyn CodeNotifier>,
    ) -> Self {
        Self {
            store,
            tokens,
            codes,
            notifier,
        }
    }

    /// Create an unverified account and hand its verification code to the
    /// notification channel. A duplicate email reports `Conflict`, whether
    /// caught by the pre-check or by the store's unique constraint.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plain_password: &str,
    ) -> Result<AccountView> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AccountError::Conflict);
        }

        let password_hash = password::hash_password(plain_password)?;
        let (code, expires_at) = self.codes.generate();

        let account = self
            .store
            .create(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: Role::User,
                verification_code: Some(code.clone()),
                verification_code_expires_at: Some(expires_at),
            })
            .await?;

        if let Err(err) = self
            .notifier
            .emit_verification_code(&account.email, &code, expires_at)
            .await
        {
            warn!(email = %account.email, error = %err, "failed to deliver verification code");
        }

        info!(account_id = %account.id, email = %account.email, "account registered");
        Ok(AccountView::from(account))
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller. Verification status does not gate login; it is an
    /// independent gate.
    pub async fn authenticate(&self, email: &str, plain_password: &str) -> Result<String> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !password::verify_password(plain_password, &account.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id, &account.email)?;
        info!(account_id = %account.id, "login succeeded");
        Ok(token)
    }

    /// Submit a verification code. On success the verified flag is set and
    /// the code cleared in one store call; verification is one-shot, so a
    /// second correct submission reports `AlreadyVerified`.
    pub async fn verify(&self, email: &str, code: &str) -> Result<()> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if account.is_verified {
            return Err(AccountError::AlreadyVerified);
        }

        let outcome = self.codes.check(
            code,
            account.verification_code.as_deref(),
            account.verification_code_expires_at,
            Utc::now(),
        );

        match outcome {
            CodeCheck::Valid => {
                self.store.mark_verified(account.id).await?;
                info!(account_id = %account.id, "account verified");
                Ok(())
            }
            // An unverified account with no pending code has nothing that
            // could match, so the submission is simply wrong.
            CodeCheck::Mismatch | CodeCheck::NoPendingCode => Err(AccountError::InvalidCode),
            CodeCheck::Expired => Err(AccountError::CodeExpired),
        }
    }

    /// Resolve a bearer token to a live account. Tokens are unrevocable,
    /// so the account is re-fetched on every call; a deleted account fails
    /// here regardless of the token's remaining lifetime.
    pub async fn current_account(&self, token: &str) -> Result<Account> {
        let claims = self.tokens.validate(token)?;
        let id = claims.account_id()?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn get_account(&self, id: Uuid) -> Result<AccountView> {
        let account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;
        Ok(AccountView::from(account))
    }

    pub async fn list_accounts(&self) -> Result<Vec<AccountView>> {
        let accounts = self.store.list_all().await?;
        Ok(accounts.iter().map(AccountView::from).collect())
    }

    /// Partial update of a target account. The actor may touch only their
    /// own record unless they are an admin. A supplied password is
    /// re-hashed; absent fields stay untouched.
    pub async fn update_profile(
        &self,
        actor: &Account,
        target_id: Uuid,
        updates: UpdateAccountRequest,
    ) -> Result<AccountView> {
        let mut account = self
            .store
            .find_by_id(target_id)
            .await?
            .ok_or(AccountError::NotFound)?;

        if actor.id != account.id && !actor.is_admin() {
            return Err(AccountError::Forbidden);
        }

        if let Some(username) = updates.username {
            account.username = username;
        }
        if let Some(email) = updates.email {
            account.email = email;
        }
        if let Some(plain_password) = updates.password {
            account.password_hash = password::hash_password(&plain_password)?;
        }

        self.store.update(&account).await?;
        info!(account_id = %account.id, actor_id = %actor.id, "account updated");
        Ok(AccountView::from(account))
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<()> {
        // Surface NotFound before attempting the delete so the handler can
        // report it distinctly.
        if self.store.find_by_id(id).await?.is_none() {
            return Err(AccountError::NotFound);
        }
        self.store.delete(id).await?;
        info!(account_id = %id, "account deleted");
        Ok(())
    }
}
