use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, Result};
use crate::models::{Account, NewAccount};
use crate::store::AccountStore;

/// In-process account store used by the test suite. A single `RwLock`
/// around the map gives the same per-record atomicity the Postgres store
/// gets from row-level statements.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backdate an account's creation time. Lets reaper tests age a record
    /// without sleeping.
    pub async fn backdate_created_at(&self, id: Uuid, created_at: DateTime<Utc>) {
        if let Some(account) = self.accounts.write().await.get_mut(&id) {
            account.created_at = created_at;
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email == account.email || a.username == account.username)
        {
            return Err(AccountError::Conflict);
        }

        let created = Account {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            is_verified: false,
            verification_code: account.verification_code,
            verification_code_expires_at: account.verification_code_expires_at,
            created_at: Utc::now(),
        };
        accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.id != account.id && (a.email == account.email || a.username == account.username))
        {
            return Err(AccountError::Conflict);
        }

        match accounts.get_mut(&account.id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(AccountError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        match self.accounts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AccountError::NotFound),
        }
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| a.created_at);
        Ok(all)
    }

    async fn list_unverified_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .filter(|a| !a.is_verified && a.created_at < cutoff)
            .cloned()
            .collect())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                account.is_verified = true;
                account.verification_code = None;
                account.verification_code_expires_at = None;
                Ok(())
            }
            None => Err(AccountError::NotFound),
        }
    }
}
