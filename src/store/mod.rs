//! Account persistence.
//!
//! The service core talks to storage through the [`AccountStore`] trait so
//! the lifecycle logic can run against Postgres in production and an
//! in-memory map in tests. Every mutation is a single call against one
//! record; isolation comes from the backing store's row-level atomicity,
//! not from in-process locking in the core.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, NewAccount};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. A duplicate email or username reports
    /// `AccountError::Conflict`.
    async fn create(&self, account: NewAccount) -> Result<Account>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Persist the full record. `AccountError::NotFound` if the row is gone.
    async fn update(&self, account: &Account) -> Result<()>;

    /// Delete by id. `AccountError::NotFound` if the row is gone.
    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<Account>>;

    /// Accounts still unverified whose creation predates `cutoff`; the
    /// reaper's sweep query.
    async fn list_unverified_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<Account>>;

    /// Atomically set `is_verified` and clear the pending code and expiry.
    /// No reader may observe the verified flag without the code cleared.
    async fn mark_verified(&self, id: Uuid) -> Result<()>;
}
