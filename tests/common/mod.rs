//! Shared fixtures: an AccountService wired to the in-memory store and a
//! notifier that records emitted verification codes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::Algorithm;
use tokio::sync::Mutex;

use account_service::notify::CodeNotifier;
use account_service::security::jwt::TokenIssuer;
use account_service::security::verification::VerificationCodes;
use account_service::services::AccountService;
use account_service::store::memory::MemoryAccountStore;
use account_service::store::AccountStore;

pub const TEST_SECRET: &str = "test-signing-secret";

/// Captures every code handed to the notification channel.
#[derive(Default)]
pub struct RecordingNotifier {
    emitted: Mutex<Vec<(String, String, DateTime<Utc>)>>,
}

impl RecordingNotifier {
    pub async fn last_code_for(&self, email: &str) -> Option<String> {
        self.emitted
            .lock()
            .await
            .iter()
            .rev()
            .find(|(e, _, _)| e == email)
            .map(|(_, code, _)| code.clone())
    }
}

#[async_trait]
impl CodeNotifier for RecordingNotifier {
    async fn emit_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        self.emitted
            .lock()
            .await
            .push((email.to_string(), code.to_string(), expires_at));
        Ok(())
    }
}

pub struct TestHarness {
    pub service: AccountService,
    pub store: Arc<MemoryAccountStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness() -> TestHarness {
    harness_with(Duration::minutes(10), Duration::minutes(30))
}

pub fn harness_with(code_ttl: Duration, token_ttl: Duration) -> TestHarness {
    let store = Arc::new(MemoryAccountStore::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let store_dyn: Arc<dyn AccountStore> = store.clone();
    let service = AccountService::new(
        store_dyn,
        TokenIssuer::new(TEST_SECRET, Algorithm::HS256, token_ttl),
        VerificationCodes::new(code_ttl),
        notifier.clone(),
    );

    TestHarness {
        service,
        store,
        notifier,
    }
}
