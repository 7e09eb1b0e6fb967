//! Verification-code delivery.
//!
//! Fire-and-forget: a delivery failure is logged and never fails the
//! registration that triggered it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

#[async_trait]
pub trait CodeNotifier: Send + Sync {
    async fn emit_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}

/// Writes the code to the service log. Stands in for an email/SMS channel
/// in development and matches the original console delivery.
pub struct LogNotifier;

#[async_trait]
impl CodeNotifier for LogNotifier {
    async fn emit_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        info!(email = %email, code = %code, expires_at = %expires_at, "verification code issued");
        Ok(())
    }
}
