//! One-time email verification codes.
//!
//! Codes are 6-digit numeric strings drawn uniformly from
//! [100000, 999999]. They come from `rand::thread_rng`, not a hardened
//! CSPRNG; the short expiry window bounds the exposure, and the numeric
//! format is load-bearing for whatever channel displays the code.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Outcome of checking a submitted code against stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Valid,
    Mismatch,
    Expired,
    NoPendingCode,
}

#[derive(Clone)]
pub struct VerificationCodes {
    ttl: Duration,
}

impl VerificationCodes {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Generate a fresh code together with its absolute expiry.
    pub fn generate(&self) -> (String, DateTime<Utc>) {
        let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();
        (code, Utc::now() + self.ttl)
    }

    /// Check a submitted code against the stored one.
    ///
    /// The precedence is contractual and user-observable: a wrong code
    /// reports `Mismatch` even when the stored code has also expired; only
    /// an exact match past its expiry reports `Expired`. A matching code
    /// with no recorded expiry is treated as expired.
    pub fn check(
        &self,
        submitted: &str,
        stored: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> CodeCheck {
        let stored = match stored {
            Some(code) => code,
            None => return CodeCheck::NoPendingCode,
        };

        if stored != submitted {
            return CodeCheck::Mismatch;
        }

        match expires_at {
            Some(expiry) if expiry >= now => CodeCheck::Valid,
            _ => CodeCheck::Expired,
        }
    }
}
