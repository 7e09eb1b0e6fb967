//! Bearer token issuance and validation.
//!
//! Tokens are stateless HMAC-signed JWTs: validity is purely a function of
//! the signature and the embedded expiry. There is no revocation list, so
//! every authenticated request must re-fetch the account from the store
//! before acting on the claims (see `AccountService::current_account`).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AccountError, Result};

/// Fixed, typed claim set. An open-ended map would invite claim injection;
/// these four fields are the whole wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, as a string per JWT convention.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AccountError::InvalidToken)
    }
}

/// Issues and validates access tokens with a single process-wide secret,
/// loaded once at startup and never rotated at runtime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, algorithm: Algorithm, ttl: Duration) -> Self {
        let mut validation = Validation::new(algorithm);
        // Expiry is exact: a token is invalid the moment `exp` passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            ttl,
        }
    }

    /// Issue a token for the given account with the configured TTL.
    pub fn issue(&self, account_id: Uuid, email: &str) -> Result<String> {
        self.issue_with_ttl(account_id, email, self.ttl)
    }

    /// Issue a token with an explicit TTL. The absolute expiry is embedded
    /// in the signed payload.
    pub fn issue_with_ttl(&self, account_id: Uuid, email: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|_| AccountError::Internal("Failed to sign token".to_string()))
    }

    /// Verify signature and expiry.
    ///
    /// This path handles attacker-controlled input on every authenticated
    /// request; any failure comes back as an error value, never a panic.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AccountError::TokenExpired,
                _ => AccountError::InvalidToken,
            })
    }
}
