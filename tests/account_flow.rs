//! End-to-end lifecycle tests: registration, verification, login, profile
//! mutation and the authorization matrix, driven through the service
//! against the in-memory store.

mod common;

use account_service::error::AccountError;
use account_service::models::{Role, UpdateAccountRequest};
use account_service::store::AccountStore;
use chrono::Duration;
use common::{harness, harness_with};

#[tokio::test]
async fn register_verify_login_flow() {
    let h = harness();

    let view = h
        .service
        .register("alice", "alice@x.com", "secret1")
        .await
        .unwrap();
    assert_eq!(view.username, "alice");
    assert_eq!(view.role, Role::User);
    assert!(!view.is_verified);

    // A 6-digit code was handed to the notification channel.
    let code = h.notifier.last_code_for("alice@x.com").await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    // Wrong code is rejected as invalid, not expired.
    let wrong = if code == "000000" { "111111" } else { "000000" };
    assert!(matches!(
        h.service.verify("alice@x.com", wrong).await,
        Err(AccountError::InvalidCode)
    ));

    // Correct code verifies the account and clears the pending state.
    h.service.verify("alice@x.com", &code).await.unwrap();
    let stored = h.store.find_by_email("alice@x.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert!(stored.verification_code.is_none());
    assert!(stored.verification_code_expires_at.is_none());

    // Verification is one-shot: resubmitting the same correct code reports
    // AlreadyVerified, not InvalidCode.
    assert!(matches!(
        h.service.verify("alice@x.com", &code).await,
        Err(AccountError::AlreadyVerified)
    ));

    // Login issues a token that resolves back to the account.
    let token = h
        .service
        .authenticate("alice@x.com", "secret1")
        .await
        .unwrap();
    let account = h.service.current_account(&token).await.unwrap();
    assert_eq!(account.email, "alice@x.com");
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let h = harness();
    h.service
        .register("alice", "alice@x.com", "secret1")
        .await
        .unwrap();

    let wrong_password = h.service.authenticate("alice@x.com", "nope").await;
    let unknown_email = h.service.authenticate("nobody@x.com", "secret1").await;

    assert!(matches!(wrong_password, Err(AccountError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AccountError::InvalidCredentials)));
}

#[tokio::test]
async fn login_does_not_require_verification() {
    let h = harness();
    h.service
        .register("bob", "bob@x.com", "secret1")
        .await
        .unwrap();

    // Never verified, login still succeeds: independent gates.
    assert!(h.service.authenticate("bob@x.com", "secret1").await.is_ok());
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let h = harness();
    h.service
        .register("alice", "alice@x.com", "secret1")
        .await
        .unwrap();

    assert!(matches!(
        h.service.register("alice2", "alice@x.com", "secret2").await,
        Err(AccountError::Conflict)
    ));
}

#[tokio::test]
async fn verify_unknown_email_is_not_found() {
    let h = harness();
    assert!(matches!(
        h.service.verify("ghost@x.com", "123456").await,
        Err(AccountError::NotFound)
    ));
}

#[tokio::test]
async fn expired_code_ordering() {
    // Codes are born expired with a negative TTL.
    let h = harness_with(Duration::seconds(-60), Duration::minutes(30));
    h.service
        .register("carol", "carol@x.com", "secret1")
        .await
        .unwrap();
    let code = h.notifier.last_code_for("carol@x.com").await.unwrap();

    // Mismatch is reported before expiry is even considered.
    let wrong = if code == "000000" { "111111" } else { "000000" };
    assert!(matches!(
        h.service.verify("carol@x.com", wrong).await,
        Err(AccountError::InvalidCode)
    ));

    // Only the exact-match expired code reports CodeExpired.
    assert!(matches!(
        h.service.verify("carol@x.com", &code).await,
        Err(AccountError::CodeExpired)
    ));
}

#[tokio::test]
async fn token_outlives_account_but_request_fails() {
    let h = harness();
    let view = h
        .service
        .register("dave", "dave@x.com", "secret1")
        .await
        .unwrap();
    let token = h
        .service
        .authenticate("dave@x.com", "secret1")
        .await
        .unwrap();

    // Delete the account while the token is still within its window.
    h.store.delete(view.id).await.unwrap();

    assert!(matches!(
        h.service.current_account(&token).await,
        Err(AccountError::NotFound)
    ));
}

#[tokio::test]
async fn expired_token_is_rejected_on_request() {
    let h = harness_with(Duration::minutes(10), Duration::seconds(-5));
    h.service
        .register("erin", "erin@x.com", "secret1")
        .await
        .unwrap();
    let token = h
        .service
        .authenticate("erin@x.com", "secret1")
        .await
        .unwrap();

    assert!(matches!(
        h.service.current_account(&token).await,
        Err(AccountError::TokenExpired)
    ));
}

#[tokio::test]
async fn update_profile_authorization_matrix() {
    let h = harness();
    let a = h
        .service
        .register("usera", "a@x.com", "secret1")
        .await
        .unwrap();
    let b = h
        .service
        .register("userb", "b@x.com", "secret1")
        .await
        .unwrap();

    let actor_a = h.store.find_by_id(a.id).await.unwrap().unwrap();

    // Non-admin touching someone else's record is forbidden.
    let updates = UpdateAccountRequest {
        username: Some("hijacked".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        h.service.update_profile(&actor_a, b.id, updates).await,
        Err(AccountError::Forbidden)
    ));

    // Self-update is allowed.
    let updates = UpdateAccountRequest {
        username: Some("usera2".to_string()),
        ..Default::default()
    };
    let view = h
        .service
        .update_profile(&actor_a, a.id, updates)
        .await
        .unwrap();
    assert_eq!(view.username, "usera2");

    // Promote A to admin; cross-account update now succeeds.
    let mut admin = h.store.find_by_id(a.id).await.unwrap().unwrap();
    admin.role = Role::Admin;
    h.store.update(&admin).await.unwrap();

    let updates = UpdateAccountRequest {
        username: Some("renamed-by-admin".to_string()),
        ..Default::default()
    };
    let view = h
        .service
        .update_profile(&admin, b.id, updates)
        .await
        .unwrap();
    assert_eq!(view.username, "renamed-by-admin");
}

#[tokio::test]
async fn password_update_is_rehashed() {
    let h = harness();
    let a = h
        .service
        .register("frank", "frank@x.com", "oldpass1")
        .await
        .unwrap();
    let actor = h.store.find_by_id(a.id).await.unwrap().unwrap();

    let updates = UpdateAccountRequest {
        password: Some("newpass1".to_string()),
        ..Default::default()
    };
    h.service.update_profile(&actor, a.id, updates).await.unwrap();

    // The stored value is a hash, not the plaintext.
    let stored = h.store.find_by_id(a.id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "newpass1");

    assert!(h
        .service
        .authenticate("frank@x.com", "newpass1")
        .await
        .is_ok());
    assert!(matches!(
        h.service.authenticate("frank@x.com", "oldpass1").await,
        Err(AccountError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn absent_fields_are_left_untouched() {
    let h = harness();
    let a = h
        .service
        .register("grace", "grace@x.com", "secret1")
        .await
        .unwrap();
    let actor = h.store.find_by_id(a.id).await.unwrap().unwrap();

    h.service
        .update_profile(&actor, a.id, UpdateAccountRequest::default())
        .await
        .unwrap();

    let stored = h.store.find_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "grace");
    assert_eq!(stored.email, "grace@x.com");
    assert!(h
        .service
        .authenticate("grace@x.com", "secret1")
        .await
        .is_ok());
}
