use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AccountError, Result};
use crate::models::{Account, NewAccount};
use crate::store::AccountStore;

/// Postgres-backed account store. Single-statement reads and writes; the
/// row is the unit of atomicity.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> AccountError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AccountError::Conflict,
        _ => AccountError::Database(err.to_string()),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts
                (id, username, email, password_hash, role, is_verified,
                 verification_code, verification_code_expires_at, created_at)
            VALUES (gen_random_uuid(), $1, $2, $3, $4, false, $5, $6, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(&account.verification_code)
        .bind(account.verification_code_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT * FROM accounts WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT * FROM accounts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = $1,
                email = $2,
                password_hash = $3,
                role = $4,
                is_verified = $5,
                verification_code = $6,
                verification_code_expires_at = $7
            WHERE id = $8
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(account.is_verified)
        .bind(&account.verification_code)
        .bind(account.verification_code_expires_at)
        .bind(account.id)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT * FROM accounts ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn list_unverified_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT * FROM accounts
            WHERE is_verified = false AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<()> {
        // One statement: the verified flag and the code fields change
        // together or not at all.
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET is_verified = true,
                verification_code = NULL,
                verification_code_expires_at = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound);
        }
        Ok(())
    }
}
