use anyhow::Context;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::types::{Account, Role};

/// Matches the original deployment's hashing parameters.
const BCRYPT_COST: u32 = 10;

/// Account persistence plus password verification.
#[derive(Clone)]
pub struct CredentialStore {
    db: SqlitePool,
}

impl CredentialStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Verifies an email/password pair and returns the matching account.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response never leaks whether an account exists; the two cases stay
    /// distinguishable in the debug log. bcrypt's verification recomputes the
    /// hash under the stored salt and compares the full digest, so the
    /// comparison cost does not depend on where the inputs differ.
    pub async fn verify(&self, email: &str, password: &str) -> AppResult<Account> {
        let Some(account) = self.find_by_email(email).await? else {
            tracing::debug!("login rejected: unknown email");
            return Err(bad_credentials());
        };
        let matches = bcrypt::verify(password, &account.password_hash)
            .context("bcrypt verification failed")?;
        if !matches {
            tracing::debug!(account_id = account.id, "login rejected: password mismatch");
            return Err(bad_credentials());
        }
        Ok(account)
    }

    /// Creates an account with a freshly salted password hash.
    ///
    /// Duplicate emails fail with Conflict. The read-before-insert gives the
    /// clean error; the unique index backstops the race between the check and
    /// the insert, and that violation maps to the same Conflict.
    pub async fn create(&self, email: &str, password: &str, role: Role) -> AppResult<Account> {
        if self.find_by_email(email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = bcrypt::hash(password, BCRYPT_COST)
            .context("bcrypt hashing failed")?;

        let result = sqlx::query(
            "INSERT INTO accounts (email, password_hash, role) VALUES (?, ?, ?)",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(role.as_str())
        .execute(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if db_err.message().contains("UNIQUE constraint failed") =>
            {
                duplicate_email()
            }
            _ => AppError::from(e),
        })?;

        let id = result.last_insert_rowid();
        tracing::info!(account_id = id, role = %role, "account registered");

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("account {} missing directly after insert", id))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(|r| account_from_row(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        row.map(|r| account_from_row(&r)).transpose()
    }
}

fn bad_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

fn duplicate_email() -> AppError {
    AppError::Conflict("Account with this email already exists".to_string())
}

fn account_from_row(row: &SqliteRow) -> AppResult<Account> {
    let role_str: String = row.try_get("role")?;
    let role = Role::parse(&role_str).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("unexpected role value in storage: {}", role_str))
    })?;
    Ok(Account {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        created_at: row.try_get("created_at")?,
    })
}
