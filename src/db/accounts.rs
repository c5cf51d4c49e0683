//! Accounts repository
//!
//! An account holds the login email and password hash for exactly one user.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use super::sqlite_helpers::{get_datetime, is_unique_violation, now_iso8601};
use super::users::{CreateUser, USER_COLUMNS, UserRecord};

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub email: String,
    /// bcrypt hash, never the plaintext password
    pub password: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, SqliteRow> for AccountRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            user_id: row.try_get("user_id")?,
            created_at: get_datetime(row, "created_at")?,
            updated_at: get_datetime(row, "updated_at")?,
        })
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, password, user_id, created_at, updated_at";

pub struct AccountsRepository {
    pool: SqlitePool,
}

impl AccountsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user and its account atomically.
    ///
    /// Returns `None` when the email already belongs to a user or an account.
    /// The unique constraints decide this inside the transaction, so two
    /// concurrent sign-ups for one email cannot both succeed.
    pub async fn create_with_user(
        &self,
        password_hash: &str,
        user: CreateUser,
    ) -> Result<Option<(AccountRecord, UserRecord)>> {
        let now = now_iso8601();
        let mut tx = self.pool.begin().await?;

        // Dropping `tx` on an early return rolls back the partial insert
        let user_id = match sqlx::query(
            r#"
            INSERT INTO users (email, username, biography, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.biography)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        {
            Ok(result) => result.last_insert_rowid(),
            Err(e) if is_unique_violation(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let account_id = match sqlx::query(
            r#"
            INSERT INTO accounts (email, password, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(password_hash)
        .bind(user_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        {
            Ok(result) => result.last_insert_rowid(),
            Err(e) if is_unique_violation(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let account = sqlx::query_as::<_, AccountRecord>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((account, user)))
    }

    /// Get account by login email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
