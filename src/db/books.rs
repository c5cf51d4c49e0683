//! Books repository
//!
//! Book titles are unique, and updates are addressed by title.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
    pub page_count: Option<String>,
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
    pub page_count: Option<String>,
    pub volume: Option<String>,
}

/// Replacement values for every field except the title
#[derive(Debug, Clone, Default)]
pub struct UpdateBook {
    pub author: String,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
    pub page_count: Option<String>,
    pub volume: Option<String>,
}

const BOOK_COLUMNS: &str = "id, title, author, publisher, release_date, page_count, volume";

pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, book: CreateBook) -> Result<BookRecord> {
        let id = sqlx::query(
            r#"
            INSERT INTO books (title, author, publisher, release_date, page_count, volume)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(&book.release_date)
        .bind(&book.page_count)
        .bind(&book.volume)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create book"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE title = ?"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<BookRecord>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Update the book with this title. Returns `None` if no such book exists.
    pub async fn update_by_title(&self, title: &str, input: UpdateBook) -> Result<Option<BookRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET author = ?, publisher = ?, release_date = ?, page_count = ?, volume = ?
            WHERE title = ?
            "#,
        )
        .bind(&input.author)
        .bind(&input.publisher)
        .bind(&input.release_date)
        .bind(&input.page_count)
        .bind(&input.volume)
        .bind(title)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_title(title).await
    }

    /// Delete a book, returning the removed row
    pub async fn delete(&self, id: i64) -> Result<Option<BookRecord>> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(existing))
    }
}
