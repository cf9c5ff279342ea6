//! Borrow records repository: the circulation ledger.
//!
//! Checkout and check-in each run as a single transaction. The book row is
//! locked (`FOR UPDATE`) before any precondition is read, so the availability
//! check and the copy-count mutation form one atomic read-modify-write and
//! concurrent requests serialize on the row lock. On any precondition failure
//! the transaction is dropped and rolls back without side effects.

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, BorrowRecordDetails},
};

/// Most-borrowed book for analytics
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MostBorrowedRow {
    pub title: String,
    pub borrow_count: i64,
}

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check out a book for a user.
    ///
    /// Fails with NotFound when the book does not exist, Conflict when no
    /// copies are available or the user already holds an open record for this
    /// book. On success the available count is decremented and a new open
    /// record is returned, both in the same transaction.
    pub async fn checkout(&self, user_id: Uuid, book_id: Uuid) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let available: Option<i32> = sqlx::query_scalar(
            "SELECT available_copies FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let available = available
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if available <= 0 {
            return Err(AppError::Conflict("No copies available".to_string()));
        }

        let already_borrowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrow_records
                WHERE user_id = $1 AND book_id = $2 AND status = 'BORROWED'
            )
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            return Err(AppError::Conflict(
                "You already borrowed this book".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1, updated_at = now() WHERE id = $1",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (user_id, book_id)
            VALUES ($1, $2)
            RETURNING id, user_id, book_id, borrow_date, return_date, status
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Check a book back in for a user.
    ///
    /// Selects the most recently opened BORROWED record for the (user, book)
    /// pair; fails with BadRequest when there is none. The record is locked
    /// before the status transition, so a concurrent check-in of the same
    /// record observes RETURNED and fails instead of double-incrementing.
    pub async fn checkin(&self, user_id: Uuid, book_id: Uuid) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let record_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM borrow_records
            WHERE user_id = $1 AND book_id = $2 AND status = 'BORROWED'
            ORDER BY borrow_date DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let record_id = record_id
            .ok_or_else(|| AppError::BadRequest("No active borrow record found".to_string()))?;

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET status = 'RETURNED', return_date = now()
            WHERE id = $1
            RETURNING id, user_id, book_id, borrow_date, return_date, status
            "#,
        )
        .bind(record_id)
        .fetch_one(&mut *tx)
        .await?;

        // The increment is unconditional: it balances exactly one decrement.
        sqlx::query(
            "UPDATE books SET available_copies = available_copies + 1, updated_at = now() WHERE id = $1",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Full borrow history for a user, newest first, joined with book details
    pub async fn history_for_user(&self, user_id: Uuid) -> AppResult<Vec<BorrowRecordDetails>> {
        let records = sqlx::query_as::<_, BorrowRecordDetails>(
            r#"
            SELECT r.id, r.book_id, r.borrow_date, r.return_date, r.status,
                   b.title, b.author, b.category, b.isbn
            FROM borrow_records r
            JOIN books b ON b.id = r.book_id
            WHERE r.user_id = $1
            ORDER BY r.borrow_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Whether a book has any open borrow record
    pub async fn book_has_active(&self, book_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrow_records WHERE book_id = $1 AND status = 'BORROWED')",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Count open borrow records
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE status = 'BORROWED'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count all borrow records, any status
    pub async fn count_all(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The book with the most borrow records of any status.
    /// Ties resolve to whichever row the store returns first.
    pub async fn most_borrowed(&self) -> AppResult<Option<MostBorrowedRow>> {
        let row = sqlx::query_as::<_, MostBorrowedRow>(
            r#"
            SELECT b.title, COUNT(*) AS borrow_count
            FROM borrow_records r
            JOIN books b ON b.id = r.book_id
            GROUP BY b.id, b.title
            ORDER BY borrow_count DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
