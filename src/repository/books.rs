//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books.
    ///
    /// The free-text filter matches title, author, ISBN, or category; the
    /// category filter narrows further. Both are case-insensitive substring
    /// matches. Results come back newest first.
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR author ILIKE '%' || $1 || '%'
                   OR isbn ILIKE '%' || $1 || '%'
                   OR category ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.q.as_deref())
        .bind(query.category.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook, available_copies: i32) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                title, author, description, isbn, category,
                published_year, total_copies, available_copies
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.published_year)
        .bind(book.total_copies)
        .bind(available_copies)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing book; unset fields keep their current value
    pub async fn update(&self, id: Uuid, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                description = COALESCE($4, description),
                isbn = COALESCE($5, isbn),
                category = COALESCE($6, category),
                published_year = COALESCE($7, published_year),
                total_copies = COALESCE($8, total_copies),
                available_copies = COALESCE($9, available_copies),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(book.title.as_deref())
        .bind(book.author.as_deref())
        .bind(book.description.as_deref())
        .bind(book.isbn.as_deref())
        .bind(book.category.as_deref())
        .bind(book.published_year)
        .bind(book.total_copies)
        .bind(book.available_copies)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book. Returned borrow history cascades with it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
