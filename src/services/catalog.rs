//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book. Available copies default to the total.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let available = book.available_copies.unwrap_or(book.total_copies);
        if available < 0 || available > book.total_copies {
            return Err(AppError::Validation(
                "available_copies must be between 0 and total_copies".to_string(),
            ));
        }
        self.repository.books.create(&book, available).await
    }

    /// Update an existing book.
    /// Copy counts may be corrected here, but never into an inconsistent state.
    pub async fn update_book(&self, id: Uuid, book: UpdateBook) -> AppResult<Book> {
        let current = self.repository.books.get_by_id(id).await?;

        let total = book.total_copies.unwrap_or(current.total_copies);
        let available = book.available_copies.unwrap_or(current.available_copies);
        if total < 0 {
            return Err(AppError::Validation(
                "total_copies must not be negative".to_string(),
            ));
        }
        if available < 0 || available > total {
            return Err(AppError::Validation(
                "available_copies must be between 0 and total_copies".to_string(),
            ));
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Refused while any copy is still out.
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;

        if self.repository.borrows.book_has_active(id).await? {
            return Err(AppError::Conflict(
                "Book has outstanding borrows".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }
}
