//! Circulation service: checkout, check-in, and borrow history

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::borrow::{BorrowRecord, BorrowRecordDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check out a book for a user
    pub async fn checkout(&self, user_id: Uuid, book_id: Uuid) -> AppResult<BorrowRecord> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.checkout(user_id, book_id).await
    }

    /// Check a borrowed book back in
    pub async fn checkin(&self, user_id: Uuid, book_id: Uuid) -> AppResult<BorrowRecord> {
        self.repository.borrows.checkin(user_id, book_id).await
    }

    /// Get a user's full borrow history, newest first
    pub async fn history(&self, user_id: Uuid) -> AppResult<Vec<BorrowRecordDetails>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.history_for_user(user_id).await
    }
}
