//! Aggregate analytics service

use crate::{
    api::analytics::{AnalyticsResponse, MostBorrowed},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Library-wide aggregates: catalog size, open borrows, most borrowed book.
    /// "Most borrowed" counts records of any status; ties resolve to store order.
    pub async fn overview(&self) -> AppResult<AnalyticsResponse> {
        let total_books = self.repository.books.count().await?;
        let active_borrow_count = self.repository.borrows.count_active().await?;
        let most_borrowed = self
            .repository
            .borrows
            .most_borrowed()
            .await?
            .map(|row| MostBorrowed {
                title: row.title,
                count: row.borrow_count,
            });

        Ok(AnalyticsResponse {
            total_books,
            active_borrow_count,
            most_borrowed,
        })
    }

    /// Database probe for the readiness endpoint: catalog and borrow counts
    pub async fn store_counts(&self) -> AppResult<(i64, i64)> {
        let total_books = self.repository.books.count().await?;
        let total_borrows = self.repository.borrows.count_all().await?;
        Ok((total_books, total_borrows))
    }
}
