//! Book (catalog) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book model from database.
///
/// `available_copies` is maintained by the circulation transactions and always
/// equals `total_copies` minus the number of open borrow records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    /// ISBN is expected to be globally unique but is not enforced unique
    pub isbn: String,
    pub category: String,
    pub published_year: i32,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
    pub published_year: i32,
    #[validate(range(min = 0, message = "total_copies must not be negative"))]
    pub total_copies: i32,
    /// Defaults to `total_copies` when omitted
    pub available_copies: Option<i32>,
}

/// Update book request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub published_year: Option<i32>,
    #[validate(range(min = 0, message = "total_copies must not be negative"))]
    pub total_copies: Option<i32>,
    #[validate(range(min = 0, message = "available_copies must not be negative"))]
    pub available_copies: Option<i32>,
}

/// Book search query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Matched case-insensitively against title, author, ISBN, or category
    pub q: Option<String>,
    /// Matched case-insensitively against category
    pub category: Option<String>,
}
