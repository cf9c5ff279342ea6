//! Shared helpers for integration tests.
//!
//! Each test runs against its own database (provisioned by `#[sqlx::test]`,
//! with migrations from `./migrations` applied), so assertions on counts are
//! exact and tests never observe each other's data.

use sqlx::PgPool;
use uuid::Uuid;

use lectern_server::config::AuthConfig;
use lectern_server::models::book::{Book, CreateBook};
use lectern_server::models::user::{Role, User};
use lectern_server::repository::Repository;
use lectern_server::services::Services;

pub fn test_services(pool: PgPool) -> (Repository, Services) {
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone(), AuthConfig::default());
    (repository, services)
}

pub async fn create_user(repository: &Repository, name: &str, role: Role) -> User {
    let email = format!("{}-{}@example.org", name, Uuid::new_v4());
    repository
        .users
        .create(&email, None, name, role)
        .await
        .expect("Failed to create test user")
}

pub async fn create_book(repository: &Repository, title: &str, copies: i32) -> Book {
    create_book_with_available(repository, title, copies, copies).await
}

pub async fn create_book_with_available(
    repository: &Repository,
    title: &str,
    total_copies: i32,
    available_copies: i32,
) -> Book {
    let book = CreateBook {
        title: title.to_string(),
        author: "Test Author".to_string(),
        description: "A book used by the integration tests".to_string(),
        isbn: format!("978{}", &Uuid::new_v4().simple().to_string()[..10]),
        category: "Fiction".to_string(),
        published_year: 1990,
        total_copies,
        available_copies: Some(available_copies),
    };
    repository
        .books
        .create(&book, available_copies)
        .await
        .expect("Failed to create test book")
}

/// Assert that a book's available count equals its total minus its open records.
pub async fn assert_copies_consistent(pool: &PgPool, book_id: Uuid) {
    let (total, available): (i32, i32) =
        sqlx::query_as("SELECT total_copies, available_copies FROM books WHERE id = $1")
            .bind(book_id)
            .fetch_one(pool)
            .await
            .expect("Failed to read book copies");

    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM borrow_records WHERE book_id = $1 AND status = 'BORROWED'",
    )
    .bind(book_id)
    .fetch_one(pool)
    .await
    .expect("Failed to count open records");

    assert_eq!(
        available as i64,
        total as i64 - open,
        "available_copies must equal total_copies minus open borrow records"
    );
}
