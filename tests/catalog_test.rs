//! Integration tests for catalog search, book mutation, and deletion policy.

mod common;

use sqlx::PgPool;
use uuid::Uuid;

use common::{create_book, create_user, test_services};
use lectern_server::error::AppError;
use lectern_server::models::book::{BookQuery, CreateBook, UpdateBook};
use lectern_server::models::user::Role;

fn query(q: Option<&str>, category: Option<&str>) -> BookQuery {
    BookQuery {
        q: q.map(String::from),
        category: category.map(String::from),
    }
}

fn sample_book(title: &str, author: &str, isbn: &str, category: &str) -> CreateBook {
    CreateBook {
        title: title.to_string(),
        author: author.to_string(),
        description: format!("{} by {}", title, author),
        isbn: isbn.to_string(),
        category: category.to_string(),
        published_year: 1949,
        total_copies: 5,
        available_copies: None,
    }
}

#[sqlx::test]
async fn search_matches_title_author_isbn_and_category(pool: PgPool) {
    let (_, services) = test_services(pool);
    services
        .catalog
        .create_book(sample_book("1984", "George Orwell", "9780451524935", "Fiction"))
        .await
        .unwrap();
    services
        .catalog
        .create_book(sample_book(
            "The Pragmatic Programmer",
            "Andrew Hunt",
            "9780201616224",
            "Software",
        ))
        .await
        .unwrap();

    // Title
    let hits = services.catalog.search_books(&query(Some("1984"), None)).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "1984");

    // Author, case-insensitive
    let hits = services.catalog.search_books(&query(Some("orwell"), None)).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "1984");

    // ISBN substring
    let hits = services
        .catalog
        .search_books(&query(Some("0201616"), None))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "The Pragmatic Programmer");

    // Category through the free-text filter
    let hits = services
        .catalog
        .search_books(&query(Some("software"), None))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);

    // No match
    let hits = services
        .catalog
        .search_books(&query(Some("dosadi"), None))
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[sqlx::test]
async fn search_category_filter_is_case_insensitive_and_narrows_text(pool: PgPool) {
    let (_, services) = test_services(pool);
    services
        .catalog
        .create_book(sample_book("1984", "George Orwell", "9780451524935", "Fiction"))
        .await
        .unwrap();
    services
        .catalog
        .create_book(sample_book("Animal Farm", "George Orwell", "9780452284241", "Fiction"))
        .await
        .unwrap();
    services
        .catalog
        .create_book(sample_book(
            "Orwell: A Life",
            "Bernard Crick",
            "9780140058567",
            "Biography",
        ))
        .await
        .unwrap();

    let hits = services
        .catalog
        .search_books(&query(None, Some("FICTION")))
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    // Text and category combine with AND
    let hits = services
        .catalog
        .search_books(&query(Some("orwell"), Some("fiction")))
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|b| b.category == "Fiction"));
}

#[sqlx::test]
async fn search_returns_newest_first(pool: PgPool) {
    let (repository, services) = test_services(pool);
    // Spaced out so created_at timestamps are strictly ordered
    create_book(&repository, "First", 1).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_book(&repository, "Second", 1).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_book(&repository, "Third", 1).await;

    let hits = services.catalog.search_books(&BookQuery::default()).await.unwrap();

    assert_eq!(hits.len(), 3);
    let titles: Vec<&str> = hits.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Third", "Second", "First"]);
}

#[sqlx::test]
async fn create_defaults_available_copies_to_total(pool: PgPool) {
    let (_, services) = test_services(pool);

    let book = services
        .catalog
        .create_book(sample_book("1984", "George Orwell", "9780451524935", "Fiction"))
        .await
        .unwrap();

    assert_eq!(book.total_copies, 5);
    assert_eq!(book.available_copies, 5);
}

#[sqlx::test]
async fn create_rejects_available_above_total(pool: PgPool) {
    let (_, services) = test_services(pool);

    let mut book = sample_book("1984", "George Orwell", "9780451524935", "Fiction");
    book.available_copies = Some(7);

    let err = services.catalog.create_book(book).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test]
async fn update_changes_only_provided_fields(pool: PgPool) {
    let (_, services) = test_services(pool.clone());
    let book = services
        .catalog
        .create_book(sample_book("1984", "George Orwell", "9780451524935", "Fiction"))
        .await
        .unwrap();

    let updated = services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                description: Some("Revised description".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "1984");
    assert_eq!(updated.author, "George Orwell");
    assert_eq!(updated.description, "Revised description");
    assert_eq!(updated.total_copies, 5);
    assert!(updated.updated_at >= book.updated_at);
}

#[sqlx::test]
async fn update_rejects_inconsistent_copy_counts(pool: PgPool) {
    let (_, services) = test_services(pool);
    let book = services
        .catalog
        .create_book(sample_book("1984", "George Orwell", "9780451524935", "Fiction"))
        .await
        .unwrap();

    // Shrinking the total below the available count is inconsistent
    let err = services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                total_copies: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Both may change together
    let updated = services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                total_copies: Some(2),
                available_copies: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_copies, 2);
    assert_eq!(updated.available_copies, 2);
}

#[sqlx::test]
async fn update_unknown_book_is_not_found(pool: PgPool) {
    let (_, services) = test_services(pool);

    let err = services
        .catalog
        .update_book(Uuid::new_v4(), UpdateBook::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn delete_is_blocked_while_a_copy_is_out(pool: PgPool) {
    let (repository, services) = test_services(pool.clone());
    let user = create_user(&repository, "reader", Role::Member).await;
    let book = create_book(&repository, "Lord of the Flies", 2).await;

    services.circulation.checkout(user.id, book.id).await.unwrap();

    let err = services.catalog.delete_book(book.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // After check-in the book can go, taking its history with it
    services.circulation.checkin(user.id, book.id).await.unwrap();
    services.catalog.delete_book(book.id).await.unwrap();

    let err = services.catalog.get_book(book.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE book_id = $1")
        .bind(book.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphaned, 0);
}

#[sqlx::test]
async fn delete_unknown_book_is_not_found(pool: PgPool) {
    let (_, services) = test_services(pool);

    let err = services.catalog.delete_book(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
