//! Integration tests for user management and password authentication.

mod common;

use sqlx::PgPool;

use common::test_services;
use lectern_server::config::BootstrapConfig;
use lectern_server::error::AppError;
use lectern_server::models::user::{CreateUser, Role, UserClaims};

fn new_user(email: &str, password: Option<&str>, role: Option<Role>) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: password.map(String::from),
        name: "Test User".to_string(),
        role,
    }
}

#[sqlx::test]
async fn authenticate_returns_verifiable_token(pool: PgPool) {
    let (_, services) = test_services(pool);
    let created = services
        .users
        .create_user(new_user(
            "librarian@example.org",
            Some("correct horse battery"),
            Some(Role::Librarian),
        ))
        .await
        .unwrap();

    let (token, user) = services
        .users
        .authenticate("librarian@example.org", "correct horse battery")
        .await
        .unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(user.role, Role::Librarian);

    // The token carries the user id and role and verifies against the secret
    let claims = UserClaims::from_token(&token, "change-this-secret-in-production").unwrap();
    assert_eq!(claims.user_id, created.id);
    assert_eq!(claims.role, Role::Librarian);
    assert_eq!(claims.sub, "librarian@example.org");
}

#[sqlx::test]
async fn authenticate_rejects_bad_credentials_uniformly(pool: PgPool) {
    let (_, services) = test_services(pool);
    services
        .users
        .create_user(new_user("reader@example.org", Some("right-password"), None))
        .await
        .unwrap();

    // Wrong password and unknown email fail the same way
    let err = services
        .users
        .authenticate("reader@example.org", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));

    let err = services
        .users
        .authenticate("nobody@example.org", "right-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[sqlx::test]
async fn accounts_without_credentials_cannot_password_login(pool: PgPool) {
    let (_, services) = test_services(pool);
    services
        .users
        .create_user(new_user("sso-only@example.org", None, None))
        .await
        .unwrap();

    let err = services
        .users
        .authenticate("sso-only@example.org", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[sqlx::test]
async fn duplicate_email_is_conflict(pool: PgPool) {
    let (_, services) = test_services(pool);
    services
        .users
        .create_user(new_user("reader@example.org", None, None))
        .await
        .unwrap();

    let err = services
        .users
        .create_user(new_user("reader@example.org", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test]
async fn role_defaults_to_member(pool: PgPool) {
    let (_, services) = test_services(pool);
    let user = services
        .users
        .create_user(new_user("reader@example.org", None, None))
        .await
        .unwrap();
    assert_eq!(user.role, Role::Member);
}

#[sqlx::test]
async fn bootstrap_creates_admin_once(pool: PgPool) {
    let (_, services) = test_services(pool);
    let bootstrap = BootstrapConfig {
        admin_email: "admin@example.org".to_string(),
        admin_name: "Administrator".to_string(),
        admin_password: "first-run-password".to_string(),
    };

    let admin = services
        .users
        .bootstrap_admin(&bootstrap)
        .await
        .unwrap()
        .expect("admin created on empty table");
    assert_eq!(admin.role, Role::Admin);

    // A second run is a no-op
    assert!(services.users.bootstrap_admin(&bootstrap).await.unwrap().is_none());

    // And the account works
    let (_, user) = services
        .users
        .authenticate("admin@example.org", "first-run-password")
        .await
        .unwrap();
    assert_eq!(user.id, admin.id);
}

#[sqlx::test]
async fn bootstrap_disabled_without_password(pool: PgPool) {
    let (_, services) = test_services(pool);

    let result = services
        .users
        .bootstrap_admin(&BootstrapConfig::default())
        .await
        .unwrap();
    assert!(result.is_none());
}
