//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, auth, books, borrows, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "1.0.0",
        description = "Library Circulation Server REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrows
        borrows::checkout,
        borrows::checkin,
        borrows::history,
        // Users
        users::create_user,
        users::get_user_borrows,
        // Analytics
        analytics::get_analytics,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookQuery,
            // Borrows
            borrows::BorrowRequest,
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowRecordDetails,
            crate::models::borrow::BorrowStatus,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::Role,
            // Analytics
            analytics::AnalyticsResponse,
            analytics::MostBorrowed,
            // Health
            health::HealthResponse,
            health::ReadyResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "borrows", description = "Circulation: checkout and check-in"),
        (name = "users", description = "User management"),
        (name = "analytics", description = "Aggregate statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
