//! Circulation endpoints: checkout, check-in, borrow history

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::borrow::{BorrowRecord, BorrowRecordDetails},
    permissions::Permission,
};

use super::AuthenticatedUser;

/// Checkout / check-in request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Book ID
    pub book_id: Uuid,
}

/// Check out a book for the authenticated user
#[utoipa::path(
    post,
    path = "/borrows/checkout",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book checked out", body = BorrowRecord),
        (status = 404, description = "Book not found"),
        (status = 409, description = "No copies available or already borrowed")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowRecord>)> {
    claims.require(Permission::BookCheckout)?;

    let record = state
        .services
        .circulation
        .checkout(claims.user_id, request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Check a borrowed book back in for the authenticated user
#[utoipa::path(
    post,
    path = "/borrows/checkin",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book checked in", body = BorrowRecord),
        (status = 400, description = "No active borrow record")
    )
)]
pub async fn checkin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowRequest>,
) -> AppResult<Json<BorrowRecord>> {
    claims.require(Permission::BookCheckin)?;

    let record = state
        .services
        .circulation
        .checkin(claims.user_id, request.book_id)
        .await?;

    Ok(Json(record))
}

/// Get the authenticated user's borrow history
#[utoipa::path(
    get,
    path = "/borrows/history",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow history, newest first", body = Vec<BorrowRecordDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRecordDetails>>> {
    let records = state.services.circulation.history(claims.user_id).await?;
    Ok(Json(records))
}
