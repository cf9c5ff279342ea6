//! Aggregate analytics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, permissions::Permission};

use super::AuthenticatedUser;

/// Library-wide analytics
#[derive(Serialize, ToSchema)]
pub struct AnalyticsResponse {
    /// Number of books in the catalog
    pub total_books: i64,
    /// Number of open borrow records
    pub active_borrow_count: i64,
    /// Book with the most borrow records of any status, if any exist
    pub most_borrowed: Option<MostBorrowed>,
}

#[derive(Serialize, ToSchema)]
pub struct MostBorrowed {
    /// Book title
    pub title: String,
    /// Total number of borrow records
    pub count: i64,
}

/// Get aggregate library analytics
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Library analytics", body = AnalyticsResponse),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn get_analytics(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AnalyticsResponse>> {
    claims.require(Permission::ViewAnalytics)?;

    let analytics = state.services.analytics.overview().await?;
    Ok(Json(analytics))
}
