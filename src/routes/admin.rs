use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::admin::{DashboardMetrics, TrendingReport},
    error::AppResult,
    response::ApiResponse,
    routes::params::TrendingQuery,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/trending-services", get(trending_services))
}

#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    responses(
        (status = 200, description = "Dashboard totals, per-status counts and completed revenue", body = ApiResponse<DashboardMetrics>),
    ),
    tag = "Admin"
)]
pub async fn metrics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardMetrics>>> {
    let metrics = admin_service::metrics(&state).await?;
    Ok(Json(ApiResponse::new("Metrics", metrics)))
}

#[utoipa::path(
    get,
    path = "/api/admin/trending-services",
    params(
        ("days" = Option<i64>, Query, description = "Trailing window in days, default 30, max 365"),
        ("limit" = Option<i64>, Query, description = "Number of services, default 5, max 20")
    ),
    responses(
        (status = 200, description = "Top services by booked line items", body = ApiResponse<TrendingReport>),
    ),
    tag = "Admin"
)]
pub async fn trending_services(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> AppResult<Json<ApiResponse<TrendingReport>>> {
    let (days, limit) = query.normalize();
    let report = admin_service::trending_services(&state, days, limit).await?;
    Ok(Json(ApiResponse::new("Trending services", report)))
}
