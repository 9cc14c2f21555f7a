use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::services::CategoryList,
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories with their services", body = ApiResponse<CategoryList>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(ApiResponse::new("Categories", categories)))
}
