use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::cart::{CartPayload, UpdateCartRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{userId}", get(get_cart).patch(update_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart/{userId}",
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's staged cart; `cart` is null when none exists", body = ApiResponse<CartPayload>),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartPayload>>> {
    let cart = cart_service::get_cart(&state, user_id).await?;
    Ok(Json(ApiResponse::new("OK", cart)))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{userId}",
    params(("userId" = Uuid, Path, description = "User ID")),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Staged services replaced; an empty array clears the cart", body = ApiResponse<CartPayload>),
        (status = 404, description = "User not found"),
    ),
    tag = "Cart"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateCartRequest>,
) -> AppResult<Json<ApiResponse<CartPayload>>> {
    let cart = if payload.service_ids.is_empty() {
        cart_service::clear_cart(&state, user_id).await?
    } else {
        cart_service::update_cart(&state, user_id, &payload.service_ids).await?
    };
    Ok(Json(ApiResponse::new("Cart updated", cart)))
}
