use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::booking_cart_items::{
        CreateBookingCartItemRequest, ItemList, ItemPayload, UpdateBookingCartItemRequest,
    },
    error::AppResult,
    response::ApiResponse,
    services::booking_cart_item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", axum::routing::patch(update_item).delete(delete_item))
        // Alternate booking-creation entry point; same checks and
        // aggregation as POST /api/bookings.
        .route("/bookings", post(super::bookings::create_booking))
}

#[utoipa::path(
    get,
    path = "/api/booking-cart-items",
    responses(
        (status = 200, description = "All unbooked cart items, newest first", body = ApiResponse<ItemList>),
    ),
    tag = "BookingCartItems"
)]
pub async fn list_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let items = booking_cart_item_service::list_unbooked(&state).await?;
    Ok(Json(ApiResponse::new("Booking cart items", items)))
}

#[utoipa::path(
    post,
    path = "/api/booking-cart-items",
    request_body = CreateBookingCartItemRequest,
    responses(
        (status = 201, description = "Cart item created", body = ApiResponse<ItemPayload>),
        (status = 400, description = "Invalid scheduledDate"),
        (status = 404, description = "Cart or service not found"),
    ),
    tag = "BookingCartItems"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingCartItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ItemPayload>>)> {
    let item = booking_cart_item_service::create_item(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Booking cart item created",
            ItemPayload {
                booking_cart_item: item,
            },
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/booking-cart-items/{id}",
    params(("id" = Uuid, Path, description = "Booking cart item ID")),
    request_body = UpdateBookingCartItemRequest,
    responses(
        (status = 200, description = "Cart item updated; omitted keys are untouched, nulls clear", body = ApiResponse<ItemPayload>),
        (status = 404, description = "Not Found"),
    ),
    tag = "BookingCartItems"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingCartItemRequest>,
) -> AppResult<Json<ApiResponse<ItemPayload>>> {
    let item = booking_cart_item_service::update_item(&state, id, payload).await?;
    Ok(Json(ApiResponse::new(
        "Booking cart item updated",
        ItemPayload {
            booking_cart_item: item,
        },
    )))
}

#[utoipa::path(
    delete,
    path = "/api/booking-cart-items/{id}",
    params(("id" = Uuid, Path, description = "Booking cart item ID")),
    responses(
        (status = 200, description = "Cart item deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found"),
    ),
    tag = "BookingCartItems"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    booking_cart_item_service::delete_item(&state, id).await?;
    Ok(Json(ApiResponse::message_only("Booking cart item deleted")))
}
