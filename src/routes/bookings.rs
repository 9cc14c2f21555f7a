use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    conversion::{
        already_booked_ids, dedup_ids, headline_from_items, missing_ids, non_blank,
        parse_schedule_date, parse_status, shared_cart_id, sort_by_requested,
    },
    dto::bookings::{
        BookingDetail, BookingPage, BookingPayload, CreateBookingRequest, UpdateBookingRequest,
        UserBookingList,
    },
    error::{AppError, AppResult},
    response::ApiResponse,
    routes::params::BookingListQuery,
    services::{
        booking_cart_item_service, booking_service,
        booking_service::{BookingChanges, NewBooking},
        cart_service,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route(
            "/{id}",
            get(get_booking).patch(update_booking).delete(delete_booking),
        )
        .route("/user/{userId}", get(list_user_bookings))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("pageSize" = Option<String>, Query, description = "Page size, default 10, max 100"),
        ("search" = Option<String>, Query, description = "Free text across location, service type, category, user name and status"),
        ("userName" = Option<String>, Query, description = "Substring filter on the user's full name"),
        ("location" = Option<String>, Query, description = "Substring filter on location"),
        ("serviceType" = Option<String>, Query, description = "Substring filter on service type"),
        ("categoryName" = Option<String>, Query, description = "Substring filter on category name"),
        ("status" = Option<String>, Query, description = "Exact status match"),
        ("date" = Option<String>, Query, description = "Single day (YYYY-MM-DD)"),
        ("startDate" = Option<String>, Query, description = "Range start (YYYY-MM-DD), inclusive"),
        ("endDate" = Option<String>, Query, description = "Range end (YYYY-MM-DD), exclusive")
    ),
    responses(
        (status = 200, description = "Filtered, paginated bookings", body = ApiResponse<BookingPage>),
        (status = 400, description = "Invalid filter value"),
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingPage>>> {
    let page = booking_service::list_bookings(&state, query).await?;
    Ok(Json(ApiResponse::new("Bookings", page)))
}

/// Validate the cross-item invariants and aggregate the headline fields,
/// then hand the assembled booking to the service. Shared by
/// `POST /api/bookings` and `POST /api/booking-cart-items/bookings`.
async fn create_from_items(
    state: &AppState,
    payload: CreateBookingRequest,
) -> AppResult<BookingDetail> {
    let ids = dedup_ids(&payload.booking_cart_item_ids);
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one bookingCartItemId is required".into(),
        ));
    }

    let items = booking_cart_item_service::get_models_by_ids(&state.orm, &ids).await?;

    let missing = missing_ids(&ids, &items);
    if !missing.is_empty() {
        return Err(AppError::MissingCartItems {
            message: "Some booking cart items were not found".into(),
            missing_ids: missing,
        });
    }

    let booked = already_booked_ids(&items);
    if !booked.is_empty() {
        return Err(AppError::AlreadyBooked {
            message: "Some booking cart items already belong to a booking".into(),
            booked_ids: booked,
        });
    }

    let items = sort_by_requested(&ids, items);
    let cart_id = shared_cart_id(&items)?
        .ok_or_else(|| AppError::BadRequest("At least one bookingCartItemId is required".into()))?;

    let owner = cart_service::get_cart_owner(state, cart_id).await?;
    if let Some(user_id) = payload.user_id {
        if user_id != owner {
            return Err(AppError::BadRequest(
                "userId does not match the owner of the cart".into(),
            ));
        }
    }

    let status = match non_blank(payload.status) {
        Some(raw) => Some(parse_status(&raw)?),
        None => None,
    };
    let scheduled_date = match non_blank(payload.scheduled_date) {
        Some(raw) => Some(parse_schedule_date(&raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid scheduledDate '{raw}'"))
        })?),
        None => None,
    };

    // Per field: an explicit request value wins over the aggregate
    // derived from the items.
    let headline = headline_from_items(&items);
    let new = NewBooking {
        user_id: Some(payload.user_id.unwrap_or(owner)),
        category_name: non_blank(payload.category_name).or(headline.category_name),
        location: non_blank(payload.location).or(headline.location),
        service_type: non_blank(payload.service_type).or(headline.service_type),
        scheduled_date: scheduled_date.or(headline.scheduled_date),
        time_slot: non_blank(payload.time_slot).or(headline.time_slot),
        price: non_blank(payload.price).or(headline.price),
        status,
    };

    booking_service::create_booking(state, new, &ids).await
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created from cart items", body = ApiResponse<BookingPayload>),
        (status = 400, description = "Invariant violation (empty id list, already-booked items, mixed carts, owner mismatch, bad status)"),
        (status = 404, description = "Unknown booking cart item ids, listed in the body"),
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookingPayload>>)> {
    let booking = create_from_items(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Booking created", BookingPayload { booking })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with items and user", body = ApiResponse<BookingPayload>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingPayload>>> {
    let booking = booking_service::get_booking(&state, id).await?;
    Ok(Json(ApiResponse::new("OK", BookingPayload { booking })))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingPayload>),
        (status = 400, description = "Invalid status or date"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<ApiResponse<BookingPayload>>> {
    let status = match non_blank(payload.status) {
        Some(raw) => Some(parse_status(&raw)?),
        None => None,
    };
    let scheduled_date = match payload.scheduled_date {
        Some(inner) => match non_blank(inner) {
            Some(raw) => Some(Some(parse_schedule_date(&raw).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid scheduledDate '{raw}'"))
            })?)),
            None => Some(None),
        },
        None => None,
    };

    let changes = BookingChanges {
        user_id: payload.user_id,
        category_name: payload.category_name.map(non_blank),
        location: payload.location.map(non_blank),
        service_type: payload.service_type.map(non_blank),
        scheduled_date,
        time_slot: payload.time_slot.map(non_blank),
        price: payload.price.map(non_blank),
        status,
        booking_cart_item_ids: payload
            .booking_cart_item_ids
            .map(|ids| dedup_ids(&ids)),
    };

    let booking = booking_service::update_booking(&state, id, changes).await?;
    Ok(Json(ApiResponse::new("Booking updated", BookingPayload { booking })))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking and its items deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    booking_service::delete_booking(&state, id).await?;
    Ok(Json(ApiResponse::message_only("Booking deleted")))
}

#[utoipa::path(
    get,
    path = "/api/bookings/user/{userId}",
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's bookings, newest first", body = ApiResponse<UserBookingList>),
    ),
    tag = "Bookings"
)]
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserBookingList>>> {
    let bookings = booking_service::list_bookings_by_user(&state, user_id).await?;
    Ok(Json(ApiResponse::new("Bookings", bookings)))
}
