use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod booking_cart_items;
pub mod bookings;
pub mod cart;
pub mod categories;
pub mod doc;
pub mod health;
pub mod params;
pub mod services;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/bookings", bookings::router())
        .nest("/booking-cart-items", booking_cart_items::router())
        .nest("/cart", cart::router())
        .nest("/services", services::router())
        .nest("/categories", categories::router())
        .nest("/admin", admin::router())
}
