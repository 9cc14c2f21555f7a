use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::booking_cart_items::ItemWithService;
use crate::dto::double_option;
use crate::models::{Booking, User};
use crate::response::PageMeta;

/// Body for both booking-creation entry points. Any headline field
/// supplied here overrides the value aggregated from the cart items.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub booking_cart_item_ids: Vec<Uuid>,
    pub user_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    /// When present, the booking's line-item set is replaced wholesale:
    /// linked items missing from this list are detached, listed items are
    /// attached.
    pub booking_cart_item_ids: Option<Vec<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub user_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub service_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub scheduled_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub time_slot: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub price: Option<Option<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingWithUser {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: Option<User>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: Option<User>,
    pub booking_cart_items: Vec<ItemWithService>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPage {
    pub bookings: Vec<BookingWithUser>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserBookingList {
    pub bookings: Vec<BookingDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPayload {
    pub booking: BookingDetail,
}
