use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::double_option;
use crate::models::{BookingCartItem, Service};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingCartItemRequest {
    pub cart_id: Uuid,
    pub service_id: Uuid,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
}

/// PATCH body: omitted keys leave fields untouched, explicit `null`
/// clears them.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingCartItemRequest {
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
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithService {
    #[serde(flatten)]
    pub item: BookingCartItem,
    pub service: Option<Service>,
    /// The item's price override when set, otherwise the service's
    /// listed price.
    pub effective_price: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    pub booking_cart_items: Vec<ItemWithService>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub booking_cart_item: ItemWithService,
}
