use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Cart, Service};

/// PATCH body for the staged cart: the staged set is replaced wholesale,
/// an empty array clears it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub service_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartWithServices {
    #[serde(flatten)]
    pub cart: Cart,
    pub services: Vec<Service>,
}

/// `cart` is `null` when the user has never touched their cart; absence
/// is not an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartPayload {
    pub cart: Option<CartWithServices>,
}
