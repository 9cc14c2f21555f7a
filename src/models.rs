use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;
use crate::entity::bookings::BookingStatus;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub normal_price: String,
    pub member_price: Option<String>,
    pub icon: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub service_id: Uuid,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
    pub booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::categories::Model> for Category {
    fn from(model: entity::categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::services::Model> for Service {
    fn from(model: entity::services::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            normal_price: model.normal_price,
            member_price: model.member_price,
            icon: model.icon,
            category_id: model.category_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::carts::Model> for Cart {
    fn from(model: entity::carts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::booking_cart_items::Model> for BookingCartItem {
    fn from(model: entity::booking_cart_items::Model) -> Self {
        Self {
            id: model.id,
            cart_id: model.cart_id,
            service_id: model.service_id,
            category_name: model.category_name,
            location: model.location,
            service_type: model.service_type,
            scheduled_date: model.scheduled_date.map(|dt| dt.with_timezone(&Utc)),
            time_slot: model.time_slot,
            price: model.price,
            booking_id: model.booking_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::bookings::Model> for Booking {
    fn from(model: entity::bookings::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category_name: model.category_name,
            location: model.location,
            service_type: model.service_type,
            scheduled_date: model.scheduled_date.map(|dt| dt.with_timezone(&Utc)),
            time_slot: model.time_slot,
            price: model.price,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
