use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Lifecycle of a booking. Stored as uppercase strings; input is parsed
/// case-insensitively via [`BookingStatus::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "ONGOING")]
    Ongoing,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    pub const VALID: &'static [&'static str] = &[
        "PENDING",
        "CONFIRMED",
        "ONGOING",
        "COMPLETED",
        "CANCELLED",
        "REJECTED",
    ];

    /// Case-insensitive parse; `None` for anything outside the enumerated set.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "ONGOING" => Some(Self::Ongoing),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<DateTimeWithTimeZone>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::booking_cart_items::Entity")]
    BookingCartItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::booking_cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingCartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::BookingStatus;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BookingStatus::parse("completed"), Some(BookingStatus::Completed));
        assert_eq!(BookingStatus::parse("  Pending "), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("REJECTED"), Some(BookingStatus::Rejected));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(BookingStatus::parse("DONE"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for name in BookingStatus::VALID {
            let status = BookingStatus::parse(name).expect("valid name");
            assert_eq!(status.as_str(), *name);
        }
    }
}
