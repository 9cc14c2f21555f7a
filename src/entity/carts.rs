use sea_orm::entity::prelude::*;

/// One cart per user (unique constraint on `user_id`), created lazily on
/// the first cart mutation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
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

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_services::Relation::Services.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cart_services::Relation::Carts.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
