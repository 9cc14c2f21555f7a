use sea_orm::entity::prelude::*;

/// Catalog entry. Prices are strings on the wire and in storage; a
/// `BookingCartItem` may override `normal_price` per scheduled instance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub normal_price: String,
    pub member_price: Option<String>,
    pub icon: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(has_many = "super::booking_cart_items::Entity")]
    BookingCartItems,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::booking_cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingCartItems.def()
    }
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_services::Relation::Carts.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cart_services::Relation::Services.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
