use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    conversion::{effective_price, non_blank, parse_schedule_date},
    dto::booking_cart_items::{
        CreateBookingCartItemRequest, ItemList, ItemWithService, UpdateBookingCartItemRequest,
    },
    entity::{
        booking_cart_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as Items, Model as ItemModel,
        },
        carts::Entity as Carts,
        services::{Entity as Services, Model as ServiceModel},
    },
    error::{AppError, AppResult},
    state::AppState,
};

fn with_service(item: ItemModel, service: Option<ServiceModel>) -> ItemWithService {
    let effective_price = effective_price(&item, service.as_ref());
    ItemWithService {
        item: item.into(),
        service: service.map(Into::into),
        effective_price,
    }
}

/// Every item still in a cart (`booking_id IS NULL`), across all users,
/// newest first.
pub async fn list_unbooked(state: &AppState) -> AppResult<ItemList> {
    let rows = Items::find()
        .filter(ItemCol::BookingId.is_null())
        .order_by_desc(ItemCol::CreatedAt)
        .find_also_related(Services)
        .all(&state.orm)
        .await?;

    Ok(ItemList {
        booking_cart_items: rows
            .into_iter()
            .map(|(item, service)| with_service(item, service))
            .collect(),
    })
}

/// Bulk fetch by id. Empty input returns empty without a query.
pub async fn get_models_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> AppResult<Vec<ItemModel>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Items::find()
        .filter(ItemCol::Id.is_in(ids.to_vec()))
        .all(conn)
        .await?;
    Ok(items)
}

pub async fn create_item(
    state: &AppState,
    payload: CreateBookingCartItemRequest,
) -> AppResult<ItemWithService> {
    if Carts::find_by_id(payload.cart_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Cart not found".into()));
    }
    let service = Services::find_by_id(payload.service_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let scheduled_date = match non_blank(payload.scheduled_date) {
        Some(raw) => Some(parse_schedule_date(&raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid scheduledDate '{raw}'"))
        })?),
        None => None,
    };

    let item = ItemActive {
        id: Set(Uuid::new_v4()),
        cart_id: Set(payload.cart_id),
        service_id: Set(payload.service_id),
        category_name: Set(non_blank(payload.category_name)),
        location: Set(non_blank(payload.location)),
        service_type: Set(non_blank(payload.service_type)),
        scheduled_date: Set(scheduled_date.map(Into::into)),
        time_slot: Set(non_blank(payload.time_slot)),
        price: Set(non_blank(payload.price)),
        booking_id: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_audit(
        &state.pool,
        None,
        "booking_cart_item_create",
        Some("booking_cart_items"),
        Some(serde_json::json!({ "itemId": item.id, "cartId": item.cart_id })),
    )
    .await;

    Ok(with_service(item, Some(service)))
}

/// Partial update. A key absent from the body leaves the field alone; an
/// explicit `null` (or a blank string) clears it.
pub async fn update_item(
    state: &AppState,
    id: Uuid,
    payload: UpdateBookingCartItemRequest,
) -> AppResult<ItemWithService> {
    let existing = Items::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking cart item not found".into()))?;

    let mut active: ItemActive = existing.into();
    if let Some(value) = payload.category_name {
        active.category_name = Set(non_blank(value));
    }
    if let Some(value) = payload.location {
        active.location = Set(non_blank(value));
    }
    if let Some(value) = payload.service_type {
        active.service_type = Set(non_blank(value));
    }
    if let Some(value) = payload.time_slot {
        active.time_slot = Set(non_blank(value));
    }
    if let Some(value) = payload.price {
        active.price = Set(non_blank(value));
    }
    if let Some(value) = payload.scheduled_date {
        let parsed = match non_blank(value) {
            Some(raw) => Some(
                parse_schedule_date(&raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid scheduledDate '{raw}'")))?,
            ),
            None => None,
        };
        active.scheduled_date = Set(parsed.map(Into::into));
    }

    let item = active.update(&state.orm).await?;
    let service = Services::find_by_id(item.service_id).one(&state.orm).await?;

    log_audit(
        &state.pool,
        None,
        "booking_cart_item_update",
        Some("booking_cart_items"),
        Some(serde_json::json!({ "itemId": item.id })),
    )
    .await;

    Ok(with_service(item, service))
}

pub async fn delete_item(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Items::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Booking cart item not found".into()));
    }

    log_audit(
        &state.pool,
        None,
        "booking_cart_item_delete",
        Some("booking_cart_items"),
        Some(serde_json::json!({ "itemId": id })),
    )
    .await;

    Ok(())
}

/// Bulk delete; a no-op for an empty id list so an unbounded delete is
/// never issued.
pub async fn delete_items<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Items::delete_many()
        .filter(ItemCol::Id.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
