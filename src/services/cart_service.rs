use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    conversion::dedup_ids,
    dto::cart::{CartPayload, CartWithServices},
    entity::{
        cart_services::{
            ActiveModel as CartServiceActive, Column as CartServiceCol, Entity as CartServices,
        },
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts},
        services::{Column as ServiceCol, Entity as Services},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    state::AppState,
};

/// The user's staged cart with its services, or `cart: null` when the
/// user has never touched their cart. Absence is not an error.
pub async fn get_cart(state: &AppState, user_id: Uuid) -> AppResult<CartPayload> {
    let cart = Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;

    let cart = match cart {
        Some(cart) => cart,
        None => return Ok(CartPayload { cart: None }),
    };

    let services = cart
        .find_related(Services)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(CartPayload {
        cart: Some(CartWithServices {
            cart: cart.into(),
            services,
        }),
    })
}

/// Replace the staged service set wholesale. The cart is created lazily
/// on first use; booking cart items are never touched from here.
pub async fn update_cart(
    state: &AppState,
    user_id: Uuid,
    service_ids: &[Uuid],
) -> AppResult<CartPayload> {
    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::UserNotFound);
    }

    let service_ids = dedup_ids(service_ids);
    let services = if service_ids.is_empty() {
        Vec::new()
    } else {
        Services::find()
            .filter(ServiceCol::Id.is_in(service_ids.clone()))
            .all(&state.orm)
            .await?
    };
    if services.len() != service_ids.len() {
        return Err(AppError::NotFound("Service not found".into()));
    }

    let txn = state.orm.begin().await?;

    let cart = Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .one(&txn)
        .await?;
    let cart = match cart {
        Some(cart) => cart,
        None => {
            CartActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                created_at: NotSet,
            }
            .insert(&txn)
            .await?
        }
    };

    CartServices::delete_many()
        .filter(CartServiceCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    if !service_ids.is_empty() {
        let links = service_ids.iter().map(|service_id| CartServiceActive {
            cart_id: Set(cart.id),
            service_id: Set(*service_id),
        });
        CartServices::insert_many(links).exec(&txn).await?;
    }

    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user_id),
        "cart_update",
        Some("carts"),
        Some(serde_json::json!({ "cartId": cart.id, "serviceIds": service_ids })),
    )
    .await;

    Ok(CartPayload {
        cart: Some(CartWithServices {
            cart: cart.into(),
            services: services.into_iter().map(Into::into).collect(),
        }),
    })
}

/// Empty the staged set. Idempotent once the user exists.
pub async fn clear_cart(state: &AppState, user_id: Uuid) -> AppResult<CartPayload> {
    update_cart(state, user_id, &[]).await
}

/// Owner of a cart, looked up when a booking needs to derive its user
/// from the cart its items came from.
pub async fn get_cart_owner(state: &AppState, cart_id: Uuid) -> AppResult<Uuid> {
    let cart = Carts::find_by_id(cart_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))?;
    Ok(cart.user_id)
}
