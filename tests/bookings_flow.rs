use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use axum_booking_api::{
    db::{create_orm_conn, create_pool},
    dto::booking_cart_items::{
        CreateBookingCartItemRequest, UpdateBookingCartItemRequest,
    },
    entity::{
        services::ActiveModel as ServiceActive, users::ActiveModel as UserActive,
    },
    routes::create_api_router,
    services::{booking_cart_item_service, cart_service},
    state::AppState,
};

// End-to-end booking lifecycle against a real database: items are staged,
// converted into a booking, the invariants hold over HTTP, and the cart
// is untouched by the conversion.
#[tokio::test]
async fn booking_lifecycle_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let app: Router = Router::new()
        .nest("/api", create_api_router())
        .with_state(state.clone());

    let user_id = create_user(&state, "Test User", "user@example.com").await?;
    let other_id = create_user(&state, "Other User", "other@example.com").await?;

    let s1 = create_service(&state, "Deep Cleaning", "80.00").await?;
    let s2 = create_service(&state, "Lawn Mowing", "60.00").await?;

    // Stage both services; this also creates the user's cart.
    let staged = cart_service::update_cart(&state, user_id, &[s1, s2]).await?;
    let cart_id = staged.cart.as_ref().unwrap().cart.id;
    assert_eq!(staged.cart.unwrap().services.len(), 2);

    let other_cart_id = cart_service::clear_cart(&state, other_id)
        .await?
        .cart
        .unwrap()
        .cart
        .id;

    let item_a = create_item(&state, cart_id, s1, Some("50.00")).await?;
    let item_b = create_item(&state, cart_id, s2, Some("75.00")).await?;

    // Create a booking from both items over HTTP.
    let (status, body) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [item_a, item_b], "location": "Springfield" }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let booking = &body["booking"];
    assert_eq!(booking["price"], "125.00");
    assert_eq!(booking["status"], "PENDING");
    assert_eq!(booking["location"], "Springfield");
    assert_eq!(booking["userId"], json!(user_id.to_string()));
    assert_eq!(booking["bookingCartItems"].as_array().unwrap().len(), 2);
    let booking_id: Uuid = booking["id"].as_str().unwrap().parse()?;

    // Both items are now linked to the booking.
    let items =
        booking_cart_item_service::get_models_by_ids(&state.orm, &[item_a, item_b]).await?;
    assert!(items.iter().all(|i| i.booking_id == Some(booking_id)));

    // The staged cart is untouched by the conversion.
    let cart_after = cart_service::get_cart(&state, user_id).await?;
    assert_eq!(cart_after.cart.unwrap().services.len(), 2);

    // An explicit price in the request wins over the aggregate derived
    // from the items.
    let item_c = create_item(&state, cart_id, s1, Some("10.00")).await?;
    let item_d = create_item(&state, cart_id, s2, Some("20.50")).await?;
    let (status, body) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [item_c, item_d], "price": "999.99" }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["booking"]["price"], "999.99");

    // Booking again from an already-booked item fails and names it.
    let (status, body) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [item_a] }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["alreadyBookedIds"],
        json!([item_a.to_string()])
    );

    // Items from two different carts cannot share a booking.
    let item_mine = create_item(&state, cart_id, s1, None).await?;
    let item_theirs = create_item(&state, other_cart_id, s2, None).await?;
    let (status, _) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [item_mine, item_theirs] }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A wrong explicit owner is rejected.
    let (status, _) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [item_mine], "userId": other_id }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown ids are a 404 listing the missing ids.
    let ghost = Uuid::new_v4();
    let (status, body) = post_json(
        &app,
        "/api/bookings",
        json!({ "bookingCartItemIds": [ghost] }),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["missingIds"], json!([ghost.to_string()]));

    // An empty id list never reaches the service.
    let (status, _) =
        post_json(&app, "/api/bookings", json!({ "bookingCartItemIds": [] })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The alternate entry point applies the same rules.
    let (status, _) = post_json(
        &app,
        "/api/booking-cart-items/bookings",
        json!({ "bookingCartItemIds": [item_a] }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Lowercase status input normalizes to the stored uppercase form.
    let (status, body) = patch_json(
        &app,
        &format!("/api/bookings/{booking_id}"),
        json!({ "status": "completed" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "COMPLETED");

    // An unknown status lists the valid set.
    let (status, body) = patch_json(
        &app,
        &format!("/api/bookings/{booking_id}"),
        json!({ "status": "DONE" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["validStatuses"]
            .as_array()
            .unwrap()
            .contains(&json!("COMPLETED"))
    );

    // Partial update semantics on an item: null clears, an empty body
    // leaves everything alone.
    let updated = booking_cart_item_service::update_item(
        &state,
        item_mine,
        UpdateBookingCartItemRequest {
            location: Some(Some("Kitchen".into())),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.item.location.as_deref(), Some("Kitchen"));

    let untouched = booking_cart_item_service::update_item(
        &state,
        item_mine,
        UpdateBookingCartItemRequest::default(),
    )
    .await?;
    assert_eq!(untouched.item.location.as_deref(), Some("Kitchen"));

    let cleared = booking_cart_item_service::update_item(
        &state,
        item_mine,
        UpdateBookingCartItemRequest {
            location: Some(None),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(cleared.item.location, None);

    // Clearing the cart is idempotent.
    let first = cart_service::clear_cart(&state, user_id).await?;
    assert!(first.cart.unwrap().services.is_empty());
    let second = cart_service::clear_cart(&state, user_id).await?;
    assert!(second.cart.unwrap().services.is_empty());

    // Deleting the booking removes its line items with it.
    let (status, _) = delete(&app, &format!("/api/bookings/{booking_id}")).await?;
    assert_eq!(status, StatusCode::OK);
    let gone =
        booking_cart_item_service::get_models_by_ids(&state.orm, &[item_a, item_b]).await?;
    assert!(gone.is_empty());

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE booking_cart_items, bookings, cart_services, carts, audit_logs, services, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(state: &AppState, name: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        full_name: Set(Some(name.to_string())),
        email: Set(email.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

async fn create_service(state: &AppState, name: &str, price: &str) -> anyhow::Result<Uuid> {
    let service = ServiceActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        normal_price: Set(price.to_string()),
        member_price: Set(None),
        icon: Set(None),
        category_id: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(service.id)
}

async fn create_item(
    state: &AppState,
    cart_id: Uuid,
    service_id: Uuid,
    price: Option<&str>,
) -> anyhow::Result<Uuid> {
    let item = booking_cart_item_service::create_item(
        state,
        CreateBookingCartItemRequest {
            cart_id,
            service_id,
            category_name: None,
            location: None,
            service_type: None,
            scheduled_date: None,
            time_slot: None,
            price: price.map(str::to_string),
        },
    )
    .await?;
    Ok(item.item.id)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(body.to_string()))?
        }
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    send(app, "POST", uri, Some(body)).await
}

async fn patch_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    send(app, "PATCH", uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
    send(app, "DELETE", uri, None).await
}
