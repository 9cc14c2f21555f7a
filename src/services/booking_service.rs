use chrono::{DateTime, Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    conversion::{effective_price, parse_schedule_date, parse_status},
    dto::booking_cart_items::ItemWithService,
    dto::bookings::{BookingDetail, BookingPage, BookingWithUser, UserBookingList},
    entity::{
        booking_cart_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as Items,
        },
        bookings::{
            ActiveModel as BookingActive, BookingStatus, Column as BookCol, Entity as Bookings,
            Model as BookingModel,
        },
        services::Entity as Services,
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    response::PageMeta,
    routes::params::BookingListQuery,
    state::AppState,
};

/// Scalar values for a new booking, already aggregated and validated by
/// the controller layer.
#[derive(Debug, Default)]
pub struct NewBooking {
    pub user_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub time_slot: Option<String>,
    pub price: Option<String>,
    pub status: Option<BookingStatus>,
}

/// Scalar changes for a booking update. Outer `None` leaves a field
/// alone, `Some(None)` clears it. `booking_cart_item_ids`, when present,
/// replaces the linked line-item set wholesale.
#[derive(Debug, Default)]
pub struct BookingChanges {
    pub user_id: Option<Option<Uuid>>,
    pub category_name: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub service_type: Option<Option<String>>,
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    pub time_slot: Option<Option<String>>,
    pub price: Option<Option<String>>,
    pub status: Option<BookingStatus>,
    pub booking_cart_item_ids: Option<Vec<Uuid>>,
}

impl BookingChanges {
    fn apply_scalars(&self, active: &mut BookingActive) {
        if let Some(value) = &self.user_id {
            active.user_id = Set(*value);
        }
        if let Some(value) = &self.category_name {
            active.category_name = Set(value.clone());
        }
        if let Some(value) = &self.location {
            active.location = Set(value.clone());
        }
        if let Some(value) = &self.service_type {
            active.service_type = Set(value.clone());
        }
        if let Some(value) = &self.scheduled_date {
            active.scheduled_date = Set(value.map(Into::into));
        }
        if let Some(value) = &self.time_slot {
            active.time_slot = Set(value.clone());
        }
        if let Some(value) = &self.price {
            active.price = Set(value.clone());
        }
        if let Some(status) = self.status {
            active.status = Set(status);
        }
    }
}

/// Half-open `[start, end)` window over `scheduled_date`, derived from
/// the `date` / `startDate` / `endDate` query parameters.
fn schedule_window(
    query: &BookingListQuery,
) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let parse = |raw: &str| {
        parse_schedule_date(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date '{}'", raw.trim())))
    };

    if let Some(raw) = query.date.as_deref().filter(|s| !s.trim().is_empty()) {
        let day = parse(raw)?;
        return Ok(Some((day, day + Duration::days(1))));
    }

    let start = match query.start_date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse(raw)?,
        // A bare endDate has no anchor and is ignored.
        None => return Ok(None),
    };
    let end = match query.end_date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => {
            let end = parse(raw)?;
            // An inverted range collapses to the single day at `start`;
            // equal bounds are taken literally as an empty window.
            if end < start {
                start + Duration::days(1)
            } else {
                end
            }
        }
        None => start + Duration::days(1),
    };
    Ok(Some((start, end)))
}

fn ilike_pattern(value: &str) -> String {
    format!("%{}%", value.trim())
}

fn user_name_subquery(pattern: String) -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(UserCol::Id)
        .from(Users)
        .and_where(Expr::col(UserCol::FullName).ilike(pattern))
        .to_owned()
}

fn build_filter(query: &BookingListQuery) -> AppResult<Condition> {
    let mut condition = Condition::all();

    if let Some((start, end)) = schedule_window(query)? {
        condition = condition
            .add(BookCol::ScheduledDate.gte(start))
            .add(BookCol::ScheduledDate.lt(end));
    }

    if let Some(name) = query.user_name.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(BookCol::UserId.in_subquery(user_name_subquery(
            ilike_pattern(name),
        )));
    }
    if let Some(location) = query.location.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(Expr::col(BookCol::Location).ilike(ilike_pattern(location)));
    }
    if let Some(service_type) = query
        .service_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        condition =
            condition.add(Expr::col(BookCol::ServiceType).ilike(ilike_pattern(service_type)));
    }
    if let Some(category) = query
        .category_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        condition =
            condition.add(Expr::col(BookCol::CategoryName).ilike(ilike_pattern(category)));
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(BookCol::Status.eq(parse_status(status)?));
    }

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = ilike_pattern(search);
        let mut any = Condition::any()
            .add(Expr::col(BookCol::Location).ilike(pattern.clone()))
            .add(Expr::col(BookCol::ServiceType).ilike(pattern.clone()))
            .add(Expr::col(BookCol::CategoryName).ilike(pattern.clone()))
            .add(BookCol::UserId.in_subquery(user_name_subquery(pattern)));
        // A search term that names a status exactly also matches on it.
        if let Some(status) = BookingStatus::parse(search) {
            any = any.add(BookCol::Status.eq(status));
        }
        condition = condition.add(any);
    }

    Ok(condition)
}

/// Filtered, paginated listing. The count and the page fetch share one
/// predicate and run inside a single transaction so the page and its
/// total describe the same snapshot.
pub async fn list_bookings(
    state: &AppState,
    query: BookingListQuery,
) -> AppResult<BookingPage> {
    let (page, page_size, offset) = query.pagination.normalize();
    let condition = build_filter(&query)?;

    let txn = state.orm.begin().await?;

    let finder = Bookings::find()
        .filter(condition)
        .order_by_desc(BookCol::CreatedAt);
    let total = finder.clone().count(&txn).await? as i64;

    let rows = finder
        .find_also_related(Users)
        .limit(page_size as u64)
        .offset(offset as u64)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let bookings = rows
        .into_iter()
        .map(|(booking, user)| BookingWithUser {
            booking: booking.into(),
            user: user.map(Into::into),
        })
        .collect();

    Ok(BookingPage {
        bookings,
        meta: PageMeta::new(total, page, page_size),
    })
}

async fn load_items<C: ConnectionTrait>(
    conn: &C,
    booking: &BookingModel,
) -> AppResult<Vec<ItemWithService>> {
    let rows = booking
        .find_related(Items)
        .order_by_desc(ItemCol::CreatedAt)
        .find_also_related(Services)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(item, service)| {
            let price = effective_price(&item, service.as_ref());
            ItemWithService {
                item: item.into(),
                service: service.map(Into::into),
                effective_price: price,
            }
        })
        .collect())
}

async fn load_detail<C: ConnectionTrait>(
    conn: &C,
    booking: BookingModel,
) -> AppResult<BookingDetail> {
    let user = booking.find_related(Users).one(conn).await?;
    let booking_cart_items = load_items(conn, &booking).await?;
    Ok(BookingDetail {
        booking: booking.into(),
        user: user.map(Into::into),
        booking_cart_items,
    })
}

/// Unfiltered listing scoped to one user, newest first.
pub async fn list_bookings_by_user(
    state: &AppState,
    user_id: Uuid,
) -> AppResult<UserBookingList> {
    let bookings = Bookings::find()
        .filter(BookCol::UserId.eq(user_id))
        .order_by_desc(BookCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut out = Vec::with_capacity(bookings.len());
    for booking in bookings {
        out.push(load_detail(&state.orm, booking).await?);
    }
    Ok(UserBookingList { bookings: out })
}

pub async fn get_booking(state: &AppState, id: Uuid) -> AppResult<BookingDetail> {
    let booking = Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    load_detail(&state.orm, booking).await
}

/// Insert the booking row and re-link its cart items inside one
/// transaction. The re-link only touches rows whose `booking_id` is
/// still null; if that guard leaves any requested item unclaimed (a
/// concurrent creation won the race) the whole transaction aborts.
pub async fn create_booking(
    state: &AppState,
    new: NewBooking,
    item_ids: &[Uuid],
) -> AppResult<BookingDetail> {
    let txn = state.orm.begin().await?;

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        category_name: Set(new.category_name),
        location: Set(new.location),
        service_type: Set(new.service_type),
        scheduled_date: Set(new.scheduled_date.map(Into::into)),
        time_slot: Set(new.time_slot),
        price: Set(new.price),
        status: Set(new.status.unwrap_or(BookingStatus::Pending)),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    if !item_ids.is_empty() {
        let result = Items::update_many()
            .set(ItemActive {
                booking_id: Set(Some(booking.id)),
                ..Default::default()
            })
            .filter(ItemCol::Id.is_in(item_ids.to_vec()))
            .filter(ItemCol::BookingId.is_null())
            .exec(&txn)
            .await?;

        if result.rows_affected != item_ids.len() as u64 {
            return Err(AppError::BadRequest(
                "Some booking cart items were booked concurrently".into(),
            ));
        }
    }

    txn.commit().await?;

    log_audit(
        &state.pool,
        booking.user_id,
        "booking_create",
        Some("bookings"),
        Some(serde_json::json!({ "bookingId": booking.id, "itemIds": item_ids })),
    )
    .await;

    load_detail(&state.orm, booking).await
}

/// Two update paths, on purpose: a request that touches the line-item
/// set runs inside a transaction (scalar update, detach, attach); a pure
/// scalar edit is a single-row UPDATE with no transaction wrapper.
pub async fn update_booking(
    state: &AppState,
    id: Uuid,
    changes: BookingChanges,
) -> AppResult<BookingDetail> {
    let existing = Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    let mut active: BookingActive = existing.into();
    changes.apply_scalars(&mut active);

    let booking = match &changes.booking_cart_item_ids {
        Some(ids) => {
            let txn = state.orm.begin().await?;
            let booking = active.update(&txn).await?;

            let mut detach = Items::update_many()
                .set(ItemActive {
                    booking_id: Set(None),
                    ..Default::default()
                })
                .filter(ItemCol::BookingId.eq(booking.id));
            if !ids.is_empty() {
                detach = detach.filter(ItemCol::Id.is_not_in(ids.clone()));
            }
            detach.exec(&txn).await?;

            if !ids.is_empty() {
                Items::update_many()
                    .set(ItemActive {
                        booking_id: Set(Some(booking.id)),
                        ..Default::default()
                    })
                    .filter(ItemCol::Id.is_in(ids.clone()))
                    .exec(&txn)
                    .await?;
            }

            txn.commit().await?;
            booking
        }
        None => active.update(&state.orm).await?,
    };

    log_audit(
        &state.pool,
        booking.user_id,
        "booking_update",
        Some("bookings"),
        Some(serde_json::json!({ "bookingId": booking.id })),
    )
    .await;

    load_detail(&state.orm, booking).await
}

/// Delete a booking and its line items in one transaction. The child
/// delete is explicit; the foreign key stays RESTRICT.
pub async fn delete_booking(state: &AppState, id: Uuid) -> AppResult<()> {
    let booking = Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    let txn = state.orm.begin().await?;
    let item_ids: Vec<Uuid> = booking
        .find_related(Items)
        .all(&txn)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();
    crate::services::booking_cart_item_service::delete_items(&txn, &item_ids).await?;
    Bookings::delete_by_id(booking.id).exec(&txn).await?;
    txn.commit().await?;

    log_audit(
        &state.pool,
        booking.user_id,
        "booking_delete",
        Some("bookings"),
        Some(serde_json::json!({ "bookingId": booking.id })),
    )
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::params::BookingListQuery;

    fn query_with(
        date: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> BookingListQuery {
        BookingListQuery {
            date: date.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn single_date_expands_to_one_day_window() {
        let (start, end) = schedule_window(&query_with(Some("2024-06-01"), None, None))
            .unwrap()
            .unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-06-02T00:00:00+00:00");
    }

    #[test]
    fn date_equals_explicit_single_day_range() {
        let from_date = schedule_window(&query_with(Some("2024-06-01"), None, None)).unwrap();
        let from_range =
            schedule_window(&query_with(None, Some("2024-06-01"), Some("2024-06-02"))).unwrap();
        assert_eq!(from_date, from_range);
    }

    #[test]
    fn inverted_range_collapses_to_start_day() {
        let (start, end) =
            schedule_window(&query_with(None, Some("2024-06-10"), Some("2024-06-01")))
                .unwrap()
                .unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-10T00:00:00+00:00");
        assert_eq!(end, start + Duration::days(1));
    }

    #[test]
    fn equal_bounds_are_taken_literally() {
        let (start, end) =
            schedule_window(&query_with(None, Some("2024-06-10"), Some("2024-06-10")))
                .unwrap()
                .unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn start_without_end_is_a_single_day() {
        let (start, end) = schedule_window(&query_with(None, Some("2024-06-10"), None))
            .unwrap()
            .unwrap();
        assert_eq!(end, start + Duration::days(1));
    }

    #[test]
    fn bare_end_date_is_ignored() {
        assert_eq!(
            schedule_window(&query_with(None, None, Some("2024-06-10"))).unwrap(),
            None
        );
    }

    #[test]
    fn unparseable_date_is_a_validation_error() {
        assert!(matches!(
            schedule_window(&query_with(Some("next tuesday"), None, None)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn invalid_status_filter_lists_the_valid_set() {
        let query = BookingListQuery {
            status: Some("DONE".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_filter(&query),
            Err(AppError::InvalidStatus { .. })
        ));
    }
}
