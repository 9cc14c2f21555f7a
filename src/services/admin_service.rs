use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    dto::admin::{DashboardMetrics, StatusCount, TrendingReport, TrendingService},
    error::AppResult,
    state::AppState,
};

#[derive(FromRow)]
struct StatusRow {
    status: String,
    count: i64,
}

#[derive(FromRow)]
struct TrendingRow {
    service_id: Uuid,
    name: String,
    bookings: i64,
}

/// Dashboard headline numbers: totals, a per-status breakdown and the
/// revenue of completed bookings. Prices are stored as strings; rows
/// that do not parse as a number are left out of the revenue sum.
pub async fn metrics(state: &AppState) -> AppResult<DashboardMetrics> {
    let (total_bookings, total_services, total_users, unbooked_cart_items): (i64, i64, i64, i64) =
        sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM bookings),
                   (SELECT COUNT(*) FROM services),
                   (SELECT COUNT(*) FROM users),
                   (SELECT COUNT(*) FROM booking_cart_items WHERE booking_id IS NULL)
            "#,
        )
        .fetch_one(&state.pool)
        .await?;

    let status_rows = sqlx::query_as::<_, StatusRow>(
        "SELECT status, COUNT(*) AS count FROM bookings GROUP BY status ORDER BY count DESC, status",
    )
    .fetch_all(&state.pool)
    .await?;

    let completed_prices: Vec<(Option<String>,)> = sqlx::query_as(
        "SELECT price FROM bookings WHERE status = 'COMPLETED'",
    )
    .fetch_all(&state.pool)
    .await?;

    let mut revenue = Decimal::ZERO;
    for (price,) in completed_prices {
        if let Some(value) = price.and_then(|p| p.trim().parse::<Decimal>().ok()) {
            revenue += value;
        }
    }

    Ok(DashboardMetrics {
        total_bookings,
        total_services,
        total_users,
        unbooked_cart_items,
        bookings_by_status: status_rows
            .into_iter()
            .map(|row| StatusCount {
                status: row.status,
                count: row.count,
            })
            .collect(),
        completed_revenue: format!("{revenue:.2}"),
    })
}

/// Services ranked by booked line items over a trailing window. Feeds
/// the trending chart on the admin dashboard.
pub async fn trending_services(
    state: &AppState,
    days: i64,
    limit: i64,
) -> AppResult<TrendingReport> {
    let rows = sqlx::query_as::<_, TrendingRow>(
        r#"
        SELECT s.id AS service_id, s.name, COUNT(*) AS bookings
        FROM booking_cart_items i
        JOIN bookings b ON b.id = i.booking_id
        JOIN services s ON s.id = i.service_id
        WHERE b.created_at >= now() - ($1 * INTERVAL '1 day')
        GROUP BY s.id, s.name
        ORDER BY bookings DESC, s.name
        LIMIT $2
        "#,
    )
    .bind(days)
    .bind(limit)
    .fetch_all(&state.pool)
    .await?;

    Ok(TrendingReport {
        days,
        services: rows
            .into_iter()
            .map(|row| TrendingService {
                service_id: row.service_id,
                name: row.name,
                bookings: row.bookings,
            })
            .collect(),
    })
}
