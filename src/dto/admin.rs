use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_bookings: i64,
    pub total_services: i64,
    pub total_users: i64,
    pub unbooked_cart_items: i64,
    pub bookings_by_status: Vec<StatusCount>,
    /// Sum of parseable COMPLETED booking prices, two decimal places.
    pub completed_revenue: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingService {
    pub service_id: Uuid,
    pub name: String,
    pub bookings: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingReport {
    pub days: i64,
    pub services: Vec<TrendingService>,
}
