use serde::Deserialize;
use utoipa::ToSchema;

/// Page parameters as they arrive on the query string. They are kept as
/// raw strings so that non-numeric input normalizes to the defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl Pagination {
    /// `(page, page_size, offset)` with page ≥ 1 and page_size in 1..=100.
    /// Numeric input is clamped into those bounds; only unparseable input
    /// falls back to the defaults (page 1, page size 10).
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = parse_or(self.page.as_deref(), 1).max(1);
        let page_size = parse_or(self.page_size.as_deref(), 10).clamp(1, 100);
        let offset = (page - 1) * page_size;
        (page, page_size, offset)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
    pub user_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub category_name: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TrendingQuery {
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

impl TrendingQuery {
    pub fn normalize(&self) -> (i64, i64) {
        let days = self.days.unwrap_or(30).clamp(1, 365);
        let limit = self.limit.unwrap_or(5).clamp(1, 20);
        (days, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: Option<&str>, page_size: Option<&str>) -> Pagination {
        Pagination {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(pagination(None, None).normalize(), (1, 10, 0));
    }

    #[test]
    fn non_numeric_input_normalizes_to_defaults() {
        assert_eq!(pagination(Some("abc"), Some("lots")).normalize(), (1, 10, 0));
    }

    #[test]
    fn zero_and_negative_clamp_to_the_lower_bound() {
        assert_eq!(pagination(Some("0"), Some("0")).normalize(), (1, 1, 0));
        assert_eq!(pagination(Some("-3"), Some("-1")).normalize(), (1, 1, 0));
    }

    #[test]
    fn page_size_zero_clamps_to_one() {
        let (_, page_size, _) = pagination(None, Some("0")).normalize();
        assert_eq!(page_size, 1);
    }

    #[test]
    fn page_size_clamps_to_one_hundred() {
        let (_, page_size, _) = pagination(Some("1"), Some("500")).normalize();
        assert_eq!(page_size, 100);
    }

    #[test]
    fn offset_uses_normalized_values() {
        assert_eq!(pagination(Some("3"), Some("25")).normalize(), (3, 25, 50));
    }

    #[test]
    fn trending_clamps_window_and_limit() {
        let query = TrendingQuery {
            days: Some(1000),
            limit: Some(0),
        };
        assert_eq!(query.normalize(), (365, 1));
        assert_eq!(TrendingQuery::default().normalize(), (30, 5));
    }
}
