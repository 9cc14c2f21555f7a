//! Cart-item to booking conversion rules: the cross-item invariant checks
//! and the headline-field aggregation applied when one or more
//! `BookingCartItem`s are turned into a single `Booking`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entity::booking_cart_items::Model as ItemModel;
use crate::entity::bookings::BookingStatus;
use crate::entity::services::Model as ServiceModel;
use crate::error::{AppError, AppResult};

/// Headline values summarizing a set of cart items, derived field by field.
#[derive(Debug, Default, Clone)]
pub struct Headline {
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub time_slot: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub price: Option<String>,
}

/// Drop duplicate ids, keeping first-occurrence order.
pub fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Rows come back from the database in arbitrary order; aggregation is
/// defined over the order the ids were supplied in, so restore it.
pub fn sort_by_requested(ids: &[Uuid], items: Vec<ItemModel>) -> Vec<ItemModel> {
    let mut by_id: HashMap<Uuid, ItemModel> =
        items.into_iter().map(|item| (item.id, item)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

pub fn missing_ids(ids: &[Uuid], items: &[ItemModel]) -> Vec<Uuid> {
    let found: HashSet<Uuid> = items.iter().map(|item| item.id).collect();
    ids.iter().copied().filter(|id| !found.contains(id)).collect()
}

pub fn already_booked_ids(items: &[ItemModel]) -> Vec<Uuid> {
    items
        .iter()
        .filter(|item| item.booking_id.is_some())
        .map(|item| item.id)
        .collect()
}

/// The cart shared by every item, or an error when the items span more
/// than one cart. `None` for an empty set.
pub fn shared_cart_id(items: &[ItemModel]) -> AppResult<Option<Uuid>> {
    let mut cart_id = None;
    for item in items {
        match cart_id {
            None => cart_id = Some(item.cart_id),
            Some(existing) if existing != item.cart_id => {
                return Err(AppError::BadRequest(
                    "All booking cart items must belong to the same cart".into(),
                ));
            }
            _ => {}
        }
    }
    Ok(cart_id)
}

/// First value that is present and non-blank.
pub fn pick_first_string<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Sum of the item prices formatted to two decimals, provided every item
/// that carries a price parses as a decimal number; otherwise the first
/// non-blank price string. `None` when no item carries a price.
pub fn aggregate_price(items: &[ItemModel]) -> Option<String> {
    let prices: Vec<&str> = items
        .iter()
        .filter_map(|item| item.price.as_deref())
        .filter(|price| !price.trim().is_empty())
        .collect();
    if prices.is_empty() {
        return None;
    }

    let mut total = Decimal::ZERO;
    for raw in &prices {
        match raw.trim().parse::<Decimal>() {
            Ok(value) => total += value,
            Err(_) => return Some(prices[0].to_string()),
        }
    }
    Some(format!("{total:.2}"))
}

pub fn headline_from_items(items: &[ItemModel]) -> Headline {
    Headline {
        category_name: pick_first_string(items.iter().map(|i| i.category_name.as_deref())),
        location: pick_first_string(items.iter().map(|i| i.location.as_deref())),
        service_type: pick_first_string(items.iter().map(|i| i.service_type.as_deref())),
        time_slot: pick_first_string(items.iter().map(|i| i.time_slot.as_deref())),
        scheduled_date: items
            .iter()
            .find_map(|i| i.scheduled_date)
            .map(|dt| dt.with_timezone(&Utc)),
        price: aggregate_price(items),
    }
}

/// The price a cart item actually charges: its own override when set,
/// otherwise the listed price of its service.
pub fn effective_price(item: &ItemModel, service: Option<&ServiceModel>) -> Option<String> {
    item.price
        .as_deref()
        .filter(|price| !price.trim().is_empty())
        .map(str::to_string)
        .or_else(|| service.map(|s| s.normal_price.clone()))
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_schedule_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Trim a request string, treating blank input as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_status(input: &str) -> AppResult<BookingStatus> {
    BookingStatus::parse(input).ok_or_else(|| AppError::InvalidStatus {
        message: format!("Invalid status '{}'", input.trim()),
        valid: BookingStatus::VALID,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cart_id: Uuid, price: Option<&str>, booking_id: Option<Uuid>) -> ItemModel {
        ItemModel {
            id: Uuid::new_v4(),
            cart_id,
            service_id: Uuid::new_v4(),
            category_name: None,
            location: None,
            service_type: None,
            scheduled_date: None,
            time_slot: None,
            price: price.map(str::to_string),
            booking_id,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedup_ids(&[a, b, a, b, a]), vec![a, b]);
    }

    #[test]
    fn sort_by_requested_restores_input_order() {
        let cart = Uuid::new_v4();
        let first = item(cart, Some("1.00"), None);
        let second = item(cart, Some("2.00"), None);
        let ids = vec![first.id, second.id];

        let sorted = sort_by_requested(&ids, vec![second.clone(), first.clone()]);
        assert_eq!(sorted[0].id, first.id);
        assert_eq!(sorted[1].id, second.id);
    }

    #[test]
    fn missing_ids_reports_unresolved_ids() {
        let cart = Uuid::new_v4();
        let found = item(cart, None, None);
        let absent = Uuid::new_v4();
        assert_eq!(
            missing_ids(&[found.id, absent], &[found.clone()]),
            vec![absent]
        );
    }

    #[test]
    fn already_booked_ids_flags_linked_items() {
        let cart = Uuid::new_v4();
        let free = item(cart, None, None);
        let taken = item(cart, None, Some(Uuid::new_v4()));
        assert_eq!(
            already_booked_ids(&[free.clone(), taken.clone()]),
            vec![taken.id]
        );
    }

    #[test]
    fn shared_cart_id_rejects_items_from_two_carts() {
        let one = item(Uuid::new_v4(), None, None);
        let other = item(Uuid::new_v4(), None, None);
        assert!(shared_cart_id(&[one, other]).is_err());
    }

    #[test]
    fn shared_cart_id_returns_the_common_cart() {
        let cart = Uuid::new_v4();
        let items = [item(cart, None, None), item(cart, None, None)];
        assert_eq!(shared_cart_id(&items).unwrap(), Some(cart));
        assert_eq!(shared_cart_id(&[]).unwrap(), None);
    }

    #[test]
    fn prices_sum_when_all_parse() {
        let cart = Uuid::new_v4();
        let items = [item(cart, Some("10.00"), None), item(cart, Some("20.50"), None)];
        assert_eq!(aggregate_price(&items), Some("30.50".to_string()));
    }

    #[test]
    fn null_prices_do_not_block_the_sum() {
        let cart = Uuid::new_v4();
        let items = [
            item(cart, Some("10.00"), None),
            item(cart, None, None),
            item(cart, Some("20.00"), None),
        ];
        assert_eq!(aggregate_price(&items), Some("30.00".to_string()));

        let single = [item(cart, Some("10.00"), None), item(cart, None, None)];
        assert_eq!(aggregate_price(&single), Some("10.00".to_string()));
    }

    #[test]
    fn unparseable_price_falls_back_to_first_non_blank() {
        let cart = Uuid::new_v4();
        let items = [
            item(cart, Some("10.00"), None),
            item(cart, Some("call us"), None),
        ];
        assert_eq!(aggregate_price(&items), Some("10.00".to_string()));
    }

    #[test]
    fn no_priced_items_yields_none() {
        let cart = Uuid::new_v4();
        let items = [item(cart, None, None), item(cart, Some("  "), None)];
        assert_eq!(aggregate_price(&items), None);
    }

    #[test]
    fn sum_keeps_two_decimal_places() {
        let cart = Uuid::new_v4();
        let items = [item(cart, Some("10"), None), item(cart, Some("20.5"), None)];
        assert_eq!(aggregate_price(&items), Some("30.50".to_string()));
    }

    #[test]
    fn headline_picks_first_non_blank_in_input_order() {
        let cart = Uuid::new_v4();
        let mut first = item(cart, None, None);
        first.location = Some("  ".to_string());
        first.time_slot = Some("09:00-11:00".to_string());
        let mut second = item(cart, None, None);
        second.location = Some("Springfield".to_string());
        second.time_slot = Some("13:00-15:00".to_string());

        let headline = headline_from_items(&[first, second]);
        assert_eq!(headline.location.as_deref(), Some("Springfield"));
        assert_eq!(headline.time_slot.as_deref(), Some("09:00-11:00"));
        assert_eq!(headline.category_name, None);
    }

    #[test]
    fn effective_price_prefers_the_item_override() {
        let cart = Uuid::new_v4();
        let service = ServiceModel {
            id: Uuid::new_v4(),
            name: "Deep Cleaning".to_string(),
            normal_price: "80.00".to_string(),
            member_price: None,
            icon: None,
            category_id: None,
            created_at: Utc::now().into(),
        };

        let overridden = item(cart, Some("65.00"), None);
        assert_eq!(
            effective_price(&overridden, Some(&service)).as_deref(),
            Some("65.00")
        );

        let inherited = item(cart, None, None);
        assert_eq!(
            effective_price(&inherited, Some(&service)).as_deref(),
            Some("80.00")
        );
        assert_eq!(effective_price(&inherited, None), None);
    }

    #[test]
    fn schedule_dates_parse_from_day_or_rfc3339() {
        let day = parse_schedule_date("2024-06-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2024-06-01T00:00:00+00:00");

        let stamp = parse_schedule_date("2024-06-01T09:30:00+07:00").unwrap();
        assert_eq!(stamp.to_rfc3339(), "2024-06-01T02:30:00+00:00");

        assert_eq!(parse_schedule_date("June first"), None);
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  Kitchen  ".into())).as_deref(), Some("Kitchen"));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn parse_status_lists_the_valid_set() {
        assert!(matches!(
            parse_status("completed"),
            Ok(BookingStatus::Completed)
        ));
        match parse_status("DONE") {
            Err(AppError::InvalidStatus { valid, .. }) => {
                assert_eq!(valid, BookingStatus::VALID);
            }
            other => panic!("expected InvalidStatus, got {other:?}"),
        }
    }
}
