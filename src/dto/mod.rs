pub mod admin;
pub mod booking_cart_items;
pub mod bookings;
pub mod cart;
pub mod services;

use serde::{Deserialize, Deserializer};

/// Deserializer for PATCH bodies where an omitted key means "leave the
/// field alone" and an explicit `null` means "clear it". The outer
/// `Option` is `None` only when the key is absent (via
/// `#[serde(default)]`); `Some(None)` is a literal `null`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        location: Option<Option<String>>,
    }

    #[test]
    fn absent_key_is_outer_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.location, None);
    }

    #[test]
    fn explicit_null_is_some_none() {
        let patch: Patch = serde_json::from_str(r#"{ "location": null }"#).unwrap();
        assert_eq!(patch.location, Some(None));
    }

    #[test]
    fn value_is_some_some() {
        let patch: Patch = serde_json::from_str(r#"{ "location": "Springfield" }"#).unwrap();
        assert_eq!(patch.location, Some(Some("Springfield".to_string())));
    }
}
