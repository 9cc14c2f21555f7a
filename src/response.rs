use serde::Serialize;
use utoipa::ToSchema;

/// Response envelope: `{ "message": ..., ...data }`. The payload is
/// flattened next to the message rather than nested under a `data` key.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Envelope carrying nothing but the message (delete confirmations,
    /// fallback bodies).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = ((total + page_size - 1) / page_size).max(1);
        Self {
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(21, 1, 10).total_pages, 3);
        assert_eq!(PageMeta::new(20, 1, 10).total_pages, 2);
        assert_eq!(PageMeta::new(1, 1, 10).total_pages, 1);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 1);
    }

    #[test]
    fn envelope_flattens_payload_next_to_message() {
        #[derive(Serialize)]
        struct Payload {
            answer: i32,
        }

        let value =
            serde_json::to_value(ApiResponse::new("OK", Payload { answer: 42 })).unwrap();
        assert_eq!(value["message"], "OK");
        assert_eq!(value["answer"], 42);
    }

    #[test]
    fn message_only_has_no_extra_keys() {
        let value = serde_json::to_value(ApiResponse::message_only("Deleted")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "message": "Deleted" })
        );
    }
}
