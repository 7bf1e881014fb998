use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field names managed by the service. Caller-supplied values for these are
/// discarded during create/update so the system-assigned values always win.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// The single record type managed by the service.
///
/// Beyond the typed fields, an item carries an open map of caller-supplied
/// fields that are stored and returned verbatim (no schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    /// ISO-8601 timestamp, set once at creation.
    pub created_at: String,
    /// ISO-8601 timestamp of the last update; absent until the first update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Generate a unique ID for a new item.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Current time as an ISO-8601 string with millisecond precision.
    pub fn now_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Drop system-managed keys from a caller-supplied field map.
pub fn strip_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_FIELDS {
        extra.remove(key);
    }
    extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Item::generate_id();
        let b = Item::generate_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_is_valid_iso8601() {
        let ts = Item::now_timestamp();
        DateTime::parse_from_rfc3339(&ts).expect("timestamp should parse as RFC 3339");
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_strip_reserved_removes_system_fields() {
        let mut extra = Map::new();
        extra.insert("id".to_string(), json!("spoofed"));
        extra.insert("createdAt".to_string(), json!("spoofed"));
        extra.insert("updatedAt".to_string(), json!("spoofed"));
        extra.insert("color".to_string(), json!("red"));

        let stripped = strip_reserved(extra);

        assert_eq!(stripped.len(), 1);
        assert_eq!(stripped["color"], json!("red"));
    }

    #[test]
    fn test_item_serializes_with_camel_case_and_optional_updated_at() {
        let item = Item {
            id: "abc".to_string(),
            name: "widget".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: None,
            extra: Map::new(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], json!("abc"));
        assert_eq!(value["createdAt"], json!("2026-01-01T00:00:00.000Z"));
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_item_round_trips_extra_fields() {
        let raw = json!({
            "id": "abc",
            "name": "widget",
            "createdAt": "2026-01-01T00:00:00.000Z",
            "color": "blue",
            "count": 3
        });

        let item: Item = serde_json::from_value(raw).unwrap();
        assert_eq!(item.extra["color"], json!("blue"));
        assert_eq!(item.extra["count"], json!(3));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["color"], json!("blue"));
        assert_eq!(back["count"], json!(3));
    }
}
