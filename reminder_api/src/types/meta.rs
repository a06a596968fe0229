use serde::{Deserialize, Deserializer, Serialize};

/// Envelope used by endpoints that wrap their payload in `data`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Response<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of mutation endpoints, which only promise an optional `message`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Paging metadata as reported by the list endpoint.
///
/// The server has been seen to send numeric fields as strings, so every
/// count is parsed leniently and falls back to its default when missing or
/// unparseable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    #[serde(default = "one", deserialize_with = "lenient_i64_or_one")]
    pub current_page: i64,
    #[serde(default = "one", deserialize_with = "lenient_i64_or_one")]
    pub total_pages: i64,
    #[serde(default, deserialize_with = "lenient_i64_or_zero")]
    pub total_docs: i64,
    #[serde(default = "default_limit", deserialize_with = "lenient_i64_or_limit")]
    pub limit: i64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_next_page: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_prev_page: bool,
}

impl Default for ServerPagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_docs: 0,
            limit: DEFAULT_LIMIT,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// Page size the list endpoint is queried with unless told otherwise.
pub const DEFAULT_LIMIT: i64 = 5;

fn one() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Coerces a JSON number, numeric string, or null into an integer, the way
/// `parseInt` would: fractional parts are truncated, anything else is `None`.
fn coerce_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn lenient_i64_with<'de, D>(deserializer: D, fallback: i64) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match coerce_i64(&value) {
        // 0 counts as missing
        Some(0) | None => fallback,
        Some(n) => n,
    })
}

fn lenient_i64_or_one<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i64_with(deserializer, 1)
}

fn lenient_i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i64_with(deserializer, 0)
}

fn lenient_i64_or_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i64_with(deserializer, DEFAULT_LIMIT)
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_accepts_numeric_strings() {
        let json = r#"{"currentPage":"2","totalPages":"4","totalDocs":"17","limit":"5","hasNextPage":true,"hasPrevPage":true}"#;
        let p: ServerPagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.current_page, 2);
        assert_eq!(p.total_pages, 4);
        assert_eq!(p.total_docs, 17);
        assert_eq!(p.limit, 5);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);
    }

    #[test]
    fn pagination_missing_fields_use_defaults() {
        let p: ServerPagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p, ServerPagination::default());
    }

    #[test]
    fn pagination_garbage_falls_back() {
        let json = r#"{"currentPage":"abc","totalPages":null,"totalDocs":"x","limit":0,"hasNextPage":null}"#;
        let p: ServerPagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_docs, 0);
        assert_eq!(p.limit, 5);
        assert!(!p.has_next_page);
    }

    #[test]
    fn message_response_tolerates_extra_fields() {
        let r: MessageResponse =
            serde_json::from_str(r#"{"message":"Reminder created","data":{"id":"1"}}"#).unwrap();
        assert_eq!(r.message.as_deref(), Some("Reminder created"));
    }
}
