//! Query-string deserialization helpers.
//!
//! Browsers and admin dashboards routinely send `?status=&courseId=` with empty
//! values. These helpers treat an empty string as an absent parameter.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

pub fn deserialize_bool_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(
        opt.as_deref().map(str::trim),
        Some("true") | Some("1")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        search: Option<String>,
        #[serde(default, deserialize_with = "deserialize_bool_flag")]
        unread: bool,
    }

    #[test]
    fn test_empty_values_are_absent() {
        let params: Params = serde_json::from_str(
            r#"{"id": "", "page": " ", "search": "   ", "unread": ""}"#,
        )
        .unwrap();
        assert!(params.id.is_none());
        assert!(params.page.is_none());
        assert!(params.search.is_none());
        assert!(!params.unread);
    }

    #[test]
    fn test_values_are_trimmed_and_parsed() {
        let id = Uuid::new_v4();
        let params: Params = serde_json::from_value(serde_json::json!({
            "id": format!(" {id} "),
            "page": "3",
            "search": "  rust ",
            "unread": "1"
        }))
        .unwrap();
        assert_eq!(params.id, Some(id));
        assert_eq!(params.page, Some(3));
        assert_eq!(params.search.as_deref(), Some("rust"));
        assert!(params.unread);
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let result: Result<Params, _> = serde_json::from_str(r#"{"page": "two"}"#);
        assert!(result.is_err());
    }
}
