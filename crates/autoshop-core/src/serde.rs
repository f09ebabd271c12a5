//! Serde helpers for query-string parameters, where absent values often
//! arrive as empty strings.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s).map(Some).map_err(serde::de::Error::custom),
    }
}

pub(crate) fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "super::deserialize_optional_uuid")]
        branch_id: Option<Uuid>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let q: Query = serde_json::from_str(r#"{"branch_id":""}"#).unwrap();
        assert!(q.branch_id.is_none());
        let q: Query = serde_json::from_str("{}").unwrap();
        assert!(q.branch_id.is_none());
    }

    #[test]
    fn test_parses_uuid() {
        let id = Uuid::new_v4();
        let q: Query = serde_json::from_str(&format!(r#"{{"branch_id":"{id}"}}"#)).unwrap();
        assert_eq!(q.branch_id, Some(id));
        assert!(serde_json::from_str::<Query>(r#"{"branch_id":"nope"}"#).is_err());
    }
}
