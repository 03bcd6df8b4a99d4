use serde::{Deserialize, Deserializer};

use crate::errors::{AppError, AppResult};

pub mod auth;
pub mod competencies;
pub mod cycles;
pub mod dashboard;
pub mod employees;
pub mod evaluations;
pub mod health;
pub mod nine_box;
pub mod pdis;
pub mod positions;
pub mod reports;
pub mod scoring;

/// Distinguishes an explicit `null` from an absent field in patch payloads.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Trimmed, non-empty, at most `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> AppResult<Option<String>> {
    value.map(|v| require_text(field, v, max_len)).transpose()
}

pub fn require_email(field: &str, value: &str) -> AppResult<String> {
    let value = require_text(field, value, 320)?;
    let valid = value
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
        .unwrap_or(false);
    if !valid {
        return Err(AppError::validation(format!("{field} is not a valid email")));
    }
    Ok(value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        leader_id: Option<Option<u32>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"leader_id":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"leader_id":7}"#).unwrap();

        assert_eq!(absent.leader_id, None);
        assert_eq!(null.leader_id, Some(None));
        assert_eq!(value.leader_id, Some(Some(7)));
    }

    #[test]
    fn text_rules() {
        assert_eq!(require_text("name", "  Ana  ", 10).unwrap(), "Ana");
        assert!(require_text("name", "   ", 10).is_err());
        assert!(require_text("name", "abcdefghijk", 10).is_err());
        assert_eq!(optional_text("note", None, 5).unwrap(), None);
    }

    #[test]
    fn email_rules() {
        assert_eq!(require_email("email", "Ana@Example.com").unwrap(), "ana@example.com");
        assert!(require_email("email", "ana.example.com").is_err());
        assert!(require_email("email", "ana@localhost").is_err());
    }
}
