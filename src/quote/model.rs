use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Rejected input for a new quote. Nothing is mutated when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the quote text.")]
    EmptyText,
    #[error("Please enter a category for the quote.")]
    EmptyCategory,
}

/// A single text/category pair.
///
/// `text` doubles as the natural key when reconciling with the remote
/// endpoint: two quotes with equal text are the same quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    /// Last modification time. Absent on the seed set and on imported
    /// records that never carried one.
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quote {
    /// Build an unstamped quote. No validation is applied.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            updated_at: None,
        }
    }

    /// Build a quote stamped with `at`.
    pub fn stamped(text: impl Into<String>, category: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(at),
            ..Self::new(text, category)
        }
    }

    /// Validate user input and build a stamped quote from it.
    ///
    /// Both fields are trimmed; text is checked before category.
    pub fn from_input(text: &str, category: &str, at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(Self::stamped(text, category, at))
    }

    /// Natural key used during reconciliation.
    pub fn key(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.category)
    }
}

/// Timestamps written by older clients are epoch milliseconds; newer ones
/// are RFC 3339 strings. Accept both.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(Raw::Text(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn from_input_trims_fields() {
        let quote = Quote::from_input("  Stay hungry  ", " Life ", at()).unwrap();
        assert_eq!(quote.text, "Stay hungry");
        assert_eq!(quote.category, "Life");
        assert_eq!(quote.updated_at, Some(at()));
    }

    #[test]
    fn from_input_rejects_blank_text_first() {
        assert_eq!(Quote::from_input("   ", "", at()), Err(ValidationError::EmptyText));
        assert_eq!(Quote::from_input("x", "\t", at()), Err(ValidationError::EmptyCategory));
    }

    #[test]
    fn display_matches_list_format() {
        let quote = Quote::new("Do or do not.", "Motivation");
        assert_eq!(quote.to_string(), "\"Do or do not.\" — Motivation");
    }

    #[test]
    fn deserializes_millis_and_rfc3339_timestamps() {
        let millis: Quote =
            serde_json::from_str(r#"{"text":"a","category":"b","updatedAt":1714564800000}"#).unwrap();
        let text: Quote = serde_json::from_str(
            r#"{"text":"a","category":"b","updatedAt":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(millis.updated_at, Some(at()));
        assert_eq!(text.updated_at, Some(at()));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let quote: Quote = serde_json::from_str("{}").unwrap();
        assert_eq!(quote, Quote::new("", ""));
    }

    #[test]
    fn unstamped_quote_omits_updated_at() {
        let json = serde_json::to_string(&Quote::new("a", "b")).unwrap();
        assert_eq!(json, r#"{"text":"a","category":"b"}"#);
    }
}
