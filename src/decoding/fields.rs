//! Field coercions applied to values found in a parsed log.
//!
//! Every helper returns `None` rather than failing: a JSON null, a missing key
//! or a value of an unexpected kind simply leaves the destination field unset.

use std::str::FromStr;

use alloy_primitives::U256;
use serde_json::Value;

/// Sentinel stored for both halves of an empty composite token id.
pub const NONE_SENTINEL: &str = "none";

/// A string value, taken verbatim.
pub fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// A string, or a number rendered as its exact decimal text.
pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A non-negative integer given either as a JSON number or a numeric string.
///
/// Both `1500000000000000000000000` and `"1500000000000000000000000"` decode to
/// the same value. Fractions, negatives and non-numeric text are unset.
pub fn amount(value: &Value) -> Option<U256> {
    match value {
        Value::Number(n) => parse_digits(&n.to_string()),
        Value::String(s) => parse_digits(s),
        _ => None,
    }
}

/// Like [`amount`] but only the JSON number form is accepted.
pub fn whole_number(value: &Value) -> Option<U256> {
    match value {
        Value::Number(n) => parse_digits(&n.to_string()),
        _ => None,
    }
}

pub fn flag(value: &Value) -> Option<bool> {
    value.as_bool()
}

fn parse_digits(s: &str) -> Option<U256> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str(s).ok()
}

/// The two halves of a `"<series_id>:<token_id>"` string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRef {
    pub token_series_id: Option<String>,
    pub token_id: Option<String>,
}

impl TokenRef {
    /// Split once on the first `:`.
    ///
    /// An empty string yields `"none"` for both halves. A string without a
    /// delimiter is kept whole as the series id and leaves the token id unset.
    pub fn split(composite: &str) -> Self {
        if composite.is_empty() {
            return Self {
                token_series_id: Some(NONE_SENTINEL.to_string()),
                token_id: Some(NONE_SENTINEL.to_string()),
            };
        }

        match composite.split_once(':') {
            Some((series, token)) => Self {
                token_series_id: Some(series.to_string()),
                token_id: Some(token.to_string()),
            },
            None => Self {
                token_series_id: Some(composite.to_string()),
                token_id: None,
            },
        }
    }

    /// Split a composite id held in a JSON string value.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(Self::split)
    }

    /// Split every string in a `token_ids` array, keeping only the last one.
    ///
    /// Records hold a single token reference, so a multi-token log collapses
    /// to its final member. Non-string elements are skipped.
    pub fn last_of(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .filter_map(Self::from_value)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_composite() {
        let r = TokenRef::split("abc:123");
        assert_eq!(r.token_series_id.as_deref(), Some("abc"));
        assert_eq!(r.token_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_split_empty_uses_sentinel() {
        let r = TokenRef::split("");
        assert_eq!(r.token_series_id.as_deref(), Some("none"));
        assert_eq!(r.token_id.as_deref(), Some("none"));
    }

    #[test]
    fn test_split_without_delimiter_keeps_series_only() {
        let r = TokenRef::split("1234");
        assert_eq!(r.token_series_id.as_deref(), Some("1234"));
        assert_eq!(r.token_id, None);
    }

    #[test]
    fn test_split_only_on_first_delimiter() {
        let r = TokenRef::split("1:2:3");
        assert_eq!(r.token_series_id.as_deref(), Some("1"));
        assert_eq!(r.token_id.as_deref(), Some("2:3"));
    }

    #[test]
    fn test_token_ids_keep_last_member() {
        let ids = json!(["1:1", 5, "9:3"]);
        let r = TokenRef::last_of(&ids).unwrap();
        assert_eq!(r.token_series_id.as_deref(), Some("9"));
        assert_eq!(r.token_id.as_deref(), Some("3"));

        assert_eq!(TokenRef::last_of(&json!([])), None);
        assert_eq!(TokenRef::last_of(&json!("1:1")), None);
    }

    #[test]
    fn test_amount_number_and_string_agree() {
        let from_number: Value = serde_json::from_str("1500000000000000000000000").unwrap();
        let from_string = json!("1500000000000000000000000");

        let expected = U256::from(1_500_000_000_000_000_000_000_000u128);
        assert_eq!(amount(&from_number), Some(expected));
        assert_eq!(amount(&from_string), Some(expected));
    }

    #[test]
    fn test_amount_rejects_other_kinds() {
        assert_eq!(amount(&Value::Null), None);
        assert_eq!(amount(&json!(true)), None);
        assert_eq!(amount(&json!("12abc")), None);
        assert_eq!(amount(&json!("-5")), None);
        assert_eq!(amount(&json!(1.5)), None);
        assert_eq!(amount(&json!({"v": 1})), None);
    }

    #[test]
    fn test_whole_number_ignores_strings() {
        assert_eq!(whole_number(&json!(1000)), Some(U256::from(1000u64)));
        assert_eq!(whole_number(&json!("1000")), None);
    }

    #[test]
    fn test_text_and_identifier() {
        assert_eq!(text(&json!("alice.near")), Some("alice.near".to_string()));
        assert_eq!(text(&Value::Null), None);
        assert_eq!(text(&json!(3)), None);
        assert_eq!(identifier(&json!(3)), Some("3".to_string()));
        assert_eq!(identifier(&json!("3")), Some("3".to_string()));
        assert_eq!(flag(&json!(false)), Some(false));
        assert_eq!(flag(&json!("false")), None);
    }
}
