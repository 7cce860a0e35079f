//! Log schema detection, repair and parsing.
//!
//! The contract emitted two generations of log lines:
//!
//! ```text
//! EVENT_JSON:{"standard":"nep171","version":"1.0.0","event":"nft_mint","data":[{...}]}
//! {"type":"nft_create_series","params":{...}}
//! ```
//!
//! The first is not valid JSON because of the bare `EVENT_JSON` prefix, so it
//! is repaired into `{"EVENT_JSON":{...}}` before parsing.

use serde_json::{Map, Value};

pub const WRAPPED_EVENT_PREFIX: &str = "EVENT_JSON";
const LEGACY_TYPED_PREFIX: &str = "{\"type\"";

/// Which log convention a raw line follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSchema {
    /// `EVENT_JSON:{...}` (NEP-171 style event emission).
    WrappedEvent,
    /// `{"type":...,"params":{...}}` (pre-standard emission).
    LegacyTyped,
    Unrecognized,
}

impl LogSchema {
    /// Classify a line by the text before its first `:`.
    pub fn detect(line: &str) -> Self {
        match line.split_once(':') {
            Some((WRAPPED_EVENT_PREFIX, _)) => LogSchema::WrappedEvent,
            Some((LEGACY_TYPED_PREFIX, _)) => LogSchema::LegacyTyped,
            _ => LogSchema::Unrecognized,
        }
    }
}

/// Turn `EVENT_JSON:{...}` into `{"EVENT_JSON":{...}}`.
///
/// Only the first `:` is touched; colons inside the payload are preserved.
/// Returns `None` when the line does not carry the wrapped-event prefix.
pub fn repair_wrapped_event(line: &str) -> Option<String> {
    let (prefix, payload) = line.split_once(':')?;
    if prefix != WRAPPED_EVENT_PREFIX {
        return None;
    }
    Some(format!("{{\"{}\":{}}}", WRAPPED_EVENT_PREFIX, payload))
}

/// A successfully parsed log line.
#[derive(Debug, Clone, PartialEq)]
pub enum EventLog {
    /// The payload object found under the `EVENT_JSON` key.
    Wrapped(Map<String, Value>),
    /// The whole legacy object.
    Legacy(Map<String, Value>),
}

impl EventLog {
    /// Detect, repair and parse a raw log line.
    ///
    /// Unrecognized lines, invalid JSON and non-object payloads yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match LogSchema::detect(line) {
            LogSchema::WrappedEvent => {
                let repaired = repair_wrapped_event(line)?;
                let mut root = parse_object(&repaired)?;
                match root.remove(WRAPPED_EVENT_PREFIX)? {
                    Value::Object(payload) => Some(EventLog::Wrapped(payload)),
                    other => {
                        tracing::debug!(kind = json_kind(&other), "EVENT_JSON payload is not an object");
                        None
                    }
                }
            }
            LogSchema::LegacyTyped => parse_object(line).map(EventLog::Legacy),
            LogSchema::Unrecognized => None,
        }
    }

    pub fn schema(&self) -> LogSchema {
        match self {
            EventLog::Wrapped(_) => LogSchema::WrappedEvent,
            EventLog::Legacy(_) => LogSchema::LegacyTyped,
        }
    }
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "log line is not a JSON object");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "log line is not valid JSON");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Header keys of a wrapped-event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrappedKey {
    Standard,
    Version,
    Event,
    Data,
}

impl WrappedKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "standard" => Some(WrappedKey::Standard),
            "version" => Some(WrappedKey::Version),
            "event" => Some(WrappedKey::Event),
            "data" => Some(WrappedKey::Data),
            _ => None,
        }
    }
}

/// Top-level keys of a legacy-typed log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyKey {
    Type,
    Params,
}

impl LegacyKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "type" => Some(LegacyKey::Type),
            "params" => Some(LegacyKey::Params),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_schemas() {
        assert_eq!(
            LogSchema::detect(r#"EVENT_JSON:{"standard":"nep171"}"#),
            LogSchema::WrappedEvent
        );
        assert_eq!(
            LogSchema::detect(r#"{"type":"nft_mint","params":{}}"#),
            LogSchema::LegacyTyped
        );
        assert_eq!(LogSchema::detect(r#"{"params":{},"type":"x"}"#), LogSchema::Unrecognized);
        assert_eq!(LogSchema::detect("EVENT_JSON"), LogSchema::Unrecognized);
        assert_eq!(LogSchema::detect("Transfer 1 from a to b"), LogSchema::Unrecognized);
        assert_eq!(LogSchema::detect(""), LogSchema::Unrecognized);
    }

    #[test]
    fn test_repair_wrapped_event() {
        let repaired = repair_wrapped_event(r#"EVENT_JSON:{"standard":"nep171"}"#).unwrap();
        assert_eq!(repaired, r#"{"EVENT_JSON":{"standard":"nep171"}}"#);

        let value: Value = serde_json::from_str(&repaired).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object["EVENT_JSON"].is_object());
    }

    #[test]
    fn test_repair_keeps_colons_in_payload() {
        let line = r#"EVENT_JSON:{"data":[{"token_ids":["42:7"],"memo":"a:b"}]}"#;
        let repaired = repair_wrapped_event(line).unwrap();
        assert_eq!(
            repaired,
            r#"{"EVENT_JSON":{"data":[{"token_ids":["42:7"],"memo":"a:b"}]}}"#
        );
    }

    #[test]
    fn test_repair_rejects_other_prefixes() {
        assert_eq!(repair_wrapped_event(r#"{"type":"x"}"#), None);
        assert_eq!(repair_wrapped_event("no delimiter"), None);
    }

    #[test]
    fn test_parse_wrapped_event() {
        let log = EventLog::parse(r#"EVENT_JSON:{"standard":"nep171","event":"nft_mint","data":[]}"#)
            .unwrap();
        match log {
            EventLog::Wrapped(payload) => {
                assert_eq!(payload["standard"], "nep171");
                assert_eq!(payload["event"], "nft_mint");
            }
            other => panic!("expected wrapped event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_legacy_typed() {
        let log = EventLog::parse(r#"{"type":"nft_set_series_price","params":{"price":"1"}}"#)
            .unwrap();
        assert_eq!(log.schema(), LogSchema::LegacyTyped);
    }

    #[test]
    fn test_parse_malformed_lines() {
        assert_eq!(EventLog::parse(r#"EVENT_JSON:{"standard":"#), None);
        assert_eq!(EventLog::parse(r#"EVENT_JSON:"just a string""#), None);
        assert_eq!(EventLog::parse(r#"{"type":"x","params":"#), None);
        assert_eq!(EventLog::parse("plain text"), None);
    }

    #[test]
    fn test_key_tables() {
        assert_eq!(WrappedKey::from_key("data"), Some(WrappedKey::Data));
        assert_eq!(WrappedKey::from_key("Data"), None);
        assert_eq!(LegacyKey::from_key("params"), Some(LegacyKey::Params));
        assert_eq!(LegacyKey::from_key("event"), None);
    }
}
