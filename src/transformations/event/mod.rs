//! Event builders, one module per contract method.
//!
//! `apply_log` walks the parts of a parsed log every builder shares (the
//! header keys, the wrapped `data` array, the legacy `params` object) and
//! hands each remaining key/value to the builder.

pub mod buy;
pub mod create_series;
pub mod decrease_series_copies;
pub mod mint;
pub mod mint_batch;
pub mod on_approve;
pub mod royalty;
pub mod set_series_price;
pub mod transfer;
pub mod transfer_payout;

use serde_json::Value;

use super::traits::EventBuilder;
use crate::decoding::fields::text;
use crate::decoding::schema::{LegacyKey, WrappedKey};
use crate::decoding::EventLog;

/// Feed every recognized field of `log` into `builder`.
pub fn apply_log<B: EventBuilder>(builder: &mut B, log: &EventLog) {
    match log {
        EventLog::Wrapped(payload) => {
            for (key, value) in payload {
                match WrappedKey::from_key(key) {
                    Some(WrappedKey::Standard) => builder.meta_mut().standard = text(value),
                    Some(WrappedKey::Version) => builder.meta_mut().version = text(value),
                    Some(WrappedKey::Event) => builder.meta_mut().event = text(value),
                    Some(WrappedKey::Data) => apply_data(builder, value),
                    None => {}
                }
            }
        }
        EventLog::Legacy(root) => {
            for (key, value) in root {
                match LegacyKey::from_key(key) {
                    Some(LegacyKey::Type) => builder.meta_mut().kind = text(value),
                    Some(LegacyKey::Params) => {
                        if let Some(params) = value.as_object() {
                            for (key, value) in params {
                                builder.apply_param(key, value);
                            }
                        }
                    }
                    None => {}
                }
            }
        }
    }
}

fn apply_data<B: EventBuilder>(builder: &mut B, data: &Value) {
    let Some(entries) = data.as_array() else {
        return;
    };

    for entry in entries.iter().filter_map(Value::as_object) {
        for (key, value) in entry {
            builder.apply_data_field(key, value);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::transformations::envelope::ReceiptEnvelope;
    use crate::transformations::records::EventRecord;

    /// Build the records `B` produces for a single raw line.
    pub fn build_from_line<B: EventBuilder>(id: &str, line: &str) -> Vec<EventRecord> {
        let log = EventLog::parse(line).expect("test line should parse");
        let mut builder = B::new(id.to_string(), ReceiptEnvelope::default(), Some(line));
        apply_log(&mut builder, &log);
        builder.into_records()
    }
}
