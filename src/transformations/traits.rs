//! Core trait for event builders.
//!
//! A builder starts from the receipt envelope, receives the fields of one
//! parsed log line, and turns into the records to persist.

use serde_json::Value;

use super::envelope::ReceiptEnvelope;
use super::method::NftMethod;
use super::records::{EventRecord, LogMeta};

pub trait EventBuilder: Sized {
    /// The contract method this builder decodes.
    const METHOD: NftMethod;

    /// Start a record keyed on `id`. `log` is the raw line the record is bound
    /// to, if the outcome has one.
    fn new(id: String, envelope: ReceiptEnvelope, log: Option<&str>) -> Self;

    /// Header fields (`type`, `standard`, `version`, `event`).
    fn meta_mut(&mut self) -> &mut LogMeta;

    /// One key/value of an object inside a wrapped event's `data` array.
    /// Unknown keys are ignored.
    #[allow(unused_variables)]
    fn apply_data_field(&mut self, key: &str, value: &Value) {}

    /// One key/value of a legacy log's `params` object.
    /// Unknown keys are ignored.
    #[allow(unused_variables)]
    fn apply_param(&mut self, key: &str, value: &Value) {}

    /// Records to persist, in persistence order.
    fn into_records(self) -> Vec<EventRecord>;
}
