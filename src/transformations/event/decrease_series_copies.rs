//! `nft_decrease_series_copies`: legacy typed log with the reduced copy count.

use serde_json::Value;

use crate::decoding::fields::{amount, flag, text};
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftDecreaseSeriesCopies};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftDecreaseSeriesCopies {
    const METHOD: NftMethod = NftMethod::DecreaseSeriesCopies;

    fn new(id: String, envelope: ReceiptEnvelope, log: Option<&str>) -> Self {
        Self {
            id,
            envelope,
            log: log.map(str::to_string),
            ..Default::default()
        }
    }

    fn meta_mut(&mut self) -> &mut LogMeta {
        &mut self.meta
    }

    fn apply_param(&mut self, key: &str, value: &Value) {
        match key {
            "token_series_id" => self.token_series_id = text(value),
            "copies" => self.copies = amount(value),
            "is_non_mintable" => self.is_non_mintable = flag(value),
            _ => {}
        }
    }

    fn into_records(self) -> Vec<EventRecord> {
        vec![self.into()]
    }
}
