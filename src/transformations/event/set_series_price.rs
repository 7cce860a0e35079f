//! `nft_set_series_price`: legacy typed log with the new series price.

use serde_json::Value;

use crate::decoding::fields::{amount, text};
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftSetSeriesPrice};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftSetSeriesPrice {
    const METHOD: NftMethod = NftMethod::SetSeriesPrice;

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
            "price" => self.price = amount(value),
            _ => {}
        }
    }

    fn into_records(self) -> Vec<EventRecord> {
        vec![self.into()]
    }
}
