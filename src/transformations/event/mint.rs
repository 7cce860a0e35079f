//! `nft_mint`: wrapped NEP-171 mint events and the older typed mint log.

use serde_json::Value;

use crate::decoding::fields::text;
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftMint};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftMint {
    const METHOD: NftMethod = NftMethod::Mint;

    fn new(id: String, envelope: ReceiptEnvelope, _log: Option<&str>) -> Self {
        Self {
            id,
            envelope,
            ..Default::default()
        }
    }

    fn meta_mut(&mut self) -> &mut LogMeta {
        &mut self.meta
    }

    fn apply_data_field(&mut self, key: &str, value: &Value) {
        match key {
            "owner_id" => self.owner_id = text(value),
            "token_ids" => {
                if let Some(token) = TokenRef::last_of(value) {
                    self.token = token;
                }
            }
            _ => {}
        }
    }

    fn apply_param(&mut self, key: &str, value: &Value) {
        match key {
            "token_id" => {
                if let Some(token) = TokenRef::from_value(value) {
                    self.token = token;
                }
            }
            "sender_id" => self.sender_id = text(value),
            "receiver_id" => self.receive_id = text(value),
            _ => {}
        }
    }

    fn into_records(self) -> Vec<EventRecord> {
        vec![self.into()]
    }
}
