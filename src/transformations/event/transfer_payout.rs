//! `nft_transfer_payout`: a marketplace-authorized transfer (second log line).

use serde_json::Value;

use crate::decoding::fields::text;
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftTransferPayout};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftTransferPayout {
    const METHOD: NftMethod = NftMethod::TransferPayout;

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
            "authorized_id" => self.authorized_id = text(value),
            "old_owner_id" => self.old_owner_id = text(value),
            "new_owner_id" => self.new_owner_id = text(value),
            "token_ids" => {
                if let Some(token) = TokenRef::last_of(value) {
                    self.token = token;
                }
            }
            _ => {}
        }
    }

    fn into_records(self) -> Vec<EventRecord> {
        vec![self.into()]
    }
}
