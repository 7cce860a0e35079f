//! `nft_mint_batch`: one legacy typed log line per minted token.

use serde_json::Value;

use crate::decoding::fields::text;
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftMintBatch};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftMintBatch {
    const METHOD: NftMethod = NftMethod::MintBatch;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::event::test_support::build_from_line;

    #[test]
    fn test_batch_line() {
        let records = build_from_line::<NftMintBatch>(
            "r7-1",
            r#"{"type":"nft_transfer","params":{"token_id":"300:4","sender_id":"","receiver_id":"erin.near"}}"#,
        );

        let EventRecord::MintBatch(r) = &records[0] else {
            panic!("expected batch mint record");
        };
        assert_eq!(r.id, "r7-1");
        assert_eq!(r.token.token_series_id.as_deref(), Some("300"));
        assert_eq!(r.token.token_id.as_deref(), Some("4"));
        assert_eq!(r.sender_id.as_deref(), Some(""));
        assert_eq!(r.receive_id.as_deref(), Some("erin.near"));
    }
}
