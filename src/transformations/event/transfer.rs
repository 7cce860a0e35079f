//! `nft_transfer`: the NEP-171 transfer event (second log line).

use serde_json::Value;

use crate::decoding::fields::text;
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftTransfer};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftTransfer {
    const METHOD: NftMethod = NftMethod::Transfer;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::event::test_support::build_from_line;

    #[test]
    fn test_wrapped_transfer() {
        let records = build_from_line::<NftTransfer>(
            "r3",
            r#"EVENT_JSON:{"standard":"nep171","version":"1.0.0","event":"nft_transfer","data":[{"old_owner_id":"alice.near","new_owner_id":"bob.near","token_ids":["5:2"],"authorized_id":"market.near"}]}"#,
        );

        let EventRecord::Transfer(t) = &records[0] else {
            panic!("expected transfer record");
        };
        assert_eq!(t.meta.event.as_deref(), Some("nft_transfer"));
        assert_eq!(t.old_owner_id.as_deref(), Some("alice.near"));
        assert_eq!(t.new_owner_id.as_deref(), Some("bob.near"));
        assert_eq!(t.token.token_series_id.as_deref(), Some("5"));
        assert_eq!(t.token.token_id.as_deref(), Some("2"));
    }
}
