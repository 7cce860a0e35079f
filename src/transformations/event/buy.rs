//! `nft_buy`: a wrapped mint event emitted for a primary-market purchase.

use serde_json::Value;

use crate::decoding::fields::text;
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftBuy};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftBuy {
    const METHOD: NftMethod = NftMethod::Buy;

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
            "memo" => self.memo = text(value),
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
    fn test_wrapped_buy() {
        let records = build_from_line::<NftBuy>(
            "r2",
            r#"EVENT_JSON:{"standard":"nep171","version":"1.0.0","event":"nft_mint","data":[{"owner_id":"carol.near","token_ids":["99:1"],"memo":"{\"type\":\"buy\"}"}]}"#,
        );

        let EventRecord::Buy(buy) = &records[0] else {
            panic!("expected buy record");
        };
        assert_eq!(buy.owner_id.as_deref(), Some("carol.near"));
        assert_eq!(buy.token.token_series_id.as_deref(), Some("99"));
        assert_eq!(buy.token.token_id.as_deref(), Some("1"));
        assert_eq!(buy.memo.as_deref(), Some("{\"type\":\"buy\"}"));
    }

    #[test]
    fn test_null_memo_is_unset() {
        let records = build_from_line::<NftBuy>(
            "r2",
            r#"EVENT_JSON:{"data":[{"owner_id":"carol.near","memo":null}]}"#,
        );
        let EventRecord::Buy(buy) = &records[0] else {
            panic!("expected buy record");
        };
        assert_eq!(buy.memo, None);
    }
}
