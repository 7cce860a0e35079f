//! `nft_on_approve`: marketplace listing created from an approval, with
//! optional auction terms.

use serde_json::Value;

use crate::decoding::fields::{amount, flag, identifier, text};
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{EventRecord, LogMeta, NftOnApprove};
use crate::transformations::traits::EventBuilder;

impl EventBuilder for NftOnApprove {
    const METHOD: NftMethod = NftMethod::OnApprove;

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
            "owner_id" => self.owner_id = text(value),
            "approval_id" => self.approval_id = identifier(value),
            "nft_contract_id" => self.nft_contract_id = text(value),
            "token_id" => {
                // A single composite id, occasionally wrapped in an array.
                let token = TokenRef::from_value(value).or_else(|| TokenRef::last_of(value));
                if let Some(token) = token {
                    self.token = token;
                }
            }
            "ft_token_id" => self.ft_token_id = text(value),
            "price" => self.price = amount(value),
            "started_at" => self.started_at = amount(value),
            "ended_at" => self.ended_at = amount(value),
            "end_price" => self.end_price = amount(value),
            "is_auction" => self.is_auction = flag(value),
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
    use alloy_primitives::U256;

    fn approve(line: &str) -> NftOnApprove {
        match build_from_line::<NftOnApprove>("r8", line).remove(0) {
            EventRecord::OnApprove(r) => r,
            other => panic!("expected on approve record, got {:?}", other),
        }
    }

    #[test]
    fn test_listing() {
        let r = approve(r#"{"type":"add_market_data","params":{"owner_id":"alice.near","approval_id":3,"nft_contract_id":"x.paras.near","token_id":"10:2","ft_token_id":"near","price":"1000000000000000000000000"}}"#);

        assert_eq!(r.meta.kind.as_deref(), Some("add_market_data"));
        assert_eq!(r.owner_id.as_deref(), Some("alice.near"));
        assert_eq!(r.approval_id.as_deref(), Some("3"));
        assert_eq!(r.nft_contract_id.as_deref(), Some("x.paras.near"));
        assert_eq!(r.token.token_series_id.as_deref(), Some("10"));
        assert_eq!(r.token.token_id.as_deref(), Some("2"));
        assert_eq!(r.ft_token_id.as_deref(), Some("near"));
        assert_eq!(r.price, Some(U256::from(10u64).pow(U256::from(24u64))));
        assert_eq!(r.is_auction, None);
    }

    #[test]
    fn test_auction_terms() {
        let r = approve(r#"{"type":"add_market_data","params":{"owner_id":"alice.near","token_id":"10:2","price":"1","started_at":1645000000000000000,"ended_at":"1645086400000000000","end_price":"5","is_auction":true}}"#);

        assert_eq!(r.started_at, Some(U256::from(1_645_000_000_000_000_000u64)));
        assert_eq!(r.ended_at, Some(U256::from(1_645_086_400_000_000_000u64)));
        assert_eq!(r.end_price, Some(U256::from(5u64)));
        assert_eq!(r.is_auction, Some(true));
    }

    #[test]
    fn test_null_auction_fields_are_unset() {
        let r = approve(r#"{"type":"add_market_data","params":{"started_at":null,"ended_at":null,"end_price":null,"is_auction":null}}"#);
        assert_eq!(r.started_at, None);
        assert_eq!(r.ended_at, None);
        assert_eq!(r.end_price, None);
        assert_eq!(r.is_auction, None);
    }
}
