//! `nft_create_series`: one legacy typed log line per created series, carrying
//! the full NFT metadata block and an optional royalty split.

use serde_json::Value;

use super::royalty::expand_royalties;
use crate::decoding::fields::{amount, text};
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::method::NftMethod;
use crate::transformations::records::{
    EventRecord, LogMeta, NftCreateSeries, Royalty, SeriesMetadata,
};
use crate::transformations::traits::EventBuilder;

/// Builds a series record together with the royalty shares expanded from it.
#[derive(Debug, Default)]
pub struct SeriesBuilder {
    series: NftCreateSeries,
    royalties: Vec<Royalty>,
}

impl SeriesBuilder {
    fn apply_metadata(&mut self, metadata: &Value) {
        let Some(fields) = metadata.as_object() else {
            return;
        };

        let m: &mut SeriesMetadata = &mut self.series.metadata;
        for (key, value) in fields {
            match key.as_str() {
                "title" => m.title = text(value),
                "description" => m.description = text(value),
                "media" => m.media = text(value),
                "media_hash" => m.media_hash = text(value),
                "copies" => m.copies = amount(value),
                "issued_at" => m.issued_at = amount(value),
                "expires_at" => m.expires_at = amount(value),
                "starts_at" => m.starts_at = amount(value),
                "updated_at" => m.updated_at = amount(value),
                "extra" => m.extra = text(value),
                "reference" => m.reference = text(value),
                "reference_hash" => m.reference_hash = text(value),
                _ => {}
            }
        }
    }
}

impl EventBuilder for SeriesBuilder {
    const METHOD: NftMethod = NftMethod::CreateSeries;

    fn new(id: String, envelope: ReceiptEnvelope, log: Option<&str>) -> Self {
        Self {
            series: NftCreateSeries {
                id,
                envelope,
                log: log.map(str::to_string),
                ..Default::default()
            },
            royalties: Vec::new(),
        }
    }

    fn meta_mut(&mut self) -> &mut LogMeta {
        &mut self.series.meta
    }

    fn apply_param(&mut self, key: &str, value: &Value) {
        match key {
            "token_series_id" => self.series.token_series_id = text(value),
            "token_metadata" => self.apply_metadata(value),
            "creator_id" => self.series.creator_id = text(value),
            "price" => self.series.price = amount(value),
            "royalty" => {
                let shares = expand_royalties(&self.series.id, value);
                if let Some(last) = shares.last() {
                    self.series.royalty = Some(last.id.clone());
                }
                self.royalties.extend(shares);
            }
            _ => {}
        }
    }

    /// Royalty shares first, then the series that references the last one.
    fn into_records(self) -> Vec<EventRecord> {
        let mut records: Vec<EventRecord> =
            self.royalties.into_iter().map(EventRecord::from).collect();
        records.push(self.series.into());
        records
    }
}
