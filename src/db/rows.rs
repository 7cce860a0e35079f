//! Record to row mapping.
//!
//! Each record becomes one upsert keyed on `id`. Column names match
//! `migrations/001_nft_events.sql`.

use alloy_primitives::U256;

use super::types::{DbOperation, DbValue};
use crate::decoding::TokenRef;
use crate::transformations::envelope::ReceiptEnvelope;
use crate::transformations::records::{EventRecord, LogMeta, SeriesMetadata};

const KEY_COLUMN: &str = "id";

#[derive(Default)]
struct Row {
    columns: Vec<String>,
    values: Vec<DbValue>,
}

impl Row {
    fn keyed(id: &str) -> Self {
        let mut row = Self::default();
        row.push(KEY_COLUMN, DbValue::Text(id.to_string()));
        row
    }

    fn push(&mut self, column: &str, value: DbValue) -> &mut Self {
        self.columns.push(column.to_string());
        self.values.push(value);
        self
    }

    fn text(&mut self, column: &str, value: &Option<String>) -> &mut Self {
        self.push(column, DbValue::text(value))
    }

    fn numeric(&mut self, column: &str, value: &Option<U256>) -> &mut Self {
        self.push(column, DbValue::numeric(value))
    }

    fn bool(&mut self, column: &str, value: &Option<bool>) -> &mut Self {
        self.push(column, DbValue::bool(value))
    }

    fn envelope(&mut self, envelope: &ReceiptEnvelope) -> &mut Self {
        self.push("block_time", unsigned(envelope.block_time))
            .push("block_height", unsigned(envelope.block_height))
            .push("block_hash", DbValue::Text(envelope.block_hash.clone()))
            .push("predecessor_id", DbValue::Text(envelope.predecessor_id.clone()))
            .push("receiver_id", DbValue::Text(envelope.receiver_id.clone()))
            .push("signer_id", DbValue::Text(envelope.signer_id.clone()))
            .push(
                "signer_public_key",
                DbValue::Text(envelope.signer_public_key.clone()),
            )
            .push("gas_burned", DbValue::Numeric(Some(envelope.gas_burned.to_string())))
            .push("tokens_burned", DbValue::Numeric(Some(envelope.tokens_burned.clone())))
            .push("outcome_id", DbValue::Text(envelope.outcome_id.clone()))
            .push("executor_id", DbValue::Text(envelope.executor_id.clone()))
            .push(
                "outcome_block_hash",
                DbValue::Text(envelope.outcome_block_hash.clone()),
            )
    }

    fn meta(&mut self, meta: &LogMeta) -> &mut Self {
        self.text("type", &meta.kind)
            .text("standard", &meta.standard)
            .text("version", &meta.version)
            .text("event", &meta.event)
    }

    fn token(&mut self, token: &TokenRef) -> &mut Self {
        self.text("token_series_id", &token.token_series_id)
            .text("token_id", &token.token_id)
    }

    fn series_metadata(&mut self, metadata: &SeriesMetadata) -> &mut Self {
        self.text("title", &metadata.title)
            .text("description", &metadata.description)
            .text("media", &metadata.media)
            .text("media_hash", &metadata.media_hash)
            .numeric("copies", &metadata.copies)
            .numeric("issued_at", &metadata.issued_at)
            .numeric("expires_at", &metadata.expires_at)
            .numeric("starts_at", &metadata.starts_at)
            .numeric("updated_at", &metadata.updated_at)
            .text("extra", &metadata.extra)
            .text("reference", &metadata.reference)
            .text("reference_hash", &metadata.reference_hash)
    }

    fn into_upsert(self, table: &str) -> DbOperation {
        let update_columns = self
            .columns
            .iter()
            .filter(|c| c.as_str() != KEY_COLUMN)
            .cloned()
            .collect();

        DbOperation::Upsert {
            table: table.to_string(),
            columns: self.columns,
            values: self.values,
            conflict_columns: vec![KEY_COLUMN.to_string()],
            update_columns,
        }
    }
}

/// BIGINT when it fits, NUMERIC otherwise.
fn unsigned(value: u64) -> DbValue {
    i64::try_from(value)
        .map(DbValue::Int64)
        .unwrap_or_else(|_| DbValue::Numeric(Some(value.to_string())))
}

impl EventRecord {
    pub fn to_db_operation(&self) -> DbOperation {
        let mut row = Row::keyed(self.id());
        if let Some(envelope) = self.envelope() {
            row.envelope(envelope);
        }

        match self {
            EventRecord::Mint(r) => {
                row.meta(&r.meta)
                    .token(&r.token)
                    .text("owner_id", &r.owner_id)
                    .text("sender_id", &r.sender_id)
                    .text("receive_id", &r.receive_id);
            }
            EventRecord::Buy(r) => {
                row.meta(&r.meta)
                    .token(&r.token)
                    .text("owner_id", &r.owner_id)
                    .text("memo", &r.memo);
            }
            EventRecord::CreateSeries(r) => {
                row.text("log", &r.log)
                    .meta(&r.meta)
                    .text("token_series_id", &r.token_series_id)
                    .series_metadata(&r.metadata)
                    .text("creator_id", &r.creator_id)
                    .numeric("price", &r.price)
                    .text("royalty", &r.royalty);
            }
            EventRecord::Royalty(r) => {
                row.push("account", DbValue::Text(r.account.clone()))
                    .push("amount", DbValue::Numeric(Some(r.amount.to_string())));
            }
            EventRecord::SetSeriesPrice(r) => {
                row.text("log", &r.log)
                    .meta(&r.meta)
                    .text("token_series_id", &r.token_series_id)
                    .numeric("price", &r.price);
            }
            EventRecord::OnApprove(r) => {
                row.text("log", &r.log)
                    .meta(&r.meta)
                    .token(&r.token)
                    .text("owner_id", &r.owner_id)
                    .text("approval_id", &r.approval_id)
                    .text("nft_contract_id", &r.nft_contract_id)
                    .text("ft_token_id", &r.ft_token_id)
                    .numeric("price", &r.price)
                    .numeric("started_at", &r.started_at)
                    .numeric("ended_at", &r.ended_at)
                    .numeric("end_price", &r.end_price)
                    .bool("is_auction", &r.is_auction);
            }
            EventRecord::TransferPayout(r) => {
                row.meta(&r.meta)
                    .token(&r.token)
                    .text("authorized_id", &r.authorized_id)
                    .text("old_owner_id", &r.old_owner_id)
                    .text("new_owner_id", &r.new_owner_id);
            }
            EventRecord::DecreaseSeriesCopies(r) => {
                row.text("log", &r.log)
                    .meta(&r.meta)
                    .text("token_series_id", &r.token_series_id)
                    .numeric("copies", &r.copies)
                    .bool("is_non_mintable", &r.is_non_mintable);
            }
            EventRecord::MintBatch(r) => {
                row.text("log", &r.log)
                    .meta(&r.meta)
                    .token(&r.token)
                    .text("sender_id", &r.sender_id)
                    .text("receive_id", &r.receive_id);
            }
            EventRecord::Transfer(r) => {
                row.meta(&r.meta)
                    .token(&r.token)
                    .text("old_owner_id", &r.old_owner_id)
                    .text("new_owner_id", &r.new_owner_id);
            }
        }

        row.into_upsert(self.table())
    }
}
