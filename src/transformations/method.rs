//! The closed set of contract methods the indexer decodes, and how each one
//! binds to the outcome's log lines.
//!
//! The binding is a fixed contract with the emitting contract: some methods
//! emit an auxiliary log before the event log, and the series/batch methods
//! emit one log line per created item.

use std::fmt;

use crate::decoding::LogSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NftMethod {
    Mint,
    Buy,
    CreateSeries,
    SetSeriesPrice,
    OnApprove,
    TransferPayout,
    DecreaseSeriesCopies,
    MintBatch,
    Transfer,
}

/// Which log line(s) a method's event is decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBinding {
    /// A single line at this index; one record keyed on the receipt id.
    Line(usize),
    /// Every line; one record per line keyed `<receipt_id>-<line>`.
    EveryLine,
}

/// Log conventions a method understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedSchemas {
    WrappedOrLegacy,
    WrappedOnly,
    LegacyOnly,
}

impl AcceptedSchemas {
    pub fn accepts(self, schema: LogSchema) -> bool {
        match (self, schema) {
            (_, LogSchema::Unrecognized) => false,
            (AcceptedSchemas::WrappedOrLegacy, _) => true,
            (AcceptedSchemas::WrappedOnly, schema) => schema == LogSchema::WrappedEvent,
            (AcceptedSchemas::LegacyOnly, schema) => schema == LogSchema::LegacyTyped,
        }
    }
}

/// When a record is handed to persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePolicy {
    /// Saved even if no log could be decoded (envelope only).
    Always,
    /// Saved only when an accepted log line was parsed.
    OnParsedLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    pub binding: LogBinding,
    pub schemas: AcceptedSchemas,
    pub save: SavePolicy,
}

impl NftMethod {
    pub const ALL: [NftMethod; 9] = [
        NftMethod::Mint,
        NftMethod::Buy,
        NftMethod::CreateSeries,
        NftMethod::SetSeriesPrice,
        NftMethod::OnApprove,
        NftMethod::TransferPayout,
        NftMethod::DecreaseSeriesCopies,
        NftMethod::MintBatch,
        NftMethod::Transfer,
    ];

    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "nft_mint" => Some(NftMethod::Mint),
            "nft_buy" => Some(NftMethod::Buy),
            "nft_create_series" => Some(NftMethod::CreateSeries),
            "nft_set_series_price" => Some(NftMethod::SetSeriesPrice),
            "nft_on_approve" => Some(NftMethod::OnApprove),
            "nft_transfer_payout" => Some(NftMethod::TransferPayout),
            "nft_decrease_series_copies" => Some(NftMethod::DecreaseSeriesCopies),
            "nft_mint_batch" => Some(NftMethod::MintBatch),
            "nft_transfer" => Some(NftMethod::Transfer),
            _ => None,
        }
    }

    pub fn method_name(self) -> &'static str {
        match self {
            NftMethod::Mint => "nft_mint",
            NftMethod::Buy => "nft_buy",
            NftMethod::CreateSeries => "nft_create_series",
            NftMethod::SetSeriesPrice => "nft_set_series_price",
            NftMethod::OnApprove => "nft_on_approve",
            NftMethod::TransferPayout => "nft_transfer_payout",
            NftMethod::DecreaseSeriesCopies => "nft_decrease_series_copies",
            NftMethod::MintBatch => "nft_mint_batch",
            NftMethod::Transfer => "nft_transfer",
        }
    }

    pub const fn spec(self) -> MethodSpec {
        use AcceptedSchemas::*;
        use LogBinding::*;
        use SavePolicy::*;

        let (binding, schemas, save) = match self {
            NftMethod::Mint => (Line(0), WrappedOrLegacy, Always),
            NftMethod::Buy => (Line(0), WrappedOnly, OnParsedLog),
            NftMethod::CreateSeries => (EveryLine, LegacyOnly, OnParsedLog),
            NftMethod::SetSeriesPrice => (Line(0), LegacyOnly, OnParsedLog),
            NftMethod::OnApprove => (Line(0), LegacyOnly, OnParsedLog),
            NftMethod::TransferPayout => (Line(1), WrappedOnly, OnParsedLog),
            NftMethod::DecreaseSeriesCopies => (Line(0), LegacyOnly, OnParsedLog),
            NftMethod::MintBatch => (EveryLine, LegacyOnly, Always),
            NftMethod::Transfer => (Line(1), WrappedOnly, OnParsedLog),
        };

        MethodSpec {
            binding,
            schemas,
            save,
        }
    }
}

impl fmt::Display for NftMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}
