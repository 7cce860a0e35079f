//! Typed event records produced from a receipt.
//!
//! Every record carries the receipt envelope plus the fields its log schema
//! provides. Fields the log does not provide stay `None`.

use alloy_primitives::U256;

use super::envelope::ReceiptEnvelope;
use super::method::NftMethod;
use crate::decoding::TokenRef;

/// Header fields common to both log schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogMeta {
    /// Legacy `type` value.
    pub kind: Option<String>,
    pub standard: Option<String>,
    pub version: Option<String>,
    pub event: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftMint {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub owner_id: Option<String>,
    pub sender_id: Option<String>,
    pub receive_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftBuy {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub owner_id: Option<String>,
    pub memo: Option<String>,
}

/// NFT metadata block of a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media: Option<String>,
    pub media_hash: Option<String>,
    pub copies: Option<U256>,
    pub issued_at: Option<U256>,
    pub expires_at: Option<U256>,
    pub starts_at: Option<U256>,
    pub updated_at: Option<U256>,
    pub extra: Option<String>,
    pub reference: Option<String>,
    pub reference_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftCreateSeries {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub log: Option<String>,
    pub meta: LogMeta,
    pub token_series_id: Option<String>,
    pub metadata: SeriesMetadata,
    pub creator_id: Option<String>,
    pub price: Option<U256>,
    /// Id of the last royalty share expanded from this series' log.
    pub royalty: Option<String>,
}

/// One account's share of a series' royalties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Royalty {
    pub id: String,
    pub account: String,
    pub amount: U256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftSetSeriesPrice {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub log: Option<String>,
    pub meta: LogMeta,
    pub token_series_id: Option<String>,
    pub price: Option<U256>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftOnApprove {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub log: Option<String>,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub owner_id: Option<String>,
    pub approval_id: Option<String>,
    pub nft_contract_id: Option<String>,
    pub ft_token_id: Option<String>,
    pub price: Option<U256>,
    pub started_at: Option<U256>,
    pub ended_at: Option<U256>,
    pub end_price: Option<U256>,
    pub is_auction: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftTransferPayout {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub authorized_id: Option<String>,
    pub old_owner_id: Option<String>,
    pub new_owner_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftDecreaseSeriesCopies {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub log: Option<String>,
    pub meta: LogMeta,
    pub token_series_id: Option<String>,
    pub copies: Option<U256>,
    pub is_non_mintable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftMintBatch {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub log: Option<String>,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub sender_id: Option<String>,
    pub receive_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftTransfer {
    pub id: String,
    pub envelope: ReceiptEnvelope,
    pub meta: LogMeta,
    pub token: TokenRef,
    pub old_owner_id: Option<String>,
    pub new_owner_id: Option<String>,
}

/// A finished record, ready to be persisted under its `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    Mint(NftMint),
    Buy(NftBuy),
    CreateSeries(NftCreateSeries),
    Royalty(Royalty),
    SetSeriesPrice(NftSetSeriesPrice),
    OnApprove(NftOnApprove),
    TransferPayout(NftTransferPayout),
    DecreaseSeriesCopies(NftDecreaseSeriesCopies),
    MintBatch(NftMintBatch),
    Transfer(NftTransfer),
}

impl EventRecord {
    pub fn id(&self) -> &str {
        match self {
            EventRecord::Mint(r) => &r.id,
            EventRecord::Buy(r) => &r.id,
            EventRecord::CreateSeries(r) => &r.id,
            EventRecord::Royalty(r) => &r.id,
            EventRecord::SetSeriesPrice(r) => &r.id,
            EventRecord::OnApprove(r) => &r.id,
            EventRecord::TransferPayout(r) => &r.id,
            EventRecord::DecreaseSeriesCopies(r) => &r.id,
            EventRecord::MintBatch(r) => &r.id,
            EventRecord::Transfer(r) => &r.id,
        }
    }

    /// The contract method a record was decoded for. Royalty shares have none
    /// of their own.
    pub fn method(&self) -> Option<NftMethod> {
        match self {
            EventRecord::Mint(_) => Some(NftMethod::Mint),
            EventRecord::Buy(_) => Some(NftMethod::Buy),
            EventRecord::CreateSeries(_) => Some(NftMethod::CreateSeries),
            EventRecord::Royalty(_) => None,
            EventRecord::SetSeriesPrice(_) => Some(NftMethod::SetSeriesPrice),
            EventRecord::OnApprove(_) => Some(NftMethod::OnApprove),
            EventRecord::TransferPayout(_) => Some(NftMethod::TransferPayout),
            EventRecord::DecreaseSeriesCopies(_) => Some(NftMethod::DecreaseSeriesCopies),
            EventRecord::MintBatch(_) => Some(NftMethod::MintBatch),
            EventRecord::Transfer(_) => Some(NftMethod::Transfer),
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            EventRecord::Mint(_) => "nft_mint",
            EventRecord::Buy(_) => "nft_buy",
            EventRecord::CreateSeries(_) => "nft_create_series",
            EventRecord::Royalty(_) => "royalty",
            EventRecord::SetSeriesPrice(_) => "nft_set_series_price",
            EventRecord::OnApprove(_) => "nft_on_approve",
            EventRecord::TransferPayout(_) => "nft_transfer_payout",
            EventRecord::DecreaseSeriesCopies(_) => "nft_decrease_series_copies",
            EventRecord::MintBatch(_) => "nft_mint_batch",
            EventRecord::Transfer(_) => "nft_transfer",
        }
    }

    pub fn envelope(&self) -> Option<&ReceiptEnvelope> {
        match self {
            EventRecord::Mint(r) => Some(&r.envelope),
            EventRecord::Buy(r) => Some(&r.envelope),
            EventRecord::CreateSeries(r) => Some(&r.envelope),
            EventRecord::Royalty(_) => None,
            EventRecord::SetSeriesPrice(r) => Some(&r.envelope),
            EventRecord::OnApprove(r) => Some(&r.envelope),
            EventRecord::TransferPayout(r) => Some(&r.envelope),
            EventRecord::DecreaseSeriesCopies(r) => Some(&r.envelope),
            EventRecord::MintBatch(r) => Some(&r.envelope),
            EventRecord::Transfer(r) => Some(&r.envelope),
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for EventRecord {
                fn from(record: $ty) -> Self {
                    EventRecord::$variant(record)
                }
            }
        )*
    };
}

impl_from_record! {
    Mint => NftMint,
    Buy => NftBuy,
    CreateSeries => NftCreateSeries,
    Royalty => Royalty,
    SetSeriesPrice => NftSetSeriesPrice,
    OnApprove => NftOnApprove,
    TransferPayout => NftTransferPayout,
    DecreaseSeriesCopies => NftDecreaseSeriesCopies,
    MintBatch => NftMintBatch,
    Transfer => NftTransfer,
}
