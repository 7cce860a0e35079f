//! Decodes NFT marketplace contract logs carried by NEAR receipts into typed
//! event records and hands them to a persistence sink.
//!
//! ```ignore
//! use nft_event_indexer::db::DbPool;
//! use nft_event_indexer::{IndexerConfig, NftEventIndexer};
//!
//! let config = IndexerConfig::load("config/indexer.json")?;
//! let pool = DbPool::from_config(&config.persistence, &config.database_url()?).await?;
//! let indexer = NftEventIndexer::new(config);
//!
//! let receipt = NftEventIndexer::parse_receipt(&json)?;
//! indexer.index_receipt(&receipt, &pool).await?;
//! ```

pub mod db;
pub mod decoding;
pub mod transformations;
pub mod types;

pub use transformations::{EventRecord, NftEventIndexer, NftMethod, TransformationError};
pub use types::config::IndexerConfig;
pub use types::near::ReceiptWithOutcome;
