//! Transformation of NEAR receipts into NFT event records.
//!
//! # Architecture
//!
//! ```text
//! ReceiptWithOutcome ──► NftEventIndexer ──► EventBuilders ──► EventRecords ──► RecordSink
//!                              │
//!                              └─► ReceiptContext
//!                                   ├─ Receipt id
//!                                   ├─ ReceiptEnvelope (block, signer, outcome)
//!                                   └─ Outcome log lines
//! ```
//!
//! Each recognized contract method has a [`MethodSpec`] naming which log line
//! it reads, which log schemas it accepts and when it saves a record. The
//! builders in [`event`] fill typed records from a parsed log.

pub mod context;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod event;
pub mod method;
pub mod records;
pub mod traits;

// Re-exports for convenience
pub use context::ReceiptContext;
pub use engine::NftEventIndexer;
pub use envelope::ReceiptEnvelope;
pub use error::TransformationError;
pub use method::{AcceptedSchemas, LogBinding, MethodSpec, NftMethod, SavePolicy};
pub use records::EventRecord;
pub use traits::EventBuilder;
