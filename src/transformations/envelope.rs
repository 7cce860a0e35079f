//! Receipt metadata shared by every event record.

use crate::types::near::ReceiptWithOutcome;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Common receipt/outcome fields. Derived purely from receipt metadata, so
/// building one never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptEnvelope {
    /// Block time in milliseconds since the Unix epoch.
    pub block_time: u64,
    pub block_height: u64,
    pub block_hash: String,
    pub predecessor_id: String,
    pub receiver_id: String,
    pub signer_id: String,
    pub signer_public_key: String,
    pub gas_burned: u64,
    pub tokens_burned: String,
    pub outcome_id: String,
    pub executor_id: String,
    pub outcome_block_hash: String,
}

impl ReceiptEnvelope {
    pub fn from_receipt(rwo: &ReceiptWithOutcome) -> Self {
        let receipt = &rwo.receipt;
        let outcome = &rwo.outcome;

        Self {
            block_time: rwo.block.timestamp_nanosec / NANOS_PER_MILLI,
            block_height: rwo.block.height,
            block_hash: rwo.block.hash.to_base58(),
            predecessor_id: receipt.predecessor_id.clone(),
            receiver_id: receipt.receiver_id.clone(),
            signer_id: receipt.signer_id.clone(),
            signer_public_key: receipt.signer_public_key.to_base58(),
            gas_burned: outcome.gas_burnt,
            tokens_burned: outcome.tokens_burnt.clone(),
            outcome_id: outcome.id.to_base58(),
            executor_id: outcome.executor_id.clone(),
            outcome_block_hash: outcome.block_hash.to_base58(),
        }
    }
}
