//! Per-receipt context handed to event builders.

use super::envelope::ReceiptEnvelope;
use crate::types::near::ReceiptWithOutcome;

/// Everything a builder needs from one receipt: its id, the shared envelope
/// and checked access to the outcome's log lines.
#[derive(Debug, Clone)]
pub struct ReceiptContext<'a> {
    pub receipt_id: String,
    pub envelope: ReceiptEnvelope,
    logs: &'a [String],
}

impl<'a> ReceiptContext<'a> {
    pub fn new(rwo: &'a ReceiptWithOutcome) -> Self {
        Self {
            receipt_id: rwo.receipt_id(),
            envelope: ReceiptEnvelope::from_receipt(rwo),
            logs: &rwo.outcome.logs,
        }
    }

    /// The log line at `index`, if the outcome has one.
    pub fn log(&self, index: usize) -> Option<&'a str> {
        self.logs.get(index).map(String::as_str)
    }

    pub fn logs(&self) -> &'a [String] {
        self.logs
    }

    /// Key for a record built from one of several log lines.
    pub fn line_record_id(&self, line: usize) -> String {
        format!("{}-{}", self.receipt_id, line)
    }
}
