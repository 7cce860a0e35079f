//! Transformation error types.

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum TransformationError {
    /// The caller handed over a receipt that violates the input contract.
    #[error("Invalid receipt: {0}")]
    InvalidReceipt(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DbError),
}

impl From<serde_json::Error> for TransformationError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidReceipt(e.to_string())
    }
}
