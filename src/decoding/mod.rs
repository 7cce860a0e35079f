//! Decoding of raw contract log lines.
//!
//! - `schema`: recognizes the log convention, repairs wrapped events, parses JSON
//! - `fields`: coerces JSON values into record fields

pub mod fields;
pub mod schema;

pub use fields::TokenRef;
pub use schema::{EventLog, LogSchema};
