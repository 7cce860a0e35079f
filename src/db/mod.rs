pub mod error;
pub mod migrations;
pub mod pool;
pub mod rows;
pub mod sink;
pub mod types;

pub use error::DbError;
pub use pool::DbPool;
pub use sink::{MemorySink, RecordSink};
pub use types::{DbOperation, DbValue};
