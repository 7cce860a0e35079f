pub mod indexer;
pub mod persistence;

pub use indexer::IndexerConfig;
pub use persistence::PersistenceConfig;
