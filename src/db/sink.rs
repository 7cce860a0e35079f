//! Where finished records go.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::DbError;
use crate::transformations::records::EventRecord;

/// Persistence collaborator. `save` is called once per record, keyed on the
/// record's id; saving the same key again overwrites.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn save(&self, record: &EventRecord) -> Result<(), DbError>;

    async fn save_all(&self, records: &[EventRecord]) -> Result<(), DbError> {
        for record in records {
            self.save(record).await?;
        }
        Ok(())
    }
}

/// In-memory sink holding the last record saved per `(table, id)`.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<HashMap<(String, String), EventRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get(&self, table: &str, id: &str) -> Option<EventRecord> {
        self.lock()
            .get(&(table.to_string(), id.to_string()))
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), EventRecord>> {
        // A poisoned map is still a consistent map: every insert is a single call.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn save(&self, record: &EventRecord) -> Result<(), DbError> {
        self.lock().insert(
            (record.table().to_string(), record.id().to_string()),
            record.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::records::{NftBuy, Royalty};

    #[tokio::test]
    async fn test_memory_sink_overwrites_same_key() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let first = NftBuy {
            id: "r1".to_string(),
            memo: Some("first".to_string()),
            ..Default::default()
        };
        let second = NftBuy {
            memo: Some("second".to_string()),
            ..first.clone()
        };

        sink.save(&first.into()).await.unwrap();
        sink.save(&second.clone().into()).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get("nft_buy", "r1"), Some(EventRecord::Buy(second)));
    }

    #[tokio::test]
    async fn test_memory_sink_keys_by_table() {
        let sink = MemorySink::new();
        let records: Vec<EventRecord> = vec![
            Royalty {
                id: "r1".to_string(),
                account: "alice.near".to_string(),
                ..Default::default()
            }
            .into(),
            NftBuy {
                id: "r1".to_string(),
                ..Default::default()
            }
            .into(),
        ];

        sink.save_all(&records).await.unwrap();

        assert_eq!(sink.len(), 2);
        assert!(sink.get("royalty", "r1").is_some());
        assert!(sink.get("nft_mint", "r1").is_none());
    }
}
