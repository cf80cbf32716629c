use crate::domain::ports::{SnapshotStore, TransactionLog};
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory transaction log for tests and ephemeral runs.
#[derive(Default, Clone)]
pub struct InMemoryLog {
    records: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryLog {
    async fn append(&self, record: &Transaction) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Transaction>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}

/// In-memory snapshot store for tests and ephemeral runs.
#[derive(Clone)]
pub struct InMemorySnapshot<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> InMemorySnapshot<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> Default for InMemorySnapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for InMemorySnapshot<T>
where
    T: Clone + Send + Sync,
{
    async fn save(&self, items: &[T]) -> Result<()> {
        let mut stored = self.items.write().await;
        *stored = items.to_vec();
        Ok(())
    }

    async fn load(&self) -> Result<Vec<T>> {
        let stored = self.items.read().await;
        Ok(stored.clone())
    }
}
