use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Durable, append-only storage for the transaction ledger.
///
/// `append` must complete the write before returning; once written a
/// record is never edited or removed.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn append(&self, record: &Transaction) -> Result<()>;
    async fn load(&self) -> Result<Vec<Transaction>>;
}

pub type TransactionLogBox = Box<dyn TransactionLog>;

/// Whole-collection storage for payments and alerts: `save` replaces the
/// persisted collection with the given items.
#[async_trait]
pub trait SnapshotStore<T: Send + Sync>: Send + Sync {
    async fn save(&self, items: &[T]) -> Result<()>;
    async fn load(&self) -> Result<Vec<T>>;
}

pub type SnapshotStoreBox<T> = Box<dyn SnapshotStore<T>>;

/// Time source for workers and timestamping, injectable so tests can
/// simulate elapsed time instead of waiting in real time.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    async fn sleep(&self, duration: Duration);
}
