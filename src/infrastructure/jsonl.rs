use crate::domain::ports::TransactionLog;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Append-only transaction log persisted as newline-delimited JSON.
///
/// One record per line, never rewritten. Each append writes a single
/// complete line and syncs before returning, so a record is either fully
/// on disk or absent.
pub struct JsonLinesLog {
    path: PathBuf,
}

impl JsonLinesLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TransactionLog for JsonLinesLog {
    async fn append(&self, record: &Transaction) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::Direction;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn record(id: u64, account: &str) -> Transaction {
        Transaction {
            transaction_id: format!("TXN{id:08}"),
            account_id: account.to_string(),
            timestamp: Utc::now(),
            amount: dec!(10.00),
            r#type: Direction::Credit,
            description: "Customer payment received".to_string(),
            balance_after: dec!(110.00),
            currency: "AUD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let log = JsonLinesLog::new(dir.path().join("transactions.jsonl"));
        assert!(log.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let log = JsonLinesLog::new(dir.path().join("transactions.jsonl"));

        let first = record(1, "op_aud");
        let second = record(2, "sav_aud");
        log.append(&first).await.unwrap();
        log.append(&second).await.unwrap();

        let records = log.load().await.unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[tokio::test]
    async fn test_appends_survive_reopening_the_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.jsonl");

        let log = JsonLinesLog::new(&path);
        log.append(&record(1, "op_aud")).await.unwrap();
        drop(log);

        let reopened = JsonLinesLog::new(&path);
        reopened.append(&record(2, "op_aud")).await.unwrap();
        assert_eq!(reopened.load().await.unwrap().len(), 2);
    }
}
