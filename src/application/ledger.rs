use crate::domain::account::Account;
use crate::domain::ports::TransactionLogBox;
use crate::domain::transaction::{Direction, Transaction};
use crate::error::Result;
use crate::money::quantize_balance;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The append-only transaction ledger.
///
/// Owns the durable log and the monotonic sequence counter. The counter
/// counts successful appends only; reloading the log from disk seeds it
/// to the record count.
pub struct Ledger {
    log: TransactionLogBox,
    sequence: u64,
}

impl Ledger {
    /// Opens the ledger, returning it together with the replayed records
    /// so the caller can restore dependent state (account balances).
    pub async fn open(log: TransactionLogBox) -> Result<(Self, Vec<Transaction>)> {
        let records = log.load().await?;
        let sequence = records.len() as u64;
        Ok((Self { log, sequence }, records))
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Appends a record for a mutation that has already been applied to
    /// the account: `balance_after` is a snapshot of the account's current
    /// balance, not a recomputation. The write is durable before the
    /// counter advances.
    pub async fn append(
        &mut self,
        account: &Account,
        magnitude: Decimal,
        direction: Direction,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let record = Transaction {
            transaction_id: format!("TXN{:08}", self.sequence + 1),
            account_id: account.account_id.clone(),
            timestamp: now,
            amount: quantize_balance(magnitude.abs()),
            r#type: direction,
            description: description.to_string(),
            balance_after: account.balance,
            currency: account.currency.clone(),
        };

        self.log.append(&record).await?;
        self.sequence += 1;
        Ok(record)
    }

    pub async fn load(&self) -> Result<Vec<Transaction>> {
        self.log.load().await
    }

    /// Most-recent-first listing. Filtering by account happens before the
    /// limit, and the limit keeps only the most recent records.
    pub async fn query(
        &self,
        account_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let mut records = self.log.load().await?;
        if let Some(id) = account_id {
            records.retain(|record| record.account_id == id);
        }
        let skip = records.len().saturating_sub(limit);
        let mut recent = records.split_off(skip);
        recent.reverse();
        Ok(recent)
    }
}
