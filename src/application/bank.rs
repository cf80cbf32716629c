use crate::application::accounts::AccountStore;
use crate::application::alerts::{AlertEngine, AlertPolicy};
use crate::application::cashflow::{self, CashFlowSummary, Period};
use crate::application::fx::FxBoard;
use crate::application::ledger::Ledger;
use crate::application::payments::PaymentBook;
use crate::config::BankConfig;
use crate::domain::account::{Account, Amount};
use crate::domain::alert::Alert;
use crate::domain::fx::FxRate;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{Clock, SnapshotStoreBox, TransactionLogBox};
use crate::domain::transaction::{Direction, Transaction};
use crate::error::{BankError, Result};
use crate::infrastructure::jsonl::JsonLinesLog;
use crate::infrastructure::snapshot::JsonSnapshot;
use crate::money::quantize_balance;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TRANSACTIONS_FILE: &str = "transactions.jsonl";
pub const PAYMENTS_FILE: &str = "payments.json";
pub const ALERTS_FILE: &str = "alerts.json";

/// A balance change requested by the balance simulator. The floor clamp
/// and the apply -> append -> evaluate ordering happen inside the bank.
#[derive(Debug, Clone)]
pub struct BalanceAdjustment {
    pub account_id: String,
    pub delta: Decimal,
    pub description: String,
}

/// The back-office core.
///
/// All mutable state sits behind one async mutex so that every mutation
/// sequence (apply delta, ledger append, alert evaluation) runs as a
/// single critical section; steps from different workers touching the
/// same account are linearized.
pub struct Bank {
    config: BankConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<BankInner>,
}

struct BankInner {
    accounts: AccountStore,
    ledger: Ledger,
    payments: PaymentBook,
    alerts: AlertEngine,
    fx: FxBoard,
}

impl Bank {
    /// Opens the bank: loads the payment and alert snapshots, replays the
    /// transaction log to seed the ledger sequence and restore account
    /// balances, and seeds accounts and FX rates from the config.
    pub async fn open(
        config: BankConfig,
        log: TransactionLogBox,
        payments_store: SnapshotStoreBox<Payment>,
        alerts_store: SnapshotStoreBox<Alert>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let now = clock.now();
        let mut accounts = AccountStore::new(&config.accounts, now);

        let (ledger, history) = Ledger::open(log).await?;
        // Walking the full history in order leaves each account at its
        // most recent balance_after snapshot.
        for record in &history {
            if accounts.contains(&record.account_id) {
                accounts.restore(&record.account_id, record.balance_after, record.timestamp)?;
            }
        }

        let payments = PaymentBook::open(payments_store).await?;
        let alerts = AlertEngine::open(
            AlertPolicy {
                home_currency: config.home_currency.clone(),
                low_balance_threshold: config.low_balance_threshold,
                severe_balance_threshold: config.severe_balance_threshold,
            },
            alerts_store,
        )
        .await?;
        let fx = FxBoard::new(&config.fx_rates, now);

        // Materialize the snapshot files so a fresh data dir is complete
        // before the first mutation.
        payments.persist().await?;
        alerts.persist().await?;

        Ok(Self {
            config,
            clock,
            inner: Mutex::new(BankInner {
                accounts,
                ledger,
                payments,
                alerts,
                fx,
            }),
        })
    }

    /// Opens the bank over the standard file layout inside `data_dir`.
    pub async fn open_dir(
        config: BankConfig,
        data_dir: &Path,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let log: TransactionLogBox = Box::new(JsonLinesLog::new(data_dir.join(TRANSACTIONS_FILE)));
        let payments: SnapshotStoreBox<Payment> =
            Box::new(JsonSnapshot::new(data_dir.join(PAYMENTS_FILE)));
        let alerts: SnapshotStoreBox<Alert> =
            Box::new(JsonSnapshot::new(data_dir.join(ALERTS_FILE)));
        Self::open(config, log, payments, alerts, clock).await
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub async fn list_accounts(&self) -> Vec<Account> {
        let inner = self.inner.lock().await;
        inner.accounts.list().to_vec()
    }

    pub async fn get_account(&self, account_id: &str) -> Result<Account> {
        let inner = self.inner.lock().await;
        inner.accounts.get(account_id).cloned()
    }

    pub async fn list_transactions(
        &self,
        account_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let inner = self.inner.lock().await;
        inner.ledger.query(account_id, limit).await
    }

    pub async fn ledger_sequence(&self) -> u64 {
        let inner = self.inner.lock().await;
        inner.ledger.sequence()
    }

    pub async fn submit_payment(
        &self,
        from_account: &str,
        to_reference: &str,
        amount: Amount,
        description: &str,
    ) -> Result<Payment> {
        let mut inner = self.inner.lock().await;
        let source = inner.accounts.get(from_account)?.clone();
        inner
            .payments
            .submit(&source, to_reference, amount, description, self.clock.now())
            .await
    }

    pub async fn list_payments(&self, status: Option<PaymentStatus>) -> Vec<Payment> {
        let inner = self.inner.lock().await;
        inner.payments.list(status)
    }

    pub async fn list_alerts(
        &self,
        account_id: Option<&str>,
        acknowledged: Option<bool>,
    ) -> Vec<Alert> {
        let inner = self.inner.lock().await;
        inner
            .alerts
            .alerts()
            .iter()
            .filter(|alert| account_id.is_none_or(|id| alert.account_id == id))
            .filter(|alert| acknowledged.is_none_or(|flag| alert.acknowledged == flag))
            .cloned()
            .collect()
    }

    pub async fn acknowledge_alert(&self, alert_id: &str) -> Result<Alert> {
        let mut inner = self.inner.lock().await;
        inner.alerts.acknowledge(alert_id).await
    }

    pub async fn list_fx_rates(&self) -> Vec<FxRate> {
        let inner = self.inner.lock().await;
        inner.fx.list().to_vec()
    }

    pub async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        let inner = self.inner.lock().await;
        inner.fx.convert(amount, from, to)
    }

    pub async fn cash_flow_summary(
        &self,
        account_id: &str,
        period: Period,
    ) -> Result<CashFlowSummary> {
        let inner = self.inner.lock().await;
        let account = inner.accounts.get(account_id)?.clone();
        let records = inner.ledger.load().await?;
        Ok(cashflow::summarize(
            &records,
            &account,
            period,
            self.clock.now(),
        ))
    }

    /// One balance-simulator step: clamp the delta against the balance
    /// floor, apply-and-record, then evaluate alerts, all inside one
    /// critical section.
    pub async fn apply_adjustment(&self, adjustment: &BalanceAdjustment) -> Result<Transaction> {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        inner
            .apply_adjustment(adjustment, self.config.balance_floor, now)
            .await
    }

    /// One payment-worker tick: advances every open payment against the
    /// current wall-clock time. Returns the number of state transitions.
    pub async fn process_due_payments(&self) -> Result<usize> {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        inner.process_due_payments(&self.config, now).await
    }

    /// One FX-feed tick.
    pub async fn drift_rates(&self, rng: &mut (impl Rng + Send)) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now();
        inner.fx.drift(rng, now);
    }
}

impl BankInner {
    /// The transactional apply-and-record unit: mutates the balance and
    /// appends the ledger record, rolling the mutation back if the append
    /// fails so the account and the log never diverge within a running
    /// process.
    async fn apply_and_record(
        &mut self,
        account_id: &str,
        delta: Decimal,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let previous = self.accounts.get(account_id)?.clone();
        self.accounts.apply_delta(account_id, delta, now)?;
        let account = self.accounts.get(account_id)?.clone();

        match self
            .ledger
            .append(&account, delta.abs(), Direction::of(delta), description, now)
            .await
        {
            Ok(record) => Ok(record),
            Err(err) => {
                self.accounts
                    .restore(account_id, previous.balance, previous.last_updated)?;
                Err(err)
            }
        }
    }

    async fn apply_adjustment(
        &mut self,
        adjustment: &BalanceAdjustment,
        floor: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let current = self.accounts.get(&adjustment.account_id)?.balance;
        // Quantizing the delta up front keeps the recorded magnitude
        // equal to the effective change, so replay stays consistent;
        // the floor clamp truncates the delta for the same reason.
        let delta = quantize_balance(adjustment.delta);
        let applied = if current + delta < floor {
            floor - current
        } else {
            delta
        };

        let record = self
            .apply_and_record(&adjustment.account_id, applied, &adjustment.description, now)
            .await?;
        let account = self.accounts.get(&adjustment.account_id)?.clone();
        self.alerts.evaluate(&account, now).await?;
        Ok(record)
    }

    async fn process_due_payments(
        &mut self,
        config: &BankConfig,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let mut advanced = 0;
        let mut dirty = false;
        let mut failure = None;

        for index in 0..self.payments.payments.len() {
            let payment = self.payments.payments[index].clone();
            if !payment.status.is_open() {
                continue;
            }

            let age = now
                .signed_duration_since(payment.created_at)
                .to_std()
                .unwrap_or_default();

            if age >= config.completion_delay {
                match self.complete_payment(&payment, config, now).await {
                    Ok(status) => {
                        let entry = &mut self.payments.payments[index];
                        entry.status = status;
                        entry.processed_at = Some(now);
                        dirty = true;
                        advanced += 1;
                    }
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            } else if payment.status == PaymentStatus::Pending && age >= config.processing_delay {
                self.payments.payments[index].status = PaymentStatus::Processing;
                dirty = true;
                advanced += 1;
            }
        }

        if dirty {
            self.payments.persist().await?;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(advanced),
        }
    }

    /// Lands the debit for a due payment, or decides it failed. A debit
    /// that would breach the balance floor fails the payment; a missing
    /// source account does too. Ordinary overdrafts complete and raise
    /// the overdraft alert via evaluation.
    async fn complete_payment(
        &mut self,
        payment: &Payment,
        config: &BankConfig,
        now: DateTime<Utc>,
    ) -> Result<PaymentStatus> {
        let current = match self.accounts.get(&payment.from_account) {
            Ok(account) => account.balance,
            Err(BankError::AccountNotFound(_)) => {
                tracing::warn!(
                    payment_id = %payment.payment_id,
                    account_id = %payment.from_account,
                    "payment failed: source account unknown"
                );
                return Ok(PaymentStatus::Failed);
            }
            Err(err) => return Err(err),
        };

        if quantize_balance(current - payment.amount) < config.balance_floor {
            tracing::warn!(
                payment_id = %payment.payment_id,
                account_id = %payment.from_account,
                "payment failed: debit would breach the balance floor"
            );
            return Ok(PaymentStatus::Failed);
        }

        let description = format!(
            "Payment to {}: {}",
            payment.to_reference, payment.description
        );
        self.apply_and_record(&payment.from_account, -payment.amount, &description, now)
            .await?;
        let account = self.accounts.get(&payment.from_account)?.clone();
        self.alerts.evaluate(&account, now).await?;
        Ok(PaymentStatus::Completed)
    }
}
