use crate::domain::account::Account;
use crate::domain::alert::{Alert, Severity};
use crate::domain::ports::SnapshotStoreBox;
use crate::error::{BankError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Threshold configuration for the alert rules.
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    /// Only accounts in this currency are subject to the low-balance rule.
    pub home_currency: String,
    /// Balances below this raise a medium low-balance alert.
    pub low_balance_threshold: Decimal,
    /// Balances below this raise the alert at high severity.
    pub severe_balance_threshold: Decimal,
}

/// Evaluates alert rules after every balance mutation and owns the
/// persisted alert collection.
///
/// There is no suppression window: repeated evaluations under an
/// unchanged condition append a new alert every time.
pub struct AlertEngine {
    policy: AlertPolicy,
    alerts: Vec<Alert>,
    sequence: u64,
    store: SnapshotStoreBox<Alert>,
}

impl AlertEngine {
    pub async fn open(policy: AlertPolicy, store: SnapshotStoreBox<Alert>) -> Result<Self> {
        let alerts = store.load().await?;
        let sequence = alerts.len() as u64;
        Ok(Self {
            policy,
            alerts,
            sequence,
            store,
        })
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Runs both rules against the account's current balance. Both may
    /// fire in the same call; each firing appends a new alert. Persists
    /// the collection when anything fired.
    pub async fn evaluate(&mut self, account: &Account, now: DateTime<Utc>) -> Result<Vec<Alert>> {
        let mut fired = Vec::new();

        if account.currency == self.policy.home_currency
            && account.balance < self.policy.low_balance_threshold
        {
            let severity = if account.balance < self.policy.severe_balance_threshold {
                Severity::High
            } else {
                Severity::Medium
            };
            let message = format!(
                "Low balance warning: {} has {} {}",
                account.account_name, account.balance, account.currency
            );
            fired.push(self.build(account, severity, message, now));
        }

        if account.balance < Decimal::ZERO {
            let message = format!(
                "OVERDRAFT: {} is {} {} overdrawn",
                account.account_name,
                account.balance.abs(),
                account.currency
            );
            fired.push(self.build(account, Severity::High, message, now));
        }

        if !fired.is_empty() {
            self.alerts.extend(fired.iter().cloned());
            self.store.save(&self.alerts).await?;
        }
        Ok(fired)
    }

    pub async fn acknowledge(&mut self, alert_id: &str) -> Result<Alert> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|alert| alert.alert_id == alert_id)
            .ok_or_else(|| BankError::AlertNotFound(alert_id.to_string()))?;
        alert.acknowledged = true;
        let acknowledged = alert.clone();
        self.store.save(&self.alerts).await?;
        Ok(acknowledged)
    }

    pub(crate) async fn persist(&self) -> Result<()> {
        self.store.save(&self.alerts).await
    }

    fn build(
        &mut self,
        account: &Account,
        severity: Severity,
        message: String,
        now: DateTime<Utc>,
    ) -> Alert {
        self.sequence += 1;
        Alert {
            alert_id: format!("ALT{:08}", self.sequence),
            account_id: account.account_id.clone(),
            severity,
            message,
            timestamp: now,
            acknowledged: false,
        }
    }
}
