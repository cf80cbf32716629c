use crate::domain::account::{Account, Amount};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::SnapshotStoreBox;
use crate::error::{BankError, Result};
use chrono::{DateTime, Utc};

/// The persisted payment collection and its id sequence.
///
/// Submission happens here; lifecycle advancement lives in the bank
/// facade because it spans accounts, ledger and alerts.
pub struct PaymentBook {
    pub(crate) payments: Vec<Payment>,
    sequence: u64,
    store: SnapshotStoreBox<Payment>,
}

impl PaymentBook {
    pub async fn open(store: SnapshotStoreBox<Payment>) -> Result<Self> {
        let payments = store.load().await?;
        let sequence = payments.len() as u64;
        Ok(Self {
            payments,
            sequence,
            store,
        })
    }

    pub fn list(&self, status: Option<PaymentStatus>) -> Vec<Payment> {
        self.payments
            .iter()
            .filter(|payment| status.is_none_or(|wanted| payment.status == wanted))
            .cloned()
            .collect()
    }

    /// Creates a `pending` payment debiting the given source account and
    /// persists the collection before returning.
    pub async fn submit(
        &mut self,
        source: &Account,
        to_reference: &str,
        amount: Amount,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        if to_reference.trim().is_empty() {
            return Err(BankError::ValidationError(
                "destination reference must not be empty".to_string(),
            ));
        }

        self.sequence += 1;
        let payment = Payment {
            payment_id: format!("PAY{:08}", self.sequence),
            from_account: source.account_id.clone(),
            to_reference: to_reference.to_string(),
            amount: amount.value(),
            currency: source.currency.clone(),
            status: PaymentStatus::Pending,
            created_at: now,
            processed_at: None,
            description: description.to_string(),
        };
        self.payments.push(payment.clone());
        self.store.save(&self.payments).await?;
        Ok(payment)
    }

    pub(crate) async fn persist(&self) -> Result<()> {
        self.store.save(&self.payments).await
    }
}
