use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PaymentStatus {
    /// Whether the lifecycle worker still has work to do on this payment.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

/// An outbound payment moving through `pending -> processing -> completed`.
///
/// `failed` is reached when completing the payment would push the source
/// account below the balance floor. Mutated only by the payment worker;
/// never deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub payment_id: String,
    pub from_account: String,
    pub to_reference: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_is_open() {
        assert!(PaymentStatus::Pending.is_open());
        assert!(PaymentStatus::Processing.is_open());
        assert!(!PaymentStatus::Completed.is_open());
        assert!(!PaymentStatus::Failed.is_open());
    }

    #[test]
    fn test_payment_round_trip() {
        let payment = Payment {
            payment_id: "PAY00000001".to_string(),
            from_account: "op_aud".to_string(),
            to_reference: "R1".to_string(),
            amount: dec!(500.00),
            currency: "AUD".to_string(),
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            processed_at: None,
            description: "Invoice 42".to_string(),
        };

        let json = serde_json::to_string(&payment).unwrap();
        assert!(json.contains("\"status\":\"pending\""));
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payment);
    }
}
