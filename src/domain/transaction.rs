use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    /// Direction implied by a signed delta; zero counts as a debit.
    pub fn of(delta: Decimal) -> Self {
        if delta > Decimal::ZERO {
            Self::Credit
        } else {
            Self::Debit
        }
    }
}

/// One immutable record of the append-only transaction log.
///
/// `amount` is an unsigned magnitude; `r#type` carries the sign.
/// `balance_after` is a snapshot of the account balance taken after the
/// mutation, not an independent computation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    pub r#type: Direction,
    pub description: String,
    pub balance_after: Decimal,
    pub currency: String,
}

impl Transaction {
    /// The magnitude with its sign applied, as used for replay.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_of_delta() {
        assert_eq!(Direction::of(dec!(1.00)), Direction::Credit);
        assert_eq!(Direction::of(dec!(-1.00)), Direction::Debit);
        assert_eq!(Direction::of(dec!(0)), Direction::Debit);
    }

    #[test]
    fn test_transaction_serializes_type_key() {
        let record = Transaction {
            transaction_id: "TXN00000001".to_string(),
            account_id: "op_aud".to_string(),
            timestamp: Utc::now(),
            amount: dec!(1000.00),
            r#type: Direction::Credit,
            description: "Customer payment received".to_string(),
            balance_after: dec!(17532.45),
            currency: "AUD".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"credit\""));
        assert!(json.contains("\"balance_after\":\"17532.45\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_signed_amount() {
        let mut record = Transaction {
            transaction_id: "TXN00000001".to_string(),
            account_id: "op_aud".to_string(),
            timestamp: Utc::now(),
            amount: dec!(25.50),
            r#type: Direction::Debit,
            description: "Utility bill".to_string(),
            balance_after: dec!(100.00),
            currency: "AUD".to_string(),
        };
        assert_eq!(record.signed_amount(), dec!(-25.50));
        record.r#type = Direction::Credit;
        assert_eq!(record.signed_amount(), dec!(25.50));
    }
}
