use crate::error::BankError;
use crate::money::quantize_balance;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A strictly positive monetary amount, quantized to 2 decimal places.
///
/// Wraps `rust_decimal::Decimal` so payment submissions cannot carry a
/// zero or negative amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, BankError> {
        if value > Decimal::ZERO {
            Ok(Self(quantize_balance(value)))
        } else {
            Err(BankError::ValidationError(
                "amount must be positive".to_string(),
            ))
        }
    }

    /// Parses a decimal string as submitted by a caller.
    pub fn parse(raw: &str) -> Result<Self, BankError> {
        let value: Decimal = raw
            .trim()
            .parse()
            .map_err(|_| BankError::ValidationError(format!("unparseable amount: {raw}")))?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = BankError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A bank account and its current balance.
///
/// The balance is always exactly representable at 2 decimal places; the
/// only sanctioned mutator is `AccountStore::apply_delta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub account_name: String,
    pub currency: String,
    pub balance: Decimal,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(BankError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(BankError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_quantizes_to_cents() {
        let amount = Amount::new(dec!(10.005)).unwrap();
        assert_eq!(amount.value(), dec!(10.01));
    }

    #[test]
    fn test_amount_parse() {
        assert_eq!(Amount::parse("500.00").unwrap().value(), dec!(500.00));
        assert_eq!(Amount::parse(" 12.3 ").unwrap().value(), dec!(12.30));
        assert!(matches!(
            Amount::parse("twelve"),
            Err(BankError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::parse("-3"),
            Err(BankError::ValidationError(_))
        ));
    }
}
