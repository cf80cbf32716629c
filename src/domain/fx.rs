use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A directed exchange rate between two tracked currencies, 4 dp.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FxRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl FxRate {
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from_currency == from && self.to_currency == to
    }
}
