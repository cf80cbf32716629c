use crate::domain::account::Account;
use crate::domain::transaction::{Direction, Transaction};
use crate::error::BankError;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reporting window for a cash-flow summary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// Records at or after the cutoff are inside the window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let delta = match self {
            Self::Day => TimeDelta::days(1),
            Self::Week => TimeDelta::weeks(1),
            Self::Month => TimeDelta::days(30),
        };
        now - delta
    }
}

impl FromStr for Period {
    type Err = BankError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(BankError::ValidationError(format!(
                "unknown period: {other}"
            ))),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CashFlowSummary {
    pub account_id: String,
    pub period: Period,
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub net_flow: Decimal,
    pub transaction_count: usize,
    pub currency: String,
}

/// Derives a cash-flow summary for one account over the period ending
/// now. A linear scan over the full log; no incremental index is kept.
pub fn summarize(
    records: &[Transaction],
    account: &Account,
    period: Period,
    now: DateTime<Utc>,
) -> CashFlowSummary {
    let cutoff = period.cutoff(now);
    let mut total_inflows = Decimal::ZERO;
    let mut total_outflows = Decimal::ZERO;
    let mut transaction_count = 0;

    for record in records
        .iter()
        .filter(|record| record.account_id == account.account_id && record.timestamp >= cutoff)
    {
        match record.r#type {
            Direction::Credit => total_inflows += record.amount,
            Direction::Debit => total_outflows += record.amount,
        }
        transaction_count += 1;
    }

    CashFlowSummary {
        account_id: account.account_id.clone(),
        period,
        total_inflows,
        total_outflows,
        net_flow: total_inflows - total_outflows,
        transaction_count,
        currency: account.currency.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> Account {
        Account {
            account_id: "op_aud".to_string(),
            account_name: "Operating Account".to_string(),
            currency: "AUD".to_string(),
            balance: dec!(100.00),
            last_updated: Utc::now(),
        }
    }

    fn record(
        account_id: &str,
        amount: Decimal,
        direction: Direction,
        age: TimeDelta,
        now: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            transaction_id: "TXN00000001".to_string(),
            account_id: account_id.to_string(),
            timestamp: now - age,
            amount,
            r#type: direction,
            description: "Operating activity".to_string(),
            balance_after: dec!(100.00),
            currency: "AUD".to_string(),
        }
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("day".parse::<Period>().unwrap(), Period::Day);
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
        assert!("year".parse::<Period>().is_err());
    }

    #[test]
    fn test_summary_sums_directions_separately() {
        let now = Utc::now();
        let records = vec![
            record("op_aud", dec!(100.00), Direction::Credit, TimeDelta::hours(1), now),
            record("op_aud", dec!(30.00), Direction::Debit, TimeDelta::hours(2), now),
            record("op_aud", dec!(20.00), Direction::Debit, TimeDelta::hours(3), now),
        ];

        let summary = summarize(&records, &account(), Period::Day, now);
        assert_eq!(summary.total_inflows, dec!(100.00));
        assert_eq!(summary.total_outflows, dec!(50.00));
        assert_eq!(summary.net_flow, dec!(50.00));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.currency, "AUD");
    }

    #[test]
    fn test_summary_filters_by_account_and_window() {
        let now = Utc::now();
        let records = vec![
            record("op_aud", dec!(10.00), Direction::Credit, TimeDelta::hours(1), now),
            record("sav_aud", dec!(99.00), Direction::Credit, TimeDelta::hours(1), now),
            record("op_aud", dec!(99.00), Direction::Credit, TimeDelta::days(2), now),
        ];

        let summary = summarize(&records, &account(), Period::Day, now);
        assert_eq!(summary.total_inflows, dec!(10.00));
        assert_eq!(summary.transaction_count, 1);
    }

    #[test]
    fn test_week_and_month_windows() {
        let now = Utc::now();
        let records = vec![
            record("op_aud", dec!(10.00), Direction::Credit, TimeDelta::days(5), now),
            record("op_aud", dec!(20.00), Direction::Credit, TimeDelta::days(20), now),
        ];

        let week = summarize(&records, &account(), Period::Week, now);
        assert_eq!(week.transaction_count, 1);

        let month = summarize(&records, &account(), Period::Month, now);
        assert_eq!(month.transaction_count, 2);
        assert_eq!(month.total_inflows, dec!(30.00));
    }
}
