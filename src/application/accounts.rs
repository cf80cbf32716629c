use crate::config::AccountSeed;
use crate::domain::account::Account;
use crate::error::{BankError, Result};
use crate::money::quantize_balance;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Registry of accounts and the single source of truth for balances.
///
/// Kept in insertion order. `apply_delta` is the only sanctioned balance
/// mutator; it does not enforce any floor or ceiling, bound clamping is
/// the caller's policy.
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new(seeds: &[AccountSeed], now: DateTime<Utc>) -> Self {
        let accounts = seeds
            .iter()
            .map(|seed| Account {
                account_id: seed.id.clone(),
                account_name: seed.name.clone(),
                currency: seed.currency.clone(),
                balance: quantize_balance(seed.opening_balance),
                last_updated: now,
            })
            .collect();
        Self { accounts }
    }

    pub fn get(&self, account_id: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.account_id == account_id)
            .ok_or_else(|| BankError::AccountNotFound(account_id.to_string()))
    }

    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    /// Applies a signed delta, quantizes the result to 2 decimal places
    /// and stamps `last_updated`. Returns the new balance.
    pub fn apply_delta(
        &mut self,
        account_id: &str,
        delta: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Decimal> {
        let account = self.get_mut(account_id)?;
        account.balance = quantize_balance(account.balance + delta);
        account.last_updated = now;
        Ok(account.balance)
    }

    /// Overwrites balance and timestamp directly. Used for startup replay
    /// and to undo a mutation whose ledger append failed.
    pub(crate) fn restore(
        &mut self,
        account_id: &str,
        balance: Decimal,
        last_updated: DateTime<Utc>,
    ) -> Result<()> {
        let account = self.get_mut(account_id)?;
        account.balance = balance;
        account.last_updated = last_updated;
        Ok(())
    }

    pub(crate) fn contains(&self, account_id: &str) -> bool {
        self.accounts
            .iter()
            .any(|account| account.account_id == account_id)
    }

    fn get_mut(&mut self, account_id: &str) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.account_id == account_id)
            .ok_or_else(|| BankError::AccountNotFound(account_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BankConfig;
    use rust_decimal_macros::dec;

    fn store() -> AccountStore {
        AccountStore::new(&BankConfig::default().accounts, Utc::now())
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = store();
        let ids: Vec<_> = store
            .list()
            .iter()
            .map(|account| account.account_id.as_str())
            .collect();
        assert_eq!(ids, vec!["op_aud", "sav_aud", "exp_usd"]);
    }

    #[test]
    fn test_get_unknown_account() {
        let store = store();
        assert!(matches!(
            store.get("missing"),
            Err(BankError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_apply_delta_quantizes_and_stamps() {
        let mut store = store();
        let before = store.get("op_aud").unwrap().last_updated;
        let later = before + chrono::TimeDelta::seconds(5);

        let balance = store.apply_delta("op_aud", dec!(0.005), later).unwrap();
        assert_eq!(balance, dec!(16532.46));

        let account = store.get("op_aud").unwrap();
        assert_eq!(account.balance, dec!(16532.46));
        assert_eq!(account.last_updated, later);
    }

    #[test]
    fn test_apply_delta_allows_negative_balances() {
        let mut store = store();
        let balance = store
            .apply_delta("op_aud", dec!(-20000.00), Utc::now())
            .unwrap();
        assert_eq!(balance, dec!(-3467.55));
    }

    #[test]
    fn test_restore_overwrites_balance() {
        let mut store = store();
        let stamp = Utc::now();
        store.restore("op_aud", dec!(1.23), stamp).unwrap();

        let account = store.get("op_aud").unwrap();
        assert_eq!(account.balance, dec!(1.23));
        assert_eq!(account.last_updated, stamp);
    }
}
