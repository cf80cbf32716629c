use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Stochastic behavior assigned to a seeded account by the balance
/// simulator. The exact distributions live with the simulator; this only
/// names which one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityProfile {
    /// Noisy payroll-like account: frequent percentage drift, occasional
    /// large lump sums in either direction.
    Operating,
    /// Slow drift: small interest credits and transfers out.
    Savings,
    /// Mostly quiet, with occasional large export receipts.
    ExportReserve,
}

#[derive(Debug, Clone)]
pub struct AccountSeed {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub opening_balance: Decimal,
    pub profile: ActivityProfile,
}

#[derive(Debug, Clone)]
pub struct FxSeed {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
}

/// Engine configuration. `Default` carries the reference demo values;
/// tests shrink the delays to milliseconds.
#[derive(Debug, Clone)]
pub struct BankConfig {
    /// Currency the low-balance policy applies to.
    pub home_currency: String,
    /// Balances below this raise a medium low-balance alert.
    pub low_balance_threshold: Decimal,
    /// Balances below this raise the alert at high severity instead.
    pub severe_balance_threshold: Decimal,
    /// No simulated or payment mutation may leave a balance below this.
    pub balance_floor: Decimal,
    /// Payment age at which `pending` becomes `processing`.
    pub processing_delay: Duration,
    /// Payment age at which the debit lands and the payment completes.
    pub completion_delay: Duration,
    /// Payment worker tick interval.
    pub payment_tick: Duration,
    /// FX feed tick interval.
    pub fx_tick: Duration,
    /// Bounds of the simulator's uniformly drawn pause between iterations.
    pub simulator_pause_min: Duration,
    pub simulator_pause_max: Duration,
    pub accounts: Vec<AccountSeed>,
    pub fx_rates: Vec<FxSeed>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            home_currency: "AUD".to_string(),
            low_balance_threshold: dec!(5000),
            severe_balance_threshold: dec!(2000),
            balance_floor: dec!(-5000.00),
            processing_delay: Duration::from_secs(30),
            completion_delay: Duration::from_secs(60),
            payment_tick: Duration::from_secs(15),
            fx_tick: Duration::from_secs(120),
            simulator_pause_min: Duration::from_secs(20),
            simulator_pause_max: Duration::from_secs(90),
            accounts: vec![
                AccountSeed {
                    id: "op_aud".to_string(),
                    name: "Operating Account".to_string(),
                    currency: "AUD".to_string(),
                    opening_balance: dec!(16532.45),
                    profile: ActivityProfile::Operating,
                },
                AccountSeed {
                    id: "sav_aud".to_string(),
                    name: "Savings Account".to_string(),
                    currency: "AUD".to_string(),
                    opening_balance: dec!(120432.10),
                    profile: ActivityProfile::Savings,
                },
                AccountSeed {
                    id: "exp_usd".to_string(),
                    name: "Export Reserve".to_string(),
                    currency: "USD".to_string(),
                    opening_balance: dec!(8750.67),
                    profile: ActivityProfile::ExportReserve,
                },
            ],
            fx_rates: vec![
                FxSeed {
                    from_currency: "AUD".to_string(),
                    to_currency: "USD".to_string(),
                    rate: dec!(0.65),
                },
                FxSeed {
                    from_currency: "USD".to_string(),
                    to_currency: "AUD".to_string(),
                    rate: dec!(1.54),
                },
            ],
        }
    }
}

impl BankConfig {
    pub fn profile_for(&self, account_id: &str) -> Option<ActivityProfile> {
        self.accounts
            .iter()
            .find(|seed| seed.id == account_id)
            .map(|seed| seed.profile)
    }
}
