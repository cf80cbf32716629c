use super::ShutdownSignal;
use crate::application::bank::{BalanceAdjustment, Bank};
use crate::config::ActivityProfile;
use crate::money::quantize_balance;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

const OPERATING_DESCRIPTIONS: [&str; 5] = [
    "Customer payment received",
    "Supplier payment",
    "Payroll transfer",
    "Tax payment",
    "Utility bill",
];

/// Random-walk balance perturbation worker.
///
/// Sleeps a uniformly drawn 20-90s between iterations (not on a clock
/// grid), picks one account at random and applies a delta drawn from
/// that account's activity profile. The floor clamp and the
/// apply -> append -> evaluate ordering are enforced inside the bank;
/// only the distributions live here. A failed iteration is logged and
/// the loop continues.
pub async fn run_balance_simulator(bank: Arc<Bank>, mut shutdown: ShutdownSignal) {
    let clock = bank.clock();
    let mut rng = StdRng::from_entropy();

    loop {
        let pause = next_pause(bank.as_ref(), &mut rng);
        tokio::select! {
            _ = clock.sleep(pause) => {}
            _ = shutdown.changed() => break,
        }

        let Some(adjustment) = next_adjustment(bank.as_ref(), &mut rng).await else {
            continue;
        };
        match bank.apply_adjustment(&adjustment).await {
            Ok(record) => tracing::debug!(
                account_id = %record.account_id,
                amount = %record.amount,
                balance_after = %record.balance_after,
                "simulated balance change"
            ),
            Err(err) => tracing::error!(error = %err, "simulator iteration failed"),
        }
    }
    tracing::info!("balance simulator stopped");
}

fn next_pause(bank: &Bank, rng: &mut StdRng) -> Duration {
    let min = bank.config().simulator_pause_min.as_millis() as u64;
    let max = bank.config().simulator_pause_max.as_millis() as u64;
    Duration::from_millis(rng.gen_range(min..=max.max(min)))
}

async fn next_adjustment(bank: &Bank, rng: &mut StdRng) -> Option<BalanceAdjustment> {
    let accounts = bank.list_accounts().await;
    let account = accounts.choose(rng)?;
    let profile = bank
        .config()
        .profile_for(&account.account_id)
        .unwrap_or(ActivityProfile::Savings);
    let (delta, description) = draw_delta(profile, account.balance, rng);
    Some(BalanceAdjustment {
        account_id: account.account_id.clone(),
        delta,
        description,
    })
}

/// Draws a signed delta in exact cents (or exact basis points of the
/// current balance) so no float ever touches a monetary value.
fn draw_delta(
    profile: ActivityProfile,
    balance: Decimal,
    rng: &mut impl Rng,
) -> (Decimal, String) {
    match profile {
        ActivityProfile::Operating => {
            if rng.gen_bool(0.3) {
                let cents = rng.gen_range(-300_000i64..=500_000);
                let description = OPERATING_DESCRIPTIONS
                    .choose(rng)
                    .copied()
                    .unwrap_or("Operating activity");
                (Decimal::new(cents, 2), description.to_string())
            } else {
                let basis_points = rng.gen_range(-200i64..=300);
                let delta = quantize_balance(balance * Decimal::new(basis_points, 4));
                (delta, "Operating activity".to_string())
            }
        }
        ActivityProfile::Savings => {
            let cents = rng.gen_range(-50_000i64..=200_000);
            let delta = Decimal::new(cents, 2);
            let description = if delta > Decimal::ZERO {
                "Interest earned"
            } else {
                "Transfer to operating"
            };
            (delta, description.to_string())
        }
        ActivityProfile::ExportReserve => {
            if rng.gen_bool(0.15) {
                let cents = rng.gen_range(50_000i64..=800_000);
                (Decimal::new(cents, 2), "Export receipt".to_string())
            } else {
                let cents = rng.gen_range(-20_000i64..=50_000);
                (Decimal::new(cents, 2), "International payment".to_string())
            }
        }
    }
}
