use crate::config::FxSeed;
use crate::domain::fx::FxRate;
use crate::error::{BankError, Result};
use crate::money::{quantize_balance, quantize_rate};
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

/// In-memory table of tracked FX rates.
///
/// Rates drift on feed ticks and are not persisted; no floor or ceiling
/// is enforced.
pub struct FxBoard {
    rates: Vec<FxRate>,
}

impl FxBoard {
    pub fn new(seeds: &[FxSeed], now: DateTime<Utc>) -> Self {
        let rates = seeds
            .iter()
            .map(|seed| FxRate {
                from_currency: seed.from_currency.clone(),
                to_currency: seed.to_currency.clone(),
                rate: quantize_rate(seed.rate),
                last_updated: now,
            })
            .collect();
        Self { rates }
    }

    pub fn list(&self) -> &[FxRate] {
        &self.rates
    }

    /// One feed tick: every rate moves by a factor of (1 + u), with u
    /// drawn uniformly in +/-0.5% (whole basis points so the arithmetic
    /// stays exact), then quantized to 4 decimal places.
    pub fn drift(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) {
        for rate in &mut self.rates {
            let basis_points: i64 = rng.gen_range(-50..=50);
            let factor = Decimal::ONE + Decimal::new(basis_points, 4);
            rate.rate = quantize_rate(rate.rate * factor);
            rate.last_updated = now;
        }
    }

    /// Converts an amount between two tracked currencies at the current
    /// rate, quantized to 2 decimal places.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        let rate = self
            .rates
            .iter()
            .find(|rate| rate.matches(from, to))
            .ok_or_else(|| BankError::UnsupportedPair(from.to_string(), to.to_string()))?;
        Ok(quantize_balance(amount * rate.rate))
    }
}
