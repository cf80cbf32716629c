use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for account balances and transaction magnitudes.
pub const BALANCE_DP: u32 = 2;
/// Decimal places used for FX rates.
pub const RATE_DP: u32 = 4;

/// Quantizes a monetary value to 2 decimal places, round-half-up.
///
/// Every balance and transaction magnitude stored by the system goes
/// through this function so that cent-level arithmetic stays exact.
pub fn quantize_balance(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(BALANCE_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantizes an FX rate to 4 decimal places, round-half-up.
pub fn quantize_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}
