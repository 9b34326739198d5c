//! Reporting precision for money and percentages
//!
//! Rounding is half away from zero and is applied once, when a result
//! record is built. Intermediate sums stay exact.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for revenue and percentage columns
pub const MONEY_SCALE: u32 = 2;

/// Round to `dp` decimal places, half away from zero
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary amount or percentage to two places, keeping the scale
///
/// `20` becomes `20.00`, so rendered output always shows cents.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = round_half_away(value, MONEY_SCALE);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Integer division rounded to the nearest integer, half away from zero
///
/// Both operands are non-negative; `denominator` must be non-zero.
pub fn div_round_nearest(numerator: u64, denominator: u64) -> u64 {
    let numerator = u128::from(numerator);
    let denominator = u128::from(denominator);
    ((2 * numerator + denominator) / (2 * denominator)) as u64
}
