//! Approximate currency conversion
//!
//! The FX table holds directed rates keyed by `"SRC->TGT"`. Lookups never fail:
//! identical currencies and missing pairs both use a rate of 1.

use rust_decimal::Decimal;

use crate::models::money::{fraction_digits, saturating_minor};
use crate::models::{FxTable, Money};

/// Key of a directed rate
pub fn pair_key(source: &str, target: &str) -> String {
    format!("{}->{}", source, target)
}

/// Rate from `source` to `target`, defaulting to 1 when not configured
pub fn rate(table: &FxTable, source: &str, target: &str) -> Decimal {
    if source == target {
        return Decimal::ONE;
    }
    table
        .get(&pair_key(source, target))
        .copied()
        .unwrap_or(Decimal::ONE)
}

/// Result of converting an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub amount: Money,
    pub rate_used: Decimal,
}

/// Convert an amount between currencies, rounding half-to-even in the target
///
/// The amount is scaled through major units so currencies with different
/// fraction digits convert correctly.
pub fn convert(amount: Money, source: &str, target: &str, table: &FxTable) -> Conversion {
    let rate_used = rate(table, source, target);
    let source_digits = fraction_digits(source);
    let target_digits = fraction_digits(target);

    let mut value = saturating_mul(Decimal::from(amount.minor()), rate_used);
    if target_digits > source_digits {
        value = saturating_mul(
            value,
            Decimal::from(10_i64.pow(target_digits - source_digits)),
        );
    } else if source_digits > target_digits {
        value /= Decimal::from(10_i64.pow(source_digits - target_digits));
    }

    Conversion {
        amount: Money::from_minor(saturating_minor(value)),
        rate_used,
    }
}

/// Multiply, clamping to the bound on the product's side when out of range
fn saturating_mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or(
        if lhs.is_sign_negative() != rhs.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// Set a directed rate and, when non-zero, its reciprocal
pub fn update_table(table: &mut FxTable, source: &str, target: &str, rate: Decimal) {
    table.insert(pair_key(source, target), rate);
    if !rate.is_zero() {
        if let Some(reverse) = Decimal::ONE.checked_div(rate) {
            table.insert(pair_key(target, source), reverse.normalize());
        }
    }
}
