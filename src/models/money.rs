//! Money type for representing currency amounts
//!
//! Amounts are stored as integer minor units (cents, kopecks, ...) in an i64.
//! Conversions to and from major units go through `rust_decimal` and round
//! half-to-even at the currency's fraction-digit boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use super::language::Language;

/// Currencies that have no minor unit
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK"];

/// Number of fraction digits used by a currency (2 unless listed otherwise)
pub fn fraction_digits(currency: &str) -> u32 {
    if ZERO_DECIMAL_CURRENCIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(currency))
    {
        0
    } else {
        2
    }
}

/// Round half-to-even to `digits` fractional digits
pub fn round_half_even(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
}

/// Convert a decimal count of minor units into an i64, saturating on overflow
pub(crate) fn saturating_minor(value: Decimal) -> i64 {
    let rounded = round_half_even(value, 0);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// A monetary amount in minor units of some currency
///
/// The currency itself is carried alongside (on the day entry or setting), so
/// arithmetic between amounts of different currencies is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use dreamspend::models::Money;
    /// let amount = Money::from_minor(460); // 4.60
    /// assert_eq!(amount.minor(), 460);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp to at least `floor` minor units
    pub fn at_least(self, floor: i64) -> Self {
        Self(self.0.max(floor))
    }

    /// Double the amount, saturating at i64::MAX
    pub fn doubled(self) -> Self {
        Self(self.0.saturating_mul(2))
    }

    /// Scale by a percentage and floor the result (e.g. 105 for +5%)
    pub fn percent_floor(self, percent: i64) -> Self {
        let scaled = i128::from(self.0) * i128::from(percent) / 100;
        Self(i64::try_from(scaled).unwrap_or(i64::MAX))
    }

    /// Convert from major units, rounding half-to-even
    ///
    /// ```
    /// use dreamspend::models::Money;
    /// use rust_decimal_macros::dec;
    /// assert_eq!(Money::from_major(dec!(4.605), "EUR").minor(), 460);
    /// assert_eq!(Money::from_major(dec!(120.5), "JPY").minor(), 120);
    /// ```
    pub fn from_major(value: Decimal, currency: &str) -> Self {
        let factor = Decimal::from(10_i64.pow(fraction_digits(currency)));
        let scaled = value.checked_mul(factor).unwrap_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
        Self(saturating_minor(scaled))
    }

    /// Convert to major units
    pub fn to_major(&self, currency: &str) -> Decimal {
        Decimal::new(self.0, fraction_digits(currency))
    }

    /// Parse a major-unit amount such as "4.60", "4,60", "$5" or "1 000"
    pub fn parse(s: &str, currency: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        if cleaned.is_empty() || cleaned.matches('.').count() > 1 {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self::from_major(value, currency))
    }

    /// Format for display in a currency, using the language's separators
    ///
    /// ```
    /// use dreamspend::models::{Language, Money};
    /// assert_eq!(Money::from_minor(500).format("USD", Language::En), "$5.00");
    /// assert_eq!(Money::from_minor(460).format("EUR", Language::De), "4,60 €");
    /// ```
    pub fn format(&self, currency: &str, language: Language) -> String {
        let digits = fraction_digits(currency);
        let factor = 10_u64.pow(digits);
        let abs = self.0.unsigned_abs();
        let whole = group_thousands(abs / factor, language.grouping_separator());

        let number = if digits == 0 {
            whole
        } else {
            format!(
                "{}{}{:0width$}",
                whole,
                language.decimal_separator(),
                abs % factor,
                width = digits as usize
            )
        };

        let sign = if self.is_negative() { "-" } else { "" };
        let symbol = currency_symbol(currency);
        if language.symbol_first() {
            format!("{}{}{}", sign, symbol, number)
        } else {
            format!("{}{} {}", sign, number, symbol)
        }
    }
}

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "USD" => "$",
        "EUR" => "€",
        "RUB" => "₽",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fraction_digits() {
        assert_eq!(fraction_digits("USD"), 2);
        assert_eq!(fraction_digits("JPY"), 0);
        assert_eq!(fraction_digits("jpy"), 0);
        assert_eq!(fraction_digits("XYZ"), 2);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(dec!(2.5), 0), dec!(2));
        assert_eq!(round_half_even(dec!(3.5), 0), dec!(4));
        assert_eq!(round_half_even(dec!(-2.5), 0), dec!(-2));
        assert_eq!(round_half_even(dec!(1.005), 2), dec!(1.00));
        assert_eq!(round_half_even(dec!(1.015), 2), dec!(1.02));
    }

    #[test]
    fn test_major_minor_conversion() {
        assert_eq!(Money::from_major(dec!(4.60), "EUR").minor(), 460);
        assert_eq!(Money::from_major(dec!(0.125), "USD").minor(), 12);
        assert_eq!(Money::from_major(dec!(0.135), "USD").minor(), 14);
        assert_eq!(Money::from_major(dec!(150), "JPY").minor(), 150);
        assert_eq!(Money::from_minor(12345).to_major("USD"), dec!(123.45));
        assert_eq!(Money::from_minor(150).to_major("JPY"), dec!(150));
    }

    #[test]
    fn test_percent_floor() {
        assert_eq!(Money::from_minor(1000).percent_floor(105).minor(), 1050);
        assert_eq!(Money::from_minor(999).percent_floor(105).minor(), 1048);
        assert_eq!(Money::from_minor(i64::MAX).percent_floor(105).minor(), i64::MAX);
    }

    #[test]
    fn test_doubled_saturates() {
        assert_eq!(Money::from_minor(500).doubled().minor(), 1000);
        assert_eq!(Money::from_minor(i64::MAX).doubled().minor(), i64::MAX);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("4.60", "EUR").unwrap().minor(), 460);
        assert_eq!(Money::parse("4,60", "EUR").unwrap().minor(), 460);
        assert_eq!(Money::parse("$5", "USD").unwrap().minor(), 500);
        assert_eq!(Money::parse("1 000", "RUB").unwrap().minor(), 100_000);
        assert_eq!(Money::parse("300", "JPY").unwrap().minor(), 300);
        assert!(Money::parse("abc", "USD").is_err());
        assert!(Money::parse("1.2.3", "USD").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(Money::from_minor(500).format("USD", Language::En), "$5.00");
        assert_eq!(
            Money::from_minor(100_000_000).format("USD", Language::En),
            "$1,000,000.00"
        );
        assert_eq!(Money::from_minor(460).format("EUR", Language::De), "4,60 €");
        assert_eq!(
            Money::from_minor(5_000_000).format("RUB", Language::Ru),
            "50 000,00 ₽"
        );
        assert_eq!(Money::from_minor(-5).format("USD", Language::En), "-$0.05");
        assert_eq!(Money::from_minor(1500).format("JPY", Language::En), "¥1,500");
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_minor(100), Money::from_minor(200)];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.minor(), 300);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
