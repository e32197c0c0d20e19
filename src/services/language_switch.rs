//! Carrying the pending allowance across a language switch
//!
//! Only the allowance of the next day to be created is converted; days that
//! already exist keep their currency and recorded rate.

use rust_decimal::Decimal;

use super::fx;
use crate::models::{Language, Money, Settings};

/// Outcome of a language switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitch {
    pub amount: Money,
    pub currency: String,
    pub rate_used: Decimal,
}

/// Convert `amount` (held in `from_currency`) into the currency of `to`
///
/// The result is never less than one minor unit.
pub fn switch_language(
    amount: Money,
    from_currency: &str,
    to: Language,
    settings: &Settings,
) -> LanguageSwitch {
    let target = settings.currency_for(to);
    let conversion = fx::convert(amount, from_currency, target, &settings.approx_fx_table);

    LanguageSwitch {
        amount: conversion.amount.at_least(1),
        currency: target.to_string(),
        rate_used: conversion.rate_used,
    }
}
