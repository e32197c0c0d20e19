//! Game settings
//!
//! Per-language start/maximum allowances, currency mapping, the approximate FX
//! table, reminder time and the policy applied once the maximum is reached.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::language::Language;
use super::money::Money;

/// Fallback start amount when a language has no configured value
const FALLBACK_START_MINOR: i64 = 100;

/// Fallback maximum when a language has no configured value
const FALLBACK_MAX_MINOR: i64 = 10_000;

/// Directed rate table keyed by `"SRC->TGT"`
pub type FxTable = BTreeMap<String, Decimal>;

/// What happens to the next allowance once a day reaches the maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "StoredMaxBehavior")]
pub enum MaxBehavior {
    /// Keep granting the maximum
    Ceiling,
    /// Go back to the configured start amount
    #[default]
    ResetAndRestart,
}

/// Persisted spellings, including the retired stop-at-maximum policy
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum StoredMaxBehavior {
    Ceiling,
    #[serde(alias = "resetAndRestart")]
    ResetAndRestart,
    #[serde(alias = "celebrationAndStop", alias = "celebration-and-stop")]
    CelebrateAndStop,
}

impl From<StoredMaxBehavior> for MaxBehavior {
    fn from(stored: StoredMaxBehavior) -> Self {
        match stored {
            StoredMaxBehavior::Ceiling => Self::Ceiling,
            StoredMaxBehavior::ResetAndRestart | StoredMaxBehavior::CelebrateAndStop => {
                Self::ResetAndRestart
            }
        }
    }
}

impl fmt::Display for MaxBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ceiling => write!(f, "ceiling"),
            Self::ResetAndRestart => write!(f, "reset-and-restart"),
        }
    }
}

impl FromStr for MaxBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ceiling" => Ok(Self::Ceiling),
            "reset" | "reset-and-restart" => Ok(Self::ResetAndRestart),
            other => Err(format!("Unknown max behavior: {}", other)),
        }
    }
}

/// User settings for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Active language (selects currency and amounts)
    pub language: Language,

    /// Start allowance per language, in minor units
    #[serde(default)]
    pub start_amount_by_language: BTreeMap<Language, Money>,

    /// Maximum allowance per language, in minor units
    #[serde(default)]
    pub max_amount_by_language: BTreeMap<Language, Money>,

    /// Currency code per language
    #[serde(default)]
    pub currency_by_language: BTreeMap<Language, String>,

    /// Approximate exchange rates
    #[serde(default)]
    pub approx_fx_table: FxTable,

    /// Reminder hour (0-23)
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u8,

    /// Reminder minute (0-59)
    #[serde(default = "default_reminder_minute")]
    pub reminder_minute: u8,

    /// Whether the daily reminder is enabled
    #[serde(default)]
    pub notifications_enabled: bool,

    /// Policy applied once the maximum allowance is reached
    #[serde(default)]
    pub max_behavior: MaxBehavior,
}

fn default_reminder_hour() -> u8 {
    14
}

fn default_reminder_minute() -> u8 {
    15
}

/// Default approximate rates between the supported currencies
pub fn default_fx_table() -> FxTable {
    [
        ("USD->EUR", dec!(0.92)),
        ("EUR->USD", dec!(1.0869565)),
        ("USD->RUB", dec!(100)),
        ("RUB->USD", dec!(0.01)),
        ("EUR->RUB", dec!(108)),
        ("RUB->EUR", dec!(0.0092593)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_language(Language::system_default())
    }
}

impl Settings {
    /// Default settings with the given active language
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            start_amount_by_language: BTreeMap::from([
                (Language::En, Money::from_minor(5_00)),
                (Language::De, Money::from_minor(4_60)),
                (Language::Ru, Money::from_minor(500_00)),
            ]),
            max_amount_by_language: BTreeMap::from([
                (Language::En, Money::from_minor(1_000_000_00)),
                (Language::De, Money::from_minor(920_000_00)),
                (Language::Ru, Money::from_minor(100_000_000_00)),
            ]),
            currency_by_language: Language::ALL
                .iter()
                .map(|l| (*l, l.default_currency().to_string()))
                .collect(),
            approx_fx_table: default_fx_table(),
            reminder_hour: default_reminder_hour(),
            reminder_minute: default_reminder_minute(),
            notifications_enabled: false,
            max_behavior: MaxBehavior::default(),
        }
    }

    /// Currency used by a language
    pub fn currency_for(&self, language: Language) -> &str {
        self.currency_by_language
            .get(&language)
            .map(String::as_str)
            .unwrap_or_else(|| language.default_currency())
    }

    /// Currency of the active language
    pub fn active_currency(&self) -> &str {
        self.currency_for(self.language)
    }

    /// Start allowance for a language
    pub fn start_amount_for(&self, language: Language) -> Money {
        self.start_amount_by_language
            .get(&language)
            .copied()
            .unwrap_or(Money::from_minor(FALLBACK_START_MINOR))
    }

    /// Maximum allowance for a language
    pub fn max_amount_for(&self, language: Language) -> Money {
        self.max_amount_by_language
            .get(&language)
            .copied()
            .unwrap_or(Money::from_minor(FALLBACK_MAX_MINOR))
    }

    /// Maximum allowance for a currency
    ///
    /// Uses the first language mapped to the currency, else the active language.
    pub fn max_amount_for_currency(&self, currency: &str) -> Money {
        self.language_for_currency(currency)
            .map(|l| self.max_amount_for(l))
            .unwrap_or_else(|| self.max_amount_for(self.language))
    }

    /// Start allowance for a currency
    pub fn start_amount_for_currency(&self, currency: &str) -> Money {
        self.language_for_currency(currency)
            .map(|l| self.start_amount_for(l))
            .unwrap_or_else(|| self.start_amount_for(self.language))
    }

    fn language_for_currency(&self, currency: &str) -> Option<Language> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| self.currency_for(*l) == currency)
    }

    /// Clamp stored amounts to at least one minor unit
    pub fn normalize(&mut self) {
        for amount in self
            .start_amount_by_language
            .values_mut()
            .chain(self.max_amount_by_language.values_mut())
        {
            *amount = amount.at_least(1);
        }
        self.reminder_hour = self.reminder_hour.min(23);
        self.reminder_minute = self.reminder_minute.min(59);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::for_language(Language::En);
        assert_eq!(settings.active_currency(), "USD");
        assert_eq!(settings.start_amount_for(Language::En).minor(), 500);
        assert_eq!(settings.max_amount_for(Language::De).minor(), 92_000_000);
        assert_eq!(settings.reminder_hour, 14);
        assert_eq!(settings.reminder_minute, 15);
        assert_eq!(settings.max_behavior, MaxBehavior::ResetAndRestart);
        assert_eq!(settings.approx_fx_table.get("USD->EUR"), Some(&dec!(0.92)));
    }

    #[test]
    fn test_fallback_amounts() {
        let mut settings = Settings::for_language(Language::En);
        settings.start_amount_by_language.clear();
        settings.max_amount_by_language.clear();
        settings.currency_by_language.clear();
        assert_eq!(settings.start_amount_for(Language::Ru).minor(), 100);
        assert_eq!(settings.max_amount_for(Language::Ru).minor(), 10_000);
        assert_eq!(settings.currency_for(Language::De), "EUR");
    }

    #[test]
    fn test_amounts_by_currency() {
        let settings = Settings::for_language(Language::En);
        assert_eq!(settings.max_amount_for_currency("EUR").minor(), 92_000_000);
        assert_eq!(settings.start_amount_for_currency("RUB").minor(), 50_000);
        // Unknown currency falls back to the active language
        assert_eq!(settings.start_amount_for_currency("GBP").minor(), 500);
    }

    #[test]
    fn test_legacy_max_behavior_is_normalized() {
        let legacy: MaxBehavior = serde_json::from_str(r#""celebrationAndStop""#).unwrap();
        assert_eq!(legacy, MaxBehavior::ResetAndRestart);
        let legacy: MaxBehavior = serde_json::from_str(r#""celebrate-and-stop""#).unwrap();
        assert_eq!(legacy, MaxBehavior::ResetAndRestart);
        let ceiling: MaxBehavior = serde_json::from_str(r#""ceiling""#).unwrap();
        assert_eq!(ceiling, MaxBehavior::Ceiling);
        assert_eq!(
            serde_json::to_string(&MaxBehavior::ResetAndRestart).unwrap(),
            r#""reset-and-restart""#
        );
    }

    #[test]
    fn test_normalize_clamps() {
        let mut settings = Settings::for_language(Language::En);
        settings
            .start_amount_by_language
            .insert(Language::En, Money::from_minor(0));
        settings.reminder_hour = 30;
        settings.normalize();
        assert_eq!(settings.start_amount_for(Language::En).minor(), 1);
        assert_eq!(settings.reminder_hour, 23);
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = Settings::for_language(Language::De);
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, deserialized);
    }
}
