//! Supported interface languages
//!
//! Each language carries a default currency, locale conventions for amount
//! formatting, and a list of default spending categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the game can be played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
    Ru,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 3] = [Language::En, Language::De, Language::Ru];

    /// Short code ("en", "de", "ru")
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Ru => "ru",
        }
    }

    /// Locale identifier used for formatting
    pub fn locale_identifier(&self) -> &'static str {
        match self {
            Self::En => "en_US",
            Self::De => "de_DE",
            Self::Ru => "ru_RU",
        }
    }

    /// Default currency for the language
    pub fn default_currency(&self) -> &'static str {
        match self {
            Self::En => "USD",
            Self::De => "EUR",
            Self::Ru => "RUB",
        }
    }

    pub(crate) fn decimal_separator(&self) -> char {
        match self {
            Self::En => '.',
            Self::De | Self::Ru => ',',
        }
    }

    pub(crate) fn grouping_separator(&self) -> char {
        match self {
            Self::En => ',',
            Self::De => '.',
            Self::Ru => ' ',
        }
    }

    pub(crate) fn symbol_first(&self) -> bool {
        matches!(self, Self::En)
    }

    /// Built-in spending categories offered before the user adds their own
    pub fn default_categories(&self) -> &'static [&'static str] {
        match self {
            Self::En => &[
                "Food",
                "Transport",
                "Home",
                "Clothes",
                "Entertainment",
                "Gifts",
                "Health",
                "Travel",
            ],
            Self::De => &[
                "Essen",
                "Transport",
                "Haushalt",
                "Kleidung",
                "Unterhaltung",
                "Geschenke",
                "Gesundheit",
                "Reisen",
            ],
            Self::Ru => &[
                "Еда",
                "Транспорт",
                "Дом",
                "Одежда",
                "Развлечения",
                "Подарки",
                "Здоровье",
                "Путешествия",
            ],
        }
    }

    /// Pick a language from a locale string such as "de_DE.UTF-8"
    pub fn from_locale(locale: &str) -> Self {
        let lower = locale.trim().to_lowercase();
        if lower.starts_with("ru") {
            Self::Ru
        } else if lower.starts_with("de") {
            Self::De
        } else {
            Self::En
        }
    }

    /// Language derived from the process locale (`LC_ALL`, then `LANG`)
    pub fn system_default() -> Self {
        std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .map(|locale| Self::from_locale(&locale))
            .unwrap_or(Self::En)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            "ru" => Ok(Self::Ru),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency() {
        assert_eq!(Language::En.default_currency(), "USD");
        assert_eq!(Language::De.default_currency(), "EUR");
        assert_eq!(Language::Ru.default_currency(), "RUB");
    }

    #[test]
    fn test_from_locale() {
        assert_eq!(Language::from_locale("ru_RU.UTF-8"), Language::Ru);
        assert_eq!(Language::from_locale("de-AT"), Language::De);
        assert_eq!(Language::from_locale("fr_FR"), Language::En);
        assert_eq!(Language::from_locale(""), Language::En);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("DE".parse::<Language>().unwrap(), Language::De);
        assert!("xx".parse::<Language>().is_err());
        assert_eq!(Language::Ru.to_string(), "RU");
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Language::En, 500_i64);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"en":500}"#);
    }
}
