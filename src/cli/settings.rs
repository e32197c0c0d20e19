//! Settings CLI commands

use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;

use crate::display::format_settings;
use crate::error::{DreamSpendError, DreamSpendResult};
use crate::models::{Language, MaxBehavior, Money};
use crate::services::rates::{manual_fx_pair, refresh_pairs, ResponseBodies};
use crate::services::{refresh_rates, Clock, ProgressionEngine};
use crate::storage::PersistenceGateway;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,

    /// Switch the active language (converts the next allowance)
    Language {
        /// en, de or ru
        language: Language,
    },

    /// Set the start allowance
    Start {
        /// Amount in major units (e.g. "5.00")
        amount: String,
        /// Language to change (defaults to the active one)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Set the maximum allowance
    Max {
        /// Amount in major units
        amount: String,
        /// Language to change (defaults to the active one)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Choose what happens once the maximum is reached
    Behavior {
        /// "ceiling" or "reset-and-restart"
        behavior: MaxBehavior,
    },

    /// Set the daily reminder
    Reminder {
        /// Time as HH:MM
        time: String,
        /// Turn the reminder off
        #[arg(long)]
        off: bool,
    },

    /// Set an approximate exchange rate
    Fx {
        /// Units of TO per unit of FROM
        rate: Decimal,
        /// Source currency (defaults to the language's pair)
        #[arg(long)]
        from: Option<String>,
        /// Target currency (defaults to the language's pair)
        #[arg(long)]
        to: Option<String>,
    },

    /// Update rates from downloaded responses ({"rates": {...}})
    Rates {
        /// BASE=FILE, one per base currency
        #[arg(long = "response", value_name = "BASE=FILE")]
        responses: Vec<String>,
    },
}

/// Parse "HH:MM"
pub fn parse_time(value: &str) -> DreamSpendResult<(u8, u8)> {
    let invalid = || DreamSpendError::Validation(format!("Invalid time '{}': expected HH:MM", value));
    let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute: u8 = minute.parse().map_err(|_| invalid())?;
    Ok((hour, minute))
}

/// Handle a settings command
pub fn handle_settings_command<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    cmd: SettingsCommands,
) -> DreamSpendResult<()> {
    match cmd {
        SettingsCommands::Show => {
            engine.ensure_today();
            print!(
                "{}",
                format_settings(
                    engine.settings(),
                    engine.pending_allowance(),
                    engine.pending_currency()
                )
            );
        }

        SettingsCommands::Language { language } => {
            engine.switch_language(language);
            let settings = engine.settings();
            println!(
                "Language set to {}. Next allowance: {}",
                language,
                engine
                    .pending_allowance()
                    .format(engine.pending_currency(), settings.language)
            );
        }

        SettingsCommands::Start { amount, language } => {
            let language = language.unwrap_or(engine.settings().language);
            let amount = parse_amount(engine, language, &amount)?;
            engine.update_start_amount(language, amount);
            println!("Start allowance for {} updated.", language);
        }

        SettingsCommands::Max { amount, language } => {
            let language = language.unwrap_or(engine.settings().language);
            let amount = parse_amount(engine, language, &amount)?;
            engine.update_max_amount(language, amount);
            println!("Maximum allowance for {} updated.", language);
        }

        SettingsCommands::Behavior { behavior } => {
            engine.update_max_behavior(behavior);
            println!("At maximum: {}", behavior);
        }

        SettingsCommands::Reminder { time, off } => {
            let (hour, minute) = parse_time(&time)?;
            engine.update_reminder(hour, minute, !off);
            let settings = engine.settings();
            println!(
                "Reminder set to {:02}:{:02} ({})",
                settings.reminder_hour,
                settings.reminder_minute,
                if settings.notifications_enabled { "on" } else { "off" }
            );
        }

        SettingsCommands::Fx { rate, from, to } => {
            if rate <= Decimal::ZERO {
                return Err(DreamSpendError::Validation("Rate must be positive".into()));
            }
            let (default_from, default_to) = manual_fx_pair(engine.settings().language);
            let from = from.unwrap_or_else(|| default_from.to_string());
            let to = to.unwrap_or_else(|| default_to.to_string());
            engine.update_fx_rate(&from, &to, rate);
            println!("{}->{} set to {}", from.to_uppercase(), to.to_uppercase(), rate);
        }

        SettingsCommands::Rates { responses } => {
            let mut source = ResponseBodies::new();
            for response in &responses {
                let (base, file) = response.split_once('=').ok_or_else(|| {
                    DreamSpendError::Validation(format!(
                        "Invalid response '{}': expected BASE=FILE",
                        response
                    ))
                })?;
                let body = std::fs::read_to_string(PathBuf::from(file))?;
                source.insert(base, body);
            }

            if responses.is_empty() {
                let pairs: Vec<String> = refresh_pairs(engine.settings().language)
                    .iter()
                    .map(|(from, to)| format!("{}->{}", from, to))
                    .collect();
                println!("Pairs for the active language: {}", pairs.join(", "));
                return Ok(());
            }

            let status = refresh_rates(engine, &source);
            println!("{}", status);
            if !status.is_updated() {
                return Err(DreamSpendError::RateFetch(status.to_string()));
            }
        }
    }

    Ok(())
}

fn parse_amount<P: PersistenceGateway, C: Clock>(
    engine: &ProgressionEngine<P, C>,
    language: Language,
    amount: &str,
) -> DreamSpendResult<Money> {
    let currency = engine.settings().currency_for(language);
    let money = Money::parse(amount, currency)
        .map_err(|e| DreamSpendError::Validation(e.to_string()))?;
    if money.minor() < 1 {
        return Err(DreamSpendError::Validation(
            "Amount must be positive".into(),
        ));
    }
    Ok(money)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30").unwrap(), (9, 30));
        assert_eq!(parse_time(" 14:15 ").unwrap(), (14, 15));
        assert!(parse_time("930").is_err());
        assert!(parse_time("ab:cd").is_err());
    }
}
