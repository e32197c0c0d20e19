//! Day CLI commands
//!
//! Showing today, saving spending, drafts and history.

use clap::Subcommand;

use crate::display::{format_day_details, format_history, format_today};
use crate::error::{DreamSpendError, DreamSpendResult};
use crate::models::{Money, SpendItem};
use crate::services::{Clock, ProgressionEngine, SaveOutcome};
use crate::storage::PersistenceGateway;

/// Draft subcommands
#[derive(Subcommand)]
pub enum DraftCommands {
    /// Show the draft of a day (defaults to today)
    Show {
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Replace the draft of an open day
    Set {
        /// Items as TITLE=AMOUNT or TITLE=AMOUNT@CATEGORY
        #[arg(required = true)]
        items: Vec<String>,
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Discard the draft of a day
    Clear {
        #[arg(short, long)]
        day: Option<u32>,
    },
}

/// Parse `TITLE=AMOUNT[@CATEGORY]`, with the amount in major units of `currency`
pub fn parse_item(spec: &str, currency: &str) -> DreamSpendResult<SpendItem> {
    let (title, rest) = spec.rsplit_once('=').ok_or_else(|| {
        DreamSpendError::Validation(format!(
            "Invalid item '{}': expected TITLE=AMOUNT[@CATEGORY]",
            spec
        ))
    })?;

    let (amount, category) = match rest.split_once('@') {
        Some((amount, category)) => (amount, Some(category)),
        None => (rest, None),
    };

    let amount = Money::parse(amount, currency)
        .map_err(|e| DreamSpendError::Validation(format!("Invalid item '{}': {}", spec, e)))?;
    if amount.is_negative() {
        return Err(DreamSpendError::Validation(format!(
            "Invalid item '{}': amount cannot be negative",
            spec
        )));
    }

    Ok(SpendItem::new(title, amount, category))
}

fn parse_items(specs: &[String], currency: &str) -> DreamSpendResult<Vec<SpendItem>> {
    specs.iter().map(|s| parse_item(s, currency)).collect()
}

fn paused_error() -> DreamSpendError {
    DreamSpendError::Validation(
        "The game is paused. Run 'dreamspend restart' to start over.".into(),
    )
}

fn resolve_day<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    day: Option<u32>,
) -> DreamSpendResult<u32> {
    match day {
        Some(index) => Ok(index),
        None if engine.is_paused() => Err(paused_error()),
        None => engine
            .today()
            .map(|d| d.day_index)
            .ok_or_else(|| DreamSpendError::day_not_found("today")),
    }
}

fn currency_of<P: PersistenceGateway, C: Clock>(
    engine: &ProgressionEngine<P, C>,
    day_index: u32,
) -> DreamSpendResult<String> {
    engine
        .days()
        .iter()
        .find(|d| d.day_index == day_index)
        .map(|d| d.currency.clone())
        .ok_or_else(|| DreamSpendError::day_not_found(day_index.to_string()))
}

fn print_outcome(outcome: &SaveOutcome) {
    println!("Saved day {}: {}", outcome.day_index, outcome.status);
    for kind in &outcome.earned {
        println!("Achievement earned: {}", kind);
    }
    if outcome.reached_maximum {
        println!("You reached the maximum allowance! Run 'dreamspend dismiss' to continue.");
    }
}

/// Show today's card
pub fn handle_today<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
) -> DreamSpendResult<()> {
    engine.ensure_today();
    if engine.is_paused() {
        println!("The game is paused. Run 'dreamspend restart' to start over.");
        return Ok(());
    }

    let day_index = resolve_day(engine, None)?;
    let draft = engine.draft_items(day_index);
    let language = engine.settings().language;

    if engine.celebration_pending() {
        println!("Maximum reached! Run 'dreamspend dismiss' to continue.\n");
    }

    let today = engine
        .today_entry()
        .ok_or_else(|| DreamSpendError::day_not_found("today"))?;
    print!(
        "{}",
        format_today(today, language, engine.streak(), engine.progress_to_max(), &draft)
    );
    Ok(())
}

/// Save today's items, optionally keeping what was saved before
pub fn handle_spend<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    specs: &[String],
    append: bool,
) -> DreamSpendResult<()> {
    let day_index = resolve_day(engine, None)?;
    let currency = currency_of(engine, day_index)?;

    let mut items = if append {
        engine
            .today_entry()
            .map(|d| d.items.clone())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    items.extend(parse_items(specs, &currency)?);

    let outcome = engine.save_today(items)?;
    print_outcome(&outcome);
    Ok(())
}

/// Save any day's items; an empty list marks a past day missed
pub fn handle_save_day<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    day_index: u32,
    specs: &[String],
) -> DreamSpendResult<()> {
    engine.ensure_today();
    let currency = currency_of(engine, day_index)?;
    let items = parse_items(specs, &currency)?;

    let outcome = engine.save_day(day_index, items)?;
    print_outcome(&outcome);
    Ok(())
}

/// Handle a draft command
pub fn handle_draft_command<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    cmd: DraftCommands,
) -> DreamSpendResult<()> {
    match cmd {
        DraftCommands::Show { day } => {
            let day_index = resolve_day(engine, day)?;
            let currency = currency_of(engine, day_index)?;
            let draft = engine.draft_items(day_index);
            if draft.is_empty() {
                println!("No draft for day {}.", day_index);
            } else {
                let language = engine.settings().language;
                println!("Draft for day {}:", day_index);
                print!(
                    "{}",
                    crate::display::day::format_items(&draft, &currency, language)
                );
            }
        }

        DraftCommands::Set { items, day } => {
            let day_index = resolve_day(engine, day)?;
            let currency = currency_of(engine, day_index)?;
            let items = parse_items(&items, &currency)?;
            let count = items.len();
            engine.set_draft_items(day_index, items)?;
            println!("Draft for day {} updated ({} items).", day_index, count);
        }

        DraftCommands::Clear { day } => {
            let day_index = resolve_day(engine, day)?;
            engine.set_draft_items(day_index, Vec::new())?;
            println!("Draft for day {} cleared.", day_index);
        }
    }

    Ok(())
}

/// List days newest first, or show one day in detail
pub fn handle_history<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    day: Option<u32>,
    limit: usize,
) -> DreamSpendResult<()> {
    engine.ensure_today();
    let language = engine.settings().language;

    match day {
        Some(index) => {
            let entry = engine
                .days()
                .iter()
                .find(|d| d.day_index == index)
                .ok_or_else(|| DreamSpendError::day_not_found(index.to_string()))?;
            print!("{}", format_day_details(entry, language));
        }
        None => {
            let history: Vec<_> = engine.history().into_iter().take(limit).collect();
            println!("{}", format_history(&history, language).trim_end());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let item = parse_item("Lunch=12.50@Food", "USD").unwrap();
        assert_eq!(item.title, "Lunch");
        assert_eq!(item.amount.minor(), 1250);
        assert_eq!(item.category.as_deref(), Some("Food"));

        let item = parse_item("Tea=4,6", "EUR").unwrap();
        assert_eq!(item.amount.minor(), 460);
        assert_eq!(item.category, None);

        let item = parse_item("a=b=3", "USD").unwrap();
        assert_eq!(item.title, "a=b");
        assert_eq!(item.amount.minor(), 300);
    }

    #[test]
    fn test_parse_item_errors() {
        assert!(parse_item("Lunch", "USD").is_err());
        assert!(parse_item("Lunch=abc", "USD").is_err());
        assert!(parse_item("Lunch=-3", "USD").is_err());
    }
}
