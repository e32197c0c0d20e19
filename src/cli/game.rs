//! Game-level CLI commands: achievements, restart, celebration and journal

use crate::audit::AuditLogger;
use crate::display::format_achievement_list;
use crate::error::{DreamSpendError, DreamSpendResult};
use crate::services::{Clock, ProgressionEngine};
use crate::storage::PersistenceGateway;

/// Show the achievement catalog
pub fn handle_achievements<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
) -> DreamSpendResult<()> {
    engine.ensure_today();
    print!(
        "{}",
        format_achievement_list(engine.achievements(), engine.streak())
    );
    Ok(())
}

/// Start over from day 1
pub fn handle_restart<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    confirmed: bool,
) -> DreamSpendResult<()> {
    if !confirmed {
        return Err(DreamSpendError::Validation(
            "Restarting erases all days and achievements; pass --yes to confirm".into(),
        ));
    }

    engine.restart();
    let language = engine.settings().language;
    if let Some(today) = engine.today_entry() {
        println!(
            "Game restarted. Day 1 allowance: {}",
            today.daily_limit.format(&today.currency, language)
        );
    }
    Ok(())
}

/// Acknowledge the "reached maximum" celebration
pub fn handle_dismiss<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
) -> DreamSpendResult<()> {
    if engine.celebration_pending() {
        engine.dismiss_celebration();
        println!("Celebration dismissed.");
    } else {
        println!("Nothing to dismiss.");
    }
    Ok(())
}

/// Print the most recent journal entries
pub fn handle_log(logger: &AuditLogger, limit: usize) -> DreamSpendResult<()> {
    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("Journal is empty.");
    }
    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
