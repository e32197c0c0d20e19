use anyhow::Result;
use clap::{Parser, Subcommand};

use dreamspend::audit::{AuditEntry, AuditLogger};
use dreamspend::cli::{
    handle_achievements, handle_category_command, handle_dismiss, handle_draft_command,
    handle_history, handle_log, handle_restart, handle_save_day, handle_settings_command,
    handle_spend, handle_today, CategoryCommands, DraftCommands, SettingsCommands,
};
use dreamspend::config::{init_tracing, DreamSpendPaths};
use dreamspend::models::Settings;
use dreamspend::services::{EngineEvent, EventListener, ProgressionEngine, SystemClock};
use dreamspend::storage::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "dreamspend",
    version,
    about = "Daily spending-allowance game",
    long_about = "DreamSpend gives you a daily allowance that doubles every day \
                  until it reaches your maximum. Log what you spend, keep your \
                  streak going and collect achievements."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's allowance and spending
    Today,

    /// Save today's spending (items as TITLE=AMOUNT[@CATEGORY])
    Spend {
        #[arg(required = true)]
        items: Vec<String>,
        /// Keep the items already saved today
        #[arg(short, long)]
        append: bool,
    },

    /// Save the spending of a given day; no items marks a past day missed
    #[command(name = "save-day")]
    SaveDay {
        day: u32,
        items: Vec<String>,
    },

    /// Work with in-progress drafts
    #[command(subcommand)]
    Draft(DraftCommands),

    /// List past days, newest first
    History {
        /// Show a single day in detail
        #[arg(short, long)]
        day: Option<u32>,
        /// Number of days to list
        #[arg(short, long, default_value = "30")]
        limit: usize,
    },

    /// Show achievements
    Achievements,

    /// Manage spending categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// View and change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Start over from day 1, keeping settings
    Restart {
        #[arg(long)]
        yes: bool,
    },

    /// Dismiss the "maximum reached" celebration
    Dismiss,

    /// Show the event journal
    Log {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show data paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = DreamSpendPaths::new()?;
    paths.ensure_directories()?;

    match cli.command {
        Some(Commands::Config) => {
            println!("DreamSpend Configuration");
            println!("========================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Snapshot:       {}", paths.snapshot_file().display());
            println!("Journal:        {}", paths.journal_file().display());
            println!(
                "Saved game:     {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            return Ok(());
        }
        Some(Commands::Log { limit }) => {
            handle_log(&AuditLogger::new(paths.journal_file()), limit)?;
            return Ok(());
        }
        _ => {}
    }

    let journal = AuditLogger::new(paths.journal_file());
    let listener: EventListener = Box::new(move |event: &EngineEvent| {
        if let Err(e) = journal.log(&AuditEntry::new(event.clone())) {
            tracing::warn!(error = %e, "Failed to write journal entry");
        }
    });

    let mut engine = ProgressionEngine::load_with(
        JsonFileStore::new(paths.snapshot_file()),
        SystemClock,
        Settings::default,
        vec![listener],
    );

    match cli.command {
        None | Some(Commands::Today) => handle_today(&mut engine)?,
        Some(Commands::Spend { items, append }) => handle_spend(&mut engine, &items, append)?,
        Some(Commands::SaveDay { day, items }) => handle_save_day(&mut engine, day, &items)?,
        Some(Commands::Draft(cmd)) => handle_draft_command(&mut engine, cmd)?,
        Some(Commands::History { day, limit }) => handle_history(&mut engine, day, limit)?,
        Some(Commands::Achievements) => handle_achievements(&mut engine)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut engine, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&mut engine, cmd)?,
        Some(Commands::Restart { yes }) => handle_restart(&mut engine, yes)?,
        Some(Commands::Dismiss) => handle_dismiss(&mut engine)?,
        Some(Commands::Log { .. }) | Some(Commands::Config) => {}
    }

    Ok(())
}
