//! Category CLI commands

use clap::Subcommand;

use crate::error::{DreamSpendError, DreamSpendResult};
use crate::services::{Clock, ProgressionEngine};
use crate::storage::PersistenceGateway;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List built-in and custom categories
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a custom category
    #[command(alias = "rm")]
    Remove {
        /// Category name (case-insensitive)
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command<P: PersistenceGateway, C: Clock>(
    engine: &mut ProgressionEngine<P, C>,
    cmd: CategoryCommands,
) -> DreamSpendResult<()> {
    match cmd {
        CategoryCommands::List => {
            engine.ensure_today();
            println!("Built-in:");
            for category in engine.default_categories() {
                println!("  {}", category);
            }
            println!("Custom:");
            if engine.custom_categories().is_empty() {
                println!("  (none)");
            }
            for category in engine.custom_categories() {
                println!("  {}", category);
            }
        }

        CategoryCommands::Add { name } => {
            if name.trim().is_empty() {
                return Err(DreamSpendError::Validation(
                    "Category name cannot be empty".into(),
                ));
            }
            if engine.add_custom_category(&name) {
                println!("Added category: {}", name.trim());
            } else {
                println!("Category already exists: {}", name.trim());
            }
        }

        CategoryCommands::Remove { name } => {
            if !engine.remove_custom_category(&name) {
                return Err(DreamSpendError::NotFound {
                    entity_type: "Category",
                    identifier: name,
                });
            }
            println!("Removed category: {}", name.trim());
        }
    }

    Ok(())
}
