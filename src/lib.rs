#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod folders;
pub mod helpers;
pub mod instapaper;
pub mod ledger;
pub mod migrate;
pub mod models;
pub mod output;

use anyhow::Result;

use cli::{Cli, Commands, MigrateArgs};
use output::Output;

pub use error::Error;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => {
            let summary = commands::migrate::run(MigrateArgs::default())?;
            Output::new(false).migration_summary(&summary)
        }
        Some(Commands::Migrate(args)) => {
            let json = args.json;
            let summary = commands::migrate::run(args)?;
            Output::new(json).migration_summary(&summary)
        }
        Some(Commands::Extract { archive, json }) => {
            let articles = commands::extract::run(archive)?;
            Output::new(json).articles(&articles)
        }
        Some(Commands::Folders { json }) => {
            let folders = commands::folders::run()?;
            Output::new(json).folders(&folders)
        }
    }
}
