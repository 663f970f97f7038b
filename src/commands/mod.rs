//! Command-line surface: the check-in form, history preview and option
//! listing.

pub mod checkin;
pub mod context;
pub mod display;
pub mod history;
pub mod options;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

pub use checkin::CheckinArgs;
pub use context::AppContext;
pub use history::HistoryArgs;

#[derive(Debug, Parser)]
#[command(
    name = "coachlite",
    version,
    about = "Daily mood and DISC check-in with a local log and PDF report"
)]
pub struct Cli {
    /// Config file (defaults to $COACHLITE_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the check-in log (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record today's check-in, print the snapshot and write the PDF report
    Checkin(CheckinArgs),
    /// Show recent check-ins, most recent first
    History(HistoryArgs),
    /// List the selectable moods and stages
    Options,
}

/// Load config, build the context and run the selected command.
pub fn dispatch(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let ctx = AppContext::from_config(config)?;

    match cli.command {
        Command::Checkin(args) => checkin::run(&ctx, args),
        Command::History(args) => history::run(&ctx, args),
        Command::Options => options::run(&ctx),
    }
}
