pub mod analyzer;
pub mod checkin;
pub mod commands;
pub mod config;
mod error;
pub mod external;
pub mod history;
pub mod report;
pub mod stage;

use clap::Parser;

pub use checkin::{CheckinForm, CheckinOutcome, CheckinRecord, CheckinService, Mood, TraitSet};
pub use config::AppConfig;
pub use error::CoachLiteError;
pub use history::CheckinStore;

/// Entry point for the `coachlite` binary.
pub fn run() -> anyhow::Result<()> {
    // Quiet by default so the check-in output stays readable; RUST_LOG opts in.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = commands::Cli::parse();
    commands::dispatch(cli)?;
    Ok(())
}
