//! Profile analysis: composite trait score and harmony ratio.
//!
//! The analyzer variant is chosen once at startup: [`LocalAnalyzer`] runs
//! the local formulas, [`CommandAnalyzer`] delegates to an external
//! program. [`ScoreCalculator`] wraps either one and falls back to the
//! local formulas whenever the analyzer fails.

pub mod calculator;
pub mod command;
pub mod local;
pub mod types;

pub use calculator::ScoreCalculator;
pub use command::CommandAnalyzer;
pub use local::LocalAnalyzer;
pub use types::*;
