//! Stage suggestion from DISC trait magnitudes.
//!
//! A [`StageSuggester`] is built once at startup with an optional external
//! mapper. The table-driven [`TableStageMapper`] always backs it up, so a
//! suggested stage is always produced.
//!
//! # Example
//!
//! ```ignore
//! use coachlite::stage::{default_stage_table, StageSuggester, TableStageMapper};
//! use coachlite::checkin::TraitSet;
//!
//! let suggester = StageSuggester::new(None, TableStageMapper::new(default_stage_table()));
//! let traits = TraitSet::new(80.0, 40.0, 40.0, 40.0)?;
//! assert_eq!(suggester.suggest(&traits), "Stage 4 — Initiative vs. Guilt");
//! ```

mod mapper;
mod table;
mod types;

pub use mapper::{dominant_trait, CommandStageMapper, StageMapper, StageSuggester, TableStageMapper};
pub use table::{default_stage_table, load_stage_table};
pub use types::*;
