//! One check-in pass: score, suggest a stage, assemble, persist.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analyzer::{ScoreCalculator, ScoringSource};
use crate::history::{CheckinStore, StoreError};
use crate::stage::StageSuggester;

use super::score::trait_breakdown;
use super::types::{CheckinForm, CheckinRecord};

/// Result of a successful check-in.
#[derive(Debug, Clone)]
pub struct CheckinOutcome {
    /// The record as appended to the log
    pub record: CheckinRecord,
    /// Human-readable trait breakdown
    pub breakdown: String,
    /// Whether the analyzer or the local formulas produced the numbers
    pub source: ScoringSource,
}

/// Ties together the scoring, stage and storage collaborators chosen at
/// startup.
pub struct CheckinService {
    calculator: ScoreCalculator,
    stages: StageSuggester,
    store: CheckinStore,
}

impl CheckinService {
    pub fn new(calculator: ScoreCalculator, stages: StageSuggester, store: CheckinStore) -> Self {
        Self {
            calculator,
            stages,
            store,
        }
    }

    pub fn store(&self) -> &CheckinStore {
        &self.store
    }

    pub fn stages(&self) -> &StageSuggester {
        &self.stages
    }

    /// Run a check-in stamped with the current time.
    pub fn submit(&self, form: CheckinForm) -> Result<CheckinOutcome, StoreError> {
        self.submit_at(form, Utc::now())
    }

    /// Run a check-in with an explicit timestamp.
    ///
    /// Scoring and stage suggestion cannot fail (both fall back locally);
    /// only the log write can.
    pub fn submit_at(
        &self,
        form: CheckinForm,
        timestamp: DateTime<Utc>,
    ) -> Result<CheckinOutcome, StoreError> {
        let scores = self
            .calculator
            .score(&form.traits, form.perceived_stage.as_deref());
        let auto_stage = self.stages.suggest(&form.traits);
        let breakdown = trait_breakdown(&form.traits);

        let record = CheckinRecord::assemble(
            form,
            scores.trait_score,
            scores.harmony_ratio,
            auto_stage,
            timestamp,
        );
        self.store.append(&record)?;

        info!(
            "Check-in saved: mood={} score={:.1} harmony={:.1} stage={}",
            record.mood().slug(),
            record.trait_score(),
            record.harmony_ratio(),
            record.auto_stage()
        );

        Ok(CheckinOutcome {
            record,
            breakdown,
            source: scores.source,
        })
    }
}
