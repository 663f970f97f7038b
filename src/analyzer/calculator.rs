//! Scoring with silent fallback to the local formulas.

use tracing::warn;

use crate::checkin::TraitSet;

use super::local::LocalAnalyzer;
use super::types::{ProfileAnalyzer, Scores, ScoringSource};

/// Scores a trait set with the configured analyzer. Analyzer errors never
/// reach the caller: they are logged and the local formulas are used.
pub struct ScoreCalculator {
    analyzer: Box<dyn ProfileAnalyzer>,
}

impl ScoreCalculator {
    pub fn new(analyzer: Box<dyn ProfileAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Calculator using only the local formulas.
    pub fn local() -> Self {
        Self::new(Box::new(LocalAnalyzer))
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    pub fn score(&self, traits: &TraitSet, perceived_stage: Option<&str>) -> Scores {
        match self.analyzer.analyze(traits, perceived_stage) {
            Ok(result) => Scores {
                trait_score: result.trait_score,
                harmony_ratio: result.harmony_ratio,
                source: ScoringSource::Analyzer(self.analyzer.name().to_string()),
            },
            Err(e) => {
                warn!(
                    "Analyzer '{}' failed, using local formulas: {}",
                    self.analyzer.name(),
                    e
                );
                let local = LocalAnalyzer::scores(traits);
                Scores {
                    trait_score: local.trait_score,
                    harmony_ratio: local.harmony_ratio,
                    source: ScoringSource::Fallback,
                }
            }
        }
    }
}
