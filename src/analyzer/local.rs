use crate::checkin::{composite_score, harmony_ratio, TraitSet};

use super::types::{AnalyzerError, AnalyzerScores, ProfileAnalyzer};

/// Deterministic analyzer backed by the local formulas. The perceived
/// stage does not affect the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAnalyzer;

impl LocalAnalyzer {
    pub fn scores(traits: &TraitSet) -> AnalyzerScores {
        AnalyzerScores {
            trait_score: composite_score(traits),
            harmony_ratio: harmony_ratio(traits),
        }
    }
}

impl ProfileAnalyzer for LocalAnalyzer {
    fn name(&self) -> &str {
        "local"
    }

    fn analyze(
        &self,
        traits: &TraitSet,
        _stage_label: Option<&str>,
    ) -> Result<AnalyzerScores, AnalyzerError> {
        Ok(Self::scores(traits))
    }
}
