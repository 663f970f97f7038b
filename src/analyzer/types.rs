//! Type definitions for profile analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkin::TraitSet;
use crate::external::ExternalError;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    External(#[from] ExternalError),

    #[error("Analyzer returned invalid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("Analyzer returned a non-finite {0}")]
    NonFinite(&'static str),
}

/// Computes the two aggregate numbers for a trait set.
pub trait ProfileAnalyzer {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn analyze(
        &self,
        traits: &TraitSet,
        stage_label: Option<&str>,
    ) -> Result<AnalyzerScores, AnalyzerError>;
}

/// What an analyzer returns. Missing keys read as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerScores {
    #[serde(default)]
    pub trait_score: f64,
    #[serde(default)]
    pub harmony_ratio: f64,
}

/// Payload written to an external analyzer's stdin.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerRequest<'a> {
    pub d: f64,
    pub i: f64,
    pub s: f64,
    pub c: f64,
    pub stage_label: Option<&'a str>,
}

impl<'a> AnalyzerRequest<'a> {
    pub fn new(traits: &TraitSet, stage_label: Option<&'a str>) -> Self {
        let [d, i, s, c] = traits.values();
        Self {
            d,
            i,
            s,
            c,
            stage_label,
        }
    }
}

/// Where a check-in's numbers came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringSource {
    /// The configured analyzer produced them.
    Analyzer(String),
    /// The analyzer failed; local formulas were used.
    Fallback,
}

/// Final numbers for one check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    pub trait_score: f64,
    pub harmony_ratio: f64,
    pub source: ScoringSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_missing_keys_default_to_zero() {
        let scores: AnalyzerScores = serde_json::from_str(r#"{"trait_score": 61.5}"#).unwrap();
        assert_eq!(scores.trait_score, 61.5);
        assert_eq!(scores.harmony_ratio, 0.0);

        let extra: AnalyzerScores =
            serde_json::from_str(r#"{"harmony_ratio": 80, "stage": "x"}"#).unwrap();
        assert_eq!(extra.harmony_ratio, 80.0);
    }

    #[test]
    fn test_request_serialize() {
        let traits = TraitSet::new(10.0, 20.0, 30.0, 40.0).unwrap();
        let json = serde_json::to_string(&AnalyzerRequest::new(&traits, None)).unwrap();
        assert_eq!(
            json,
            r#"{"d":10.0,"i":20.0,"s":30.0,"c":40.0,"stage_label":null}"#
        );
    }
}
