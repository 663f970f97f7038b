//! External analyzer invoked as a child process.
//!
//! Protocol: one JSON object on stdin
//! (`{"d":..,"i":..,"s":..,"c":..,"stage_label":..}`), one JSON object on
//! stdout with `trait_score` and `harmony_ratio`.

use tracing::debug;

use crate::checkin::TraitSet;
use crate::external::ExternalCommand;

use super::types::{AnalyzerError, AnalyzerRequest, AnalyzerScores, ProfileAnalyzer};

#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    command: ExternalCommand,
}

impl CommandAnalyzer {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl ProfileAnalyzer for CommandAnalyzer {
    fn name(&self) -> &str {
        self.command.program()
    }

    fn analyze(
        &self,
        traits: &TraitSet,
        stage_label: Option<&str>,
    ) -> Result<AnalyzerScores, AnalyzerError> {
        let request = serde_json::to_vec(&AnalyzerRequest::new(traits, stage_label))?;
        let stdout = self.command.run(&[], Some(&request))?;
        let scores: AnalyzerScores = serde_json::from_slice(&stdout)?;

        if !scores.trait_score.is_finite() {
            return Err(AnalyzerError::NonFinite("trait_score"));
        }
        if !scores.harmony_ratio.is_finite() {
            return Err(AnalyzerError::NonFinite("harmony_ratio"));
        }

        debug!(
            "Analyzer {} returned trait_score={} harmony_ratio={}",
            self.command.program(),
            scores.trait_score,
            scores.harmony_ratio
        );
        Ok(scores)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn analyzer(script: &str) -> CommandAnalyzer {
        let argv = vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        CommandAnalyzer::new(ExternalCommand::from_argv(&argv).unwrap())
    }

    fn traits() -> TraitSet {
        TraitSet::new(50.0, 50.0, 50.0, 50.0).unwrap()
    }

    #[test]
    fn test_parses_scores_from_stdout() {
        let a = analyzer(r#"cat >/dev/null; echo '{"trait_score": 72.5, "harmony_ratio": 33.0}'"#);
        let scores = a.analyze(&traits(), Some("Stage 5 — Identity vs. Role Confusion")).unwrap();
        assert_eq!(scores.trait_score, 72.5);
        assert_eq!(scores.harmony_ratio, 33.0);
    }

    #[test]
    fn test_receives_request_on_stdin() {
        // Only answers when stage_label arrived as null.
        let a = analyzer(
            r#"grep -q '"stage_label":null' && echo '{"trait_score": 1, "harmony_ratio": 2}'"#,
        );
        let scores = a.analyze(&traits(), None).unwrap();
        assert_eq!(scores.trait_score, 1.0);
    }

    #[test]
    fn test_answer_without_reading_stdin_is_kept() {
        let a = analyzer(r#"echo '{"trait_score": 1, "harmony_ratio": 2}'"#);
        for _ in 0..200 {
            let scores = a.analyze(&traits(), None).unwrap();
            assert_eq!(scores.trait_score, 1.0);
            assert_eq!(scores.harmony_ratio, 2.0);
        }
    }

    #[test]
    fn test_garbage_output_is_error() {
        let a = analyzer("cat >/dev/null; echo not json");
        assert!(matches!(
            a.analyze(&traits(), None),
            Err(AnalyzerError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_failed_exit_is_error() {
        let a = analyzer("cat >/dev/null; exit 1");
        assert!(matches!(
            a.analyze(&traits(), None),
            Err(AnalyzerError::External(_))
        ));
    }
}
