//! Stage mappers and the suggester that chains them.

use tracing::{debug, warn};

use crate::checkin::{TraitKey, TraitSet};
use crate::external::ExternalCommand;

use super::types::{StageError, StageTable};

/// Maps trait magnitudes to a suggested stage label.
pub trait StageMapper {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn map_stage(&self, traits: &TraitSet) -> Result<String, StageError>;
}

/// The trait with the highest magnitude. Ties go to the earliest key in
/// D, I, S, C order.
pub fn dominant_trait(traits: &TraitSet) -> TraitKey {
    let mut best = TraitKey::Dominance;
    let mut best_value = traits.get(best);
    for (key, value) in traits.iter().skip(1) {
        if value > best_value {
            best = key;
            best_value = value;
        }
    }
    best
}

/// Local mapper: dominant trait looked up in a [`StageTable`].
#[derive(Debug, Clone)]
pub struct TableStageMapper {
    table: StageTable,
}

impl TableStageMapper {
    pub fn new(table: StageTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StageTable {
        &self.table
    }

    /// Infallible form of [`StageMapper::map_stage`].
    pub fn label(&self, traits: &TraitSet) -> String {
        self.table.label_for(dominant_trait(traits)).to_string()
    }
}

impl StageMapper for TableStageMapper {
    fn name(&self) -> &str {
        "table"
    }

    fn map_stage(&self, traits: &TraitSet) -> Result<String, StageError> {
        Ok(self.label(traits))
    }
}

/// External mapper: runs a program with the four magnitudes as trailing
/// arguments (D I S C) and reads the label from the first non-empty line
/// of its stdout.
#[derive(Debug, Clone)]
pub struct CommandStageMapper {
    command: ExternalCommand,
}

impl CommandStageMapper {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl StageMapper for CommandStageMapper {
    fn name(&self) -> &str {
        self.command.program()
    }

    fn map_stage(&self, traits: &TraitSet) -> Result<String, StageError> {
        let args: Vec<String> = traits.values().iter().map(|v| v.to_string()).collect();
        let stdout = self.command.run(&args, None)?;
        let text = String::from_utf8_lossy(&stdout);

        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(StageError::EmptyLabel)
    }
}

/// Suggests a stage using an optional primary mapper, falling back to the
/// table mapper whenever the primary is absent or fails.
pub struct StageSuggester {
    primary: Option<Box<dyn StageMapper>>,
    fallback: TableStageMapper,
}

impl StageSuggester {
    pub fn new(primary: Option<Box<dyn StageMapper>>, fallback: TableStageMapper) -> Self {
        Self { primary, fallback }
    }

    /// Table-only suggester.
    pub fn local(table: StageTable) -> Self {
        Self::new(None, TableStageMapper::new(table))
    }

    /// The table behind the fallback mapper (also lists perceived stages).
    pub fn table(&self) -> &StageTable {
        self.fallback.table()
    }

    pub fn suggest(&self, traits: &TraitSet) -> String {
        if let Some(primary) = &self.primary {
            match primary.map_stage(traits) {
                Ok(label) => {
                    debug!("Stage from {}: {}", primary.name(), label);
                    return label;
                }
                Err(e) => warn!(
                    "Stage mapper '{}' failed, using stage table: {}",
                    primary.name(),
                    e
                ),
            }
        }

        self.fallback.label(traits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::default_stage_table;

    struct BrokenMapper;

    impl StageMapper for BrokenMapper {
        fn name(&self) -> &str {
            "broken"
        }

        fn map_stage(&self, _traits: &TraitSet) -> Result<String, StageError> {
            Err(StageError::EmptyLabel)
        }
    }

    struct FixedMapper(&'static str);

    impl StageMapper for FixedMapper {
        fn name(&self) -> &str {
            "fixed"
        }

        fn map_stage(&self, _traits: &TraitSet) -> Result<String, StageError> {
            Ok(self.0.to_string())
        }
    }

    fn traits(d: f64, i: f64, s: f64, c: f64) -> TraitSet {
        TraitSet::new(d, i, s, c).unwrap()
    }

    #[test]
    fn test_dominant_trait_picks_maximum() {
        assert_eq!(dominant_trait(&traits(10.0, 90.0, 20.0, 30.0)), TraitKey::Influence);
        assert_eq!(dominant_trait(&traits(10.0, 20.0, 20.0, 95.0)), TraitKey::Conscientiousness);
    }

    #[test]
    fn test_dominant_trait_ties_follow_declaration_order() {
        assert_eq!(dominant_trait(&traits(40.0, 40.0, 40.0, 40.0)), TraitKey::Dominance);
        assert_eq!(dominant_trait(&traits(10.0, 70.0, 70.0, 70.0)), TraitKey::Influence);
        assert_eq!(dominant_trait(&traits(0.0, 0.0, 55.0, 55.0)), TraitKey::Steadiness);
    }

    #[test]
    fn test_table_mapper_strict_dominance() {
        let mapper = TableStageMapper::new(default_stage_table());
        assert_eq!(
            mapper.map_stage(&traits(80.0, 40.0, 40.0, 40.0)).unwrap(),
            "Stage 4 — Initiative vs. Guilt"
        );
    }

    #[test]
    fn test_suggester_uses_primary_when_it_succeeds() {
        let suggester = StageSuggester::new(
            Some(Box::new(FixedMapper("Custom stage"))),
            TableStageMapper::new(default_stage_table()),
        );
        assert_eq!(suggester.suggest(&traits(80.0, 40.0, 40.0, 40.0)), "Custom stage");
    }

    #[test]
    fn test_suggester_falls_back_when_primary_fails() {
        let with_broken = StageSuggester::new(
            Some(Box::new(BrokenMapper)),
            TableStageMapper::new(default_stage_table()),
        );
        let local = StageSuggester::local(default_stage_table());
        let t = traits(80.0, 40.0, 40.0, 40.0);

        assert_eq!(with_broken.suggest(&t), "Stage 4 — Initiative vs. Guilt");
        assert_eq!(local.suggest(&t), with_broken.suggest(&t));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_mapper_reads_first_line() {
        let argv: Vec<String> = ["sh", "-c", "echo; echo \"D=$1 C=$4\"; echo ignored", "sh"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mapper = CommandStageMapper::new(ExternalCommand::from_argv(&argv).unwrap());

        let label = mapper.map_stage(&traits(80.0, 40.0, 40.0, 15.0)).unwrap();
        assert_eq!(label, "D=80 C=15");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_mapper_silent_output_is_error() {
        let argv = vec!["true".to_string()];
        let mapper = CommandStageMapper::new(ExternalCommand::from_argv(&argv).unwrap());
        assert!(matches!(
            mapper.map_stage(&traits(1.0, 2.0, 3.0, 4.0)),
            Err(StageError::EmptyLabel)
        ));
    }
}
