//! TOML loading for the stage table.
//!
//! - `default_stage_table()` - the table compiled into the binary
//! - `load_stage_table(path)` - a user-supplied replacement

use std::path::Path;

use super::types::{StageError, StageTable};

/// Embedded from `config/stage_table.toml`.
const DEFAULT_TABLE: &str = include_str!("../../config/stage_table.toml");

/// Load a stage table from a TOML file.
pub fn load_stage_table(path: &Path) -> Result<StageTable, StageError> {
    let content = std::fs::read_to_string(path).map_err(|source| StageError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let table: StageTable = toml::from_str(&content)?;
    Ok(table)
}

/// The stage table embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_stage_table() -> StageTable {
    toml::from_str(DEFAULT_TABLE).expect("embedded stage_table.toml must be valid TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::TraitKey;
    use std::io::Write;

    #[test]
    fn test_default_table_covers_every_trait() {
        let table = default_stage_table();
        for key in TraitKey::ALL {
            assert!(table.stages.contains_key(key.code()), "missing {}", key.code());
        }
        assert_eq!(table.default, "Stage 5 — Identity vs. Role Confusion");
    }

    #[test]
    fn test_default_table_labels() {
        let table = default_stage_table();
        assert_eq!(table.label_for(TraitKey::Dominance), "Stage 4 — Initiative vs. Guilt");
        assert_eq!(table.label_for(TraitKey::Influence), "Stage 5 — Identity vs. Role Confusion");
        assert_eq!(table.label_for(TraitKey::Steadiness), "Stage 6 — Intimacy vs. Isolation");
        assert_eq!(
            table.label_for(TraitKey::Conscientiousness),
            "Stage 7 — Generativity vs. Stagnation"
        );
    }

    #[test]
    fn test_default_table_has_five_perceived_options() {
        let table = default_stage_table();
        let numbers: Vec<u8> = table.perceived.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_missing_trait_falls_back_to_default() {
        let table: StageTable = toml::from_str(
            r#"
            default = "Fallback"
            [stages]
            D = "Only D"
            "#,
        )
        .unwrap();

        assert_eq!(table.label_for(TraitKey::Dominance), "Only D");
        assert_eq!(table.label_for(TraitKey::Steadiness), "Fallback");
        assert!(table.perceived.is_empty());
    }

    #[test]
    fn test_resolve_perceived() {
        let table = default_stage_table();
        assert_eq!(table.resolve_perceived("skip").unwrap(), None);
        assert_eq!(table.resolve_perceived("(skip)").unwrap(), None);
        assert_eq!(table.resolve_perceived("  ").unwrap(), None);
        assert_eq!(
            table.resolve_perceived("4").unwrap().as_deref(),
            Some("Stage 4 — Industry vs. Inferiority")
        );
        assert_eq!(
            table
                .resolve_perceived("Stage 6 — Intimacy vs. Isolation")
                .unwrap()
                .as_deref(),
            Some("Stage 6 — Intimacy vs. Isolation")
        );
        assert!(table.resolve_perceived("9").is_err());
    }

    #[test]
    fn test_load_stage_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "default = \"X\"\n[stages]\nD = \"A\"\nI = \"B\"\nS = \"C\"\nC = \"D\"\n"
        )
        .unwrap();

        let table = load_stage_table(file.path()).unwrap();
        assert_eq!(table.label_for(TraitKey::Conscientiousness), "D");
    }

    #[test]
    fn test_load_stage_table_errors() {
        assert!(matches!(
            load_stage_table(Path::new("/nonexistent/stages.toml")),
            Err(StageError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not = [valid").unwrap();
        assert!(matches!(load_stage_table(file.path()), Err(StageError::Parse(_))));
    }
}
