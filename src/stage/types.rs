//! Type definitions for the stage table.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::checkin::{InputError, TraitKey};
use crate::external::ExternalError;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Failed to read stage table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid stage table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    External(#[from] ExternalError),

    #[error("Stage mapper returned no label")]
    EmptyLabel,
}

/// Stage labels keyed by dominant trait code, loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct StageTable {
    /// Label used when the dominant trait has no entry
    pub default: String,
    /// Trait code ("D", "I", "S", "C") to stage label
    pub stages: BTreeMap<String, String>,
    /// Options for the self-reported stage, in display order
    #[serde(default)]
    pub perceived: Vec<PerceivedStage>,
}

/// One selectable self-reported stage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PerceivedStage {
    pub number: u8,
    pub label: String,
}

impl StageTable {
    /// Label for a dominant trait, or the table default.
    pub fn label_for(&self, key: TraitKey) -> &str {
        self.stages
            .get(key.code())
            .map(String::as_str)
            .unwrap_or(self.default.as_str())
    }

    /// Resolve user input for the self-reported stage.
    ///
    /// `skip`, `(skip)` or blank means no stage. Otherwise the input must be
    /// a stage number or a full label from the `perceived` list.
    pub fn resolve_perceived(&self, input: &str) -> Result<Option<String>, InputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("skip") || trimmed == "(skip)" {
            return Ok(None);
        }

        self.perceived
            .iter()
            .find(|p| p.label == trimmed || p.number.to_string() == trimmed)
            .map(|p| Some(p.label.clone()))
            .ok_or_else(|| InputError::UnknownStage(trimmed.to_string()))
    }
}
