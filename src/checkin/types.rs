//! Type definitions for a daily check-in.
//!
//! These types are both the validated form input and the persisted log
//! format, so their serde shape is the on-disk JSON shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest value a trait slider can take.
pub const SLIDER_MAX: u32 = 100;

/// Default position of every trait slider.
pub const SLIDER_DEFAULT: u32 = 40;

/// Rejected form input.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{trait_name} must be between 0 and 100, got {value}")]
    OutOfRange { trait_name: &'static str, value: f64 },

    #[error("{trait_name} must be a multiple of {step}, got {value}")]
    OffStep {
        trait_name: &'static str,
        value: u32,
        step: u32,
    },

    #[error("Unknown mood '{0}' (expected one of: drained, neutral, steady, energized, focused)")]
    UnknownMood(String),

    #[error("Unknown stage '{0}' (expected 3-7, a full stage label, or 'skip')")]
    UnknownStage(String),
}

// =============================================================================
// TRAITS
// =============================================================================

/// The four DISC trait keys, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraitKey {
    Dominance,
    Influence,
    Steadiness,
    Conscientiousness,
}

impl TraitKey {
    /// All keys in display order. Iteration order also breaks ties when
    /// picking a dominant trait.
    pub const ALL: [TraitKey; 4] = [
        TraitKey::Dominance,
        TraitKey::Influence,
        TraitKey::Steadiness,
        TraitKey::Conscientiousness,
    ];

    /// Single-letter code used in the log and the stage table.
    pub fn code(self) -> &'static str {
        match self {
            TraitKey::Dominance => "D",
            TraitKey::Influence => "I",
            TraitKey::Steadiness => "S",
            TraitKey::Conscientiousness => "C",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TraitKey::Dominance => "Dominance",
            TraitKey::Influence => "Influence",
            TraitKey::Steadiness => "Steadiness",
            TraitKey::Conscientiousness => "Conscientiousness",
        }
    }
}

impl fmt::Display for TraitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// Magnitudes for all four DISC traits, each in [0, 100].
///
/// Always holds exactly the four keys. Serialized as
/// `{"D": .., "I": .., "S": .., "C": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitSet {
    #[serde(rename = "D")]
    dominance: f64,
    #[serde(rename = "I")]
    influence: f64,
    #[serde(rename = "S")]
    steadiness: f64,
    #[serde(rename = "C")]
    conscientiousness: f64,
}

impl TraitSet {
    /// Build a trait set, rejecting negative, non-finite or >100 values.
    pub fn new(d: f64, i: f64, s: f64, c: f64) -> Result<Self, InputError> {
        for (key, value) in TraitKey::ALL.into_iter().zip([d, i, s, c]) {
            if !value.is_finite() || !(0.0..=SLIDER_MAX as f64).contains(&value) {
                return Err(InputError::OutOfRange {
                    trait_name: key.name(),
                    value,
                });
            }
        }

        Ok(Self {
            dominance: d,
            influence: i,
            steadiness: s,
            conscientiousness: c,
        })
    }

    /// Build a trait set from slider positions, which must sit on `step`.
    pub fn from_sliders(d: u32, i: u32, s: u32, c: u32, step: u32) -> Result<Self, InputError> {
        for (key, value) in TraitKey::ALL.into_iter().zip([d, i, s, c]) {
            if value > SLIDER_MAX {
                return Err(InputError::OutOfRange {
                    trait_name: key.name(),
                    value: value as f64,
                });
            }
            if step > 1 && value % step != 0 {
                return Err(InputError::OffStep {
                    trait_name: key.name(),
                    value,
                    step,
                });
            }
        }

        Self::new(d as f64, i as f64, s as f64, c as f64)
    }

    pub fn get(&self, key: TraitKey) -> f64 {
        match key {
            TraitKey::Dominance => self.dominance,
            TraitKey::Influence => self.influence,
            TraitKey::Steadiness => self.steadiness,
            TraitKey::Conscientiousness => self.conscientiousness,
        }
    }

    /// Values in display order D, I, S, C.
    pub fn values(&self) -> [f64; 4] {
        [
            self.dominance,
            self.influence,
            self.steadiness,
            self.conscientiousness,
        ]
    }

    /// `(key, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKey, f64)> + '_ {
        TraitKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

impl Default for TraitSet {
    fn default() -> Self {
        let v = SLIDER_DEFAULT as f64;
        Self {
            dominance: v,
            influence: v,
            steadiness: v,
            conscientiousness: v,
        }
    }
}

// =============================================================================
// MOOD
// =============================================================================

/// How the user feels right now. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😔 Drained")]
    Drained,
    #[serde(rename = "😐 Neutral")]
    Neutral,
    #[serde(rename = "🙂 Steady")]
    Steady,
    #[serde(rename = "😄 Energized")]
    Energized,
    #[serde(rename = "🧠 Focused & Inspired")]
    FocusedInspired,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Drained,
        Mood::Neutral,
        Mood::Steady,
        Mood::Energized,
        Mood::FocusedInspired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Drained => "😔 Drained",
            Mood::Neutral => "😐 Neutral",
            Mood::Steady => "🙂 Steady",
            Mood::Energized => "😄 Energized",
            Mood::FocusedInspired => "🧠 Focused & Inspired",
        }
    }

    /// Numeric score, 1 (drained) through 5 (focused & inspired).
    pub fn score(self) -> u8 {
        match self {
            Mood::Drained => 1,
            Mood::Neutral => 2,
            Mood::Steady => 3,
            Mood::Energized => 4,
            Mood::FocusedInspired => 5,
        }
    }

    /// Short name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Mood::Drained => "drained",
            Mood::Neutral => "neutral",
            Mood::Steady => "steady",
            Mood::Energized => "energized",
            Mood::FocusedInspired => "focused",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = InputError;

    /// Accepts the slug (case-insensitive), the numeric score, or the full label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| {
                m.slug() == lowered
                    || m.label() == trimmed
                    || m.score().to_string() == lowered
                    || (lowered == "focused & inspired" && *m == Mood::FocusedInspired)
            })
            .ok_or_else(|| InputError::UnknownMood(trimmed.to_string()))
    }
}

// =============================================================================
// FORM INPUT AND RECORD
// =============================================================================

/// Validated input of one check-in, before any scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinForm {
    pub mood: Mood,
    pub notes: String,
    pub traits: TraitSet,
    /// Self-reported stage; `None` when skipped.
    pub perceived_stage: Option<String>,
}

/// One entry of the check-in log.
///
/// Built once by [`CheckinRecord::assemble`] and never changed afterwards;
/// the log only ever appends these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinRecord {
    #[serde(with = "iso_timestamp")]
    timestamp: DateTime<Utc>,
    mood_label: Mood,
    mood_score: u8,
    mood_notes: String,
    traits: TraitSet,
    trait_score: f64,
    harmony_ratio: f64,
    perceived_stage: Option<String>,
    auto_stage: String,
}

impl CheckinRecord {
    /// Assemble a record from the form and the computed outputs.
    ///
    /// The timestamp is truncated to microseconds, the precision the log
    /// stores, so a record compares equal to itself after a reload.
    pub fn assemble(
        form: CheckinForm,
        trait_score: f64,
        harmony_ratio: f64,
        auto_stage: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(6),
            mood_label: form.mood,
            mood_score: form.mood.score(),
            mood_notes: form.notes,
            traits: form.traits,
            trait_score,
            harmony_ratio,
            perceived_stage: form.perceived_stage,
            auto_stage,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn mood(&self) -> Mood {
        self.mood_label
    }

    pub fn mood_score(&self) -> u8 {
        self.mood_score
    }

    pub fn notes(&self) -> &str {
        &self.mood_notes
    }

    pub fn traits(&self) -> &TraitSet {
        &self.traits
    }

    pub fn trait_score(&self) -> f64 {
        self.trait_score
    }

    pub fn harmony_ratio(&self) -> f64 {
        self.harmony_ratio
    }

    pub fn perceived_stage(&self) -> Option<&str> {
        self.perceived_stage.as_deref()
    }

    pub fn auto_stage(&self) -> &str {
        &self.auto_stage
    }
}

/// ISO-8601 UTC timestamps without an offset suffix, e.g.
/// `2025-03-01T08:15:00.123456`. RFC 3339 input with an offset is also
/// accepted.
pub(crate) mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
