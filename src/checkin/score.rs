//! Local score formulas: composite score, harmony ratio and the
//! per-trait breakdown.
//!
//! All functions here are pure and infallible. They are the fallback
//! whenever an external analyzer is absent or fails.

use std::fmt::Write;

use super::types::{TraitKey, TraitSet};

/// Closing tip appended to every breakdown.
pub const COACHING_TIP: &str = "Use your dominant style as a starting point today, \
but deliberately give one supporting or background style a small job to do.";

const BREAKDOWN_HEADER: &str = "Your DISC trait snapshot for today:";

/// Arithmetic mean of the four trait magnitudes.
pub fn composite_score(traits: &TraitSet) -> f64 {
    let values = traits.values();
    values.iter().sum::<f64>() / values.len() as f64
}

/// Balance score in [0, 100]: `100 - 2 * population_variance`, clamped.
///
/// Equal non-zero magnitudes give exactly 100. An all-zero set gives 0.
pub fn harmony_ratio(traits: &TraitSet) -> f64 {
    let values = traits.values();
    let mean = composite_score(traits);
    if mean == 0.0 {
        return 0.0;
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (100.0 - variance * 2.0).clamp(0.0, 100.0)
}

/// How much of the total a trait accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareLabel {
    /// 40% or more
    Dominant,
    /// 25% up to 40%
    Supporting,
    /// Above 0% but under 25%
    Background,
    Inactive,
}

impl ShareLabel {
    pub fn from_percent(pct: f64) -> Self {
        if pct >= 40.0 {
            ShareLabel::Dominant
        } else if pct >= 25.0 {
            ShareLabel::Supporting
        } else if pct > 0.0 {
            ShareLabel::Background
        } else {
            ShareLabel::Inactive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShareLabel::Dominant => "dominant",
            ShareLabel::Supporting => "supporting",
            ShareLabel::Background => "background",
            ShareLabel::Inactive => "inactive",
        }
    }
}

/// A trait's percentage of the combined magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitShare {
    pub key: TraitKey,
    pub percent: f64,
    pub label: ShareLabel,
}

/// Shares for all four traits in display order. A zero total is treated
/// as 1 so every share is then 0%.
pub fn trait_shares(traits: &TraitSet) -> [TraitShare; 4] {
    let total = match traits.total() {
        t if t == 0.0 => 1.0,
        t => t,
    };

    TraitKey::ALL.map(|key| {
        let percent = traits.get(key) / total * 100.0;
        TraitShare {
            key,
            percent,
            label: ShareLabel::from_percent(percent),
        }
    })
}

/// Multi-line, human-readable breakdown ending with the coaching tip.
pub fn trait_breakdown(traits: &TraitSet) -> String {
    let mut out = String::new();
    out.push_str(BREAKDOWN_HEADER);
    out.push_str("\n\n");

    for share in trait_shares(traits) {
        let _ = writeln!(
            out,
            "- {} ({}): {:5.1}% → {}",
            share.key.code(),
            share.key.name(),
            share.percent,
            share.label.as_str()
        );
    }

    out.push('\n');
    out.push_str(COACHING_TIP);
    out
}
