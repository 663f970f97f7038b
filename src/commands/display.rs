//! Plain-text rendering of check-in results for the terminal.

use std::fmt::Write;

use crate::analyzer::ScoringSource;
use crate::checkin::types::iso_timestamp;
use crate::checkin::{CheckinOutcome, CheckinRecord, Mood};
use crate::stage::StageTable;

const NO_HISTORY: &str = "No history yet — today is your first Lite check-in.";

/// Snapshot, breakdown and mood anchor for a fresh check-in.
pub fn render_outcome(outcome: &CheckinOutcome) -> String {
    let record = &outcome.record;
    let mut out = String::new();

    out.push_str("✅ Check-in saved and analyzed.\n\n");

    out.push_str("Your Lite Identity Snapshot\n");
    let _ = writeln!(out, "  Composite Trait Score:  {:.1}", record.trait_score());
    let _ = writeln!(out, "  Harmony Ratio:          {:.1}%", record.harmony_ratio());
    let _ = writeln!(out, "  Suggested Stage (Auto): {}", record.auto_stage());
    if let Some(stage) = record.perceived_stage() {
        let _ = writeln!(out, "  Your Chosen Stage:      {}", stage);
    }
    if outcome.source == ScoringSource::Fallback {
        out.push_str("  (scored with the built-in formulas)\n");
    }

    out.push_str("\nTrait Breakdown\n");
    out.push_str(&outcome.breakdown);
    out.push_str("\n\n");

    out.push_str("Today's Mood Anchor\n");
    let _ = writeln!(
        out,
        "Mood: {} (score {})",
        record.mood().label(),
        record.mood_score()
    );
    let note = record.notes().trim();
    if !note.is_empty() {
        let _ = writeln!(out, "Note: {}", note);
    }

    out
}

/// Recent-history preview. Records are expected most recent first.
pub fn render_history(recent: &[CheckinRecord]) -> String {
    let mut out = String::from("Recent Check-ins (Lite)\n");

    if recent.is_empty() {
        out.push_str(NO_HISTORY);
        return out;
    }

    for record in recent {
        let _ = writeln!(
            out,
            "- {} — Mood: {}, Stage: {}, Harmony: {:.1}%",
            iso_timestamp::format(&record.timestamp()),
            record.mood().label(),
            record.auto_stage(),
            record.harmony_ratio()
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// Selectable moods and stages, with the values the CLI accepts.
pub fn render_options(table: &StageTable) -> String {
    let mut out = String::from("Moods (--mood):\n");
    for mood in Mood::ALL {
        let _ = writeln!(out, "  {:<10} {} (score {})", mood.slug(), mood.label(), mood.score());
    }

    out.push_str("\nStages (--stage):\n");
    out.push_str("  skip       (skip)\n");
    for stage in &table.perceived {
        let _ = writeln!(out, "  {:<10} {}", stage.number, stage.label);
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::{trait_breakdown, CheckinForm, TraitSet};
    use crate::stage::default_stage_table;
    use chrono::{Duration, TimeZone, Utc};

    fn record(day: i64, harmony: f64) -> CheckinRecord {
        let form = CheckinForm {
            mood: Mood::Energized,
            notes: "  walked to work  ".to_string(),
            traits: TraitSet::default(),
            perceived_stage: Some("Stage 4 — Industry vs. Inferiority".to_string()),
        };
        let ts = Utc.with_ymd_and_hms(2025, 5, 1, 7, 30, 0).unwrap() + Duration::days(day);
        CheckinRecord::assemble(form, 40.0, harmony, "Stage 4 — Initiative vs. Guilt".to_string(), ts)
    }

    #[test]
    fn test_render_history_lines() {
        let text = render_history(&[record(1, 87.5), record(0, 100.0)]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "- 2025-05-02T07:30:00.000000 — Mood: 😄 Energized, Stage: Stage 4 — Initiative vs. Guilt, Harmony: 87.5%"
        );
        assert!(lines[2].starts_with("- 2025-05-01T07:30:00.000000"));
    }

    #[test]
    fn test_render_empty_history() {
        let text = render_history(&[]);
        assert!(text.ends_with(NO_HISTORY));
    }

    #[test]
    fn test_render_outcome_shows_choices_and_note() {
        let record = record(0, 100.0);
        let outcome = CheckinOutcome {
            breakdown: trait_breakdown(record.traits()),
            record,
            source: ScoringSource::Fallback,
        };
        let text = render_outcome(&outcome);

        assert!(text.contains("Composite Trait Score:  40.0"));
        assert!(text.contains("Harmony Ratio:          100.0%"));
        assert!(text.contains("Your Chosen Stage:      Stage 4 — Industry vs. Inferiority"));
        assert!(text.contains("built-in formulas"));
        assert!(text.contains("Mood: 😄 Energized (score 4)"));
        assert!(text.contains("Note: walked to work\n"));
    }

    #[test]
    fn test_render_options_lists_everything() {
        let text = render_options(&default_stage_table());
        for mood in Mood::ALL {
            assert!(text.contains(mood.label()));
        }
        assert!(text.contains("7          Stage 7 — Generativity vs. Stagnation"));
    }
}
