//! Plain-text rendering of a comparison result.

use std::fmt::Write;

use serde::Serialize;

use ratrack_core::models::{ComparisonResult, RiskTrend};

/// How a figure should read to the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Favourable,
    Unfavourable,
    Neutral,
}

pub fn trend_tone(trend: &RiskTrend) -> Tone {
    match trend {
        RiskTrend::Improved => Tone::Favourable,
        RiskTrend::Worsened => Tone::Unfavourable,
        _ => Tone::Neutral,
    }
}

/// Any increase is unfavourable; no change counts as favourable.
pub fn change_tone(change: f64) -> Tone {
    if change > 0.0 {
        Tone::Unfavourable
    } else {
        Tone::Favourable
    }
}

fn arrow(change: f64) -> char {
    if change > 0.0 {
        '↑'
    } else {
        '↓'
    }
}

fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

pub fn render_report(result: &ComparisonResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "RA Risk Comparison: {}", result.risk_trend);
    let _ = writeln!(out);
    let _ = writeln!(out, "First Appointment:   {}%", result.previous_probability);
    let _ = writeln!(out, "Current Appointment: {}%", result.current_probability);
    let _ = writeln!(
        out,
        "{} {}% change over {} months",
        arrow(result.probability_change),
        result.probability_change.abs(),
        result.months_between_tests
    );

    if !result.biomarker_changes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Biomarker Changes:");
        for change in &result.biomarker_changes {
            let _ = writeln!(
                out,
                "  {}: {} ({})",
                change.name,
                change.change,
                signed_percent(change.percent_change)
            );
        }
    }

    if !result.interpretation.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Clinical Interpretation:");
        let _ = writeln!(out, "  {}", result.interpretation);
    }

    if !result.summary.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary:");
        for line in result.summary.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_signs() {
        assert_eq!(arrow(2.0), '↑');
        assert_eq!(arrow(0.0), '↓');
        assert_eq!(arrow(-3.5), '↓');
        assert_eq!(signed_percent(12.5), "+12.5%");
        assert_eq!(signed_percent(0.0), "0%");
        assert_eq!(signed_percent(-40.0), "-40%");
    }

    #[test]
    fn tones() {
        assert_eq!(trend_tone(&RiskTrend::Improved), Tone::Favourable);
        assert_eq!(trend_tone(&RiskTrend::Worsened), Tone::Unfavourable);
        assert_eq!(trend_tone(&RiskTrend::Stable), Tone::Neutral);
        assert_eq!(trend_tone(&RiskTrend::Other("Unclear".into())), Tone::Neutral);
        assert_eq!(change_tone(0.1), Tone::Unfavourable);
        assert_eq!(change_tone(-0.1), Tone::Favourable);
    }
}
