use std::collections::BTreeMap;

use super::domain::{
    Confidence, Criterion, CriterionStatus, MatchStatus, ScoreBreakdown, TrialCriteria,
};

/// Raw score that maps to a 50% match probability.
const PROBABILITY_CENTER: f64 = 50.0;
/// Steepness of the logistic calibration.
const PROBABILITY_SCALE: f64 = 12.0;

/// Logistic calibration of a 0-100 raw score onto a probability, rounded to
/// three decimals. Monotonically non-decreasing in the raw score.
pub(crate) fn probability_from_raw(raw: f64) -> f64 {
    let z = (raw - PROBABILITY_CENTER) / PROBABILITY_SCALE;
    round_to(1.0 / (1.0 + (-z).exp()), 3)
}

/// Build the matched-side breakdown from the structured and semantic
/// sub-scores. The hard-exclusion gate constructs excluded results
/// separately; this path always reports `Matched`.
pub(crate) fn explain(
    trial: &TrialCriteria,
    structured_score: f64,
    details: BTreeMap<Criterion, CriterionStatus>,
    semantic_score: f64,
) -> ScoreBreakdown {
    let raw = (structured_score + semantic_score).clamp(0.0, 100.0);
    let probability = probability_from_raw(raw);
    let score_10 = round_to(1.0 + (raw / 100.0) * 9.0, 1);

    let mut met = Vec::new();
    let mut partial = Vec::new();
    let mut failed = Vec::new();
    for (criterion, status) in details {
        match status {
            CriterionStatus::Full => met.push(criterion),
            CriterionStatus::Partial => partial.push(criterion),
            CriterionStatus::Fail => failed.push(criterion),
        }
    }

    let confidence = if raw >= 80.0 {
        Confidence::High
    } else if raw >= 50.0 {
        Confidence::Moderate
    } else {
        Confidence::Low
    };

    ScoreBreakdown {
        nct_id: trial.nct_id.clone(),
        title: trial.title.clone(),
        raw_score: round_to(raw, 2),
        score_10,
        probability,
        status: MatchStatus::Matched,
        confidence,
        reasons: Vec::new(),
        met,
        partial,
        failed,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
