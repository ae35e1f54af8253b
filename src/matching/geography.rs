use super::domain::CriterionStatus;
use serde::{Deserialize, Serialize};

/// Outcome label for geographic proximity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoStatus {
    Unknown,
    InvalidState,
    InState,
    Remote,
    Neighbor,
    Far,
}

impl GeoStatus {
    pub const fn label(self) -> &'static str {
        match self {
            GeoStatus::Unknown => "unknown",
            GeoStatus::InvalidState => "invalid_state",
            GeoStatus::InState => "in_state",
            GeoStatus::Remote => "remote",
            GeoStatus::Neighbor => "neighbor",
            GeoStatus::Far => "far",
        }
    }

    /// Collapse the proximity label onto the met/partial/failed axis used by
    /// the criteria breakdown.
    pub(crate) const fn as_criterion_status(self) -> CriterionStatus {
        match self {
            GeoStatus::InState | GeoStatus::Remote => CriterionStatus::Full,
            GeoStatus::Neighbor => CriterionStatus::Partial,
            GeoStatus::Unknown | GeoStatus::InvalidState | GeoStatus::Far => CriterionStatus::Fail,
        }
    }
}

/// Bordering states for each recognized two-letter code. One hop only; this
/// is a flat lookup, not a graph search. Non-contiguous states have no
/// neighbors.
pub(crate) fn neighbors(state: &str) -> Option<&'static [&'static str]> {
    let bordering: &'static [&'static str] = match state {
        "AL" => &["FL", "GA", "MS", "TN"],
        "AZ" => &["CA", "NV", "UT", "NM", "CO"],
        "AR" => &["MO", "TN", "MS", "LA", "TX", "OK"],
        "CA" => &["OR", "NV", "AZ"],
        "CO" => &["WY", "NE", "KS", "OK", "NM", "AZ", "UT"],
        "CT" => &["NY", "MA", "RI"],
        "DE" => &["MD", "NJ", "PA"],
        "FL" => &["GA", "AL"],
        "GA" => &["FL", "AL", "TN", "SC", "NC"],
        "ID" => &["WA", "OR", "NV", "UT", "WY", "MT"],
        "IL" => &["WI", "IA", "MO", "KY", "IN"],
        "IN" => &["MI", "OH", "KY", "IL"],
        "IA" => &["MN", "SD", "NE", "MO", "IL", "WI"],
        "KS" => &["NE", "MO", "OK", "CO"],
        "KY" => &["IL", "IN", "OH", "WV", "VA", "TN", "MO"],
        "LA" => &["TX", "AR", "MS"],
        "ME" => &["NH"],
        "MD" => &["VA", "WV", "PA", "DE"],
        "MA" => &["NY", "VT", "NH", "CT", "RI"],
        "MI" => &["OH", "IN", "WI"],
        "MN" => &["ND", "SD", "IA", "WI"],
        "MS" => &["LA", "AR", "TN", "AL"],
        "MO" => &["IA", "IL", "KY", "TN", "AR", "OK", "KS", "NE"],
        "MT" => &["ID", "WY", "SD", "ND"],
        "NE" => &["SD", "IA", "MO", "KS", "CO", "WY"],
        "NV" => &["OR", "ID", "UT", "AZ", "CA"],
        "NH" => &["ME", "MA", "VT"],
        "NJ" => &["NY", "PA", "DE"],
        "NM" => &["AZ", "UT", "CO", "OK", "TX"],
        "NY" => &["PA", "NJ", "CT", "MA", "VT"],
        "NC" => &["VA", "TN", "GA", "SC"],
        "ND" => &["MT", "SD", "MN"],
        "OH" => &["PA", "WV", "KY", "IN", "MI"],
        "OK" => &["CO", "KS", "MO", "AR", "TX", "NM"],
        "OR" => &["WA", "ID", "NV", "CA"],
        "PA" => &["NY", "NJ", "DE", "MD", "WV", "OH"],
        "RI" => &["CT", "MA"],
        "SC" => &["NC", "GA"],
        "SD" => &["ND", "MN", "IA", "NE", "WY", "MT"],
        "TN" => &["KY", "VA", "NC", "GA", "AL", "MS", "AR", "MO"],
        "TX" => &["NM", "OK", "AR", "LA"],
        "UT" => &["ID", "WY", "CO", "NM", "AZ", "NV"],
        "VT" => &["NY", "NH", "MA"],
        "VA" => &["NC", "TN", "KY", "WV", "MD"],
        "WA" => &["OR", "ID"],
        "WV" => &["OH", "PA", "MD", "VA", "KY"],
        "WI" => &["MN", "IA", "IL", "MI"],
        "WY" => &["MT", "SD", "NE", "CO", "UT", "ID"],
        "AK" | "HI" => &[],
        _ => return None,
    };
    Some(bordering)
}

/// Score patient residence against the trial's recruiting states.
///
/// In-state and remote trials earn the full 10; a state bordering any trial
/// state earns 8. A missing or unrecognized patient state scores 0, as does
/// "far" — the source engine deliberately conflates "not accessible" with
/// "no information", and that behavior is preserved.
pub(crate) fn score_geography(
    patient_state: Option<&str>,
    trial_states: &[String],
    remote_allowed: bool,
) -> (f64, GeoStatus) {
    let state = match patient_state {
        Some(raw) => raw.trim().to_ascii_uppercase(),
        None => return (0.0, GeoStatus::Unknown),
    };
    if state.is_empty() {
        return (0.0, GeoStatus::Unknown);
    }

    let Some(adjacent) = neighbors(&state) else {
        return (0.0, GeoStatus::InvalidState);
    };

    let normalized: Vec<String> = trial_states
        .iter()
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if normalized.iter().any(|s| *s == state) {
        return (10.0, GeoStatus::InState);
    }
    if remote_allowed {
        return (10.0, GeoStatus::Remote);
    }
    if normalized.iter().any(|s| adjacent.contains(&s.as_str())) {
        return (8.0, GeoStatus::Neighbor);
    }
    (0.0, GeoStatus::Far)
}
