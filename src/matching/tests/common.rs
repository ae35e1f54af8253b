use crate::matching::domain::{PatientProfile, TrialCriteria};
use crate::matching::{MatchEngine, ScoringWeights};

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(ScoringWeights::default()).expect("default weights are valid")
}

/// The reference patient from the calibration scenario: 55yo Californian,
/// HbA1c 7.2, BMI 30, no conditions, no medications.
pub(super) fn reference_patient() -> PatientProfile {
    PatientProfile {
        age: Some(55.0),
        hba1c: Some(7.2),
        bmi: Some(30.0),
        state: Some("CA".to_string()),
        ..PatientProfile::default()
    }
}

/// Oregon-only trial with bounds the reference patient sits inside, no
/// medication requirement, no remote arm, no embeddings.
pub(super) fn oregon_trial() -> TrialCriteria {
    TrialCriteria {
        nct_id: "NCT100".to_string(),
        title: "Oregon Oral Agent Study".to_string(),
        min_age: Some(18.0),
        max_age: Some(75.0),
        min_hba1c: Some(6.5),
        max_hba1c: Some(9.0),
        min_bmi: Some(25.0),
        max_bmi: Some(40.0),
        states: vec!["OR".to_string()],
        ..TrialCriteria::default()
    }
}

pub(super) fn unrestricted_trial(nct_id: &str) -> TrialCriteria {
    TrialCriteria {
        nct_id: nct_id.to_string(),
        title: format!("Trial {nct_id}"),
        remote_allowed: true,
        ..TrialCriteria::default()
    }
}
