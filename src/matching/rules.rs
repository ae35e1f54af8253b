use std::collections::BTreeMap;

use super::domain::{Criterion, CriterionStatus, PatientProfile, TrialCriteria};
use super::weights::{
    ScoringWeights, AGE_MARGIN_YEARS, BMI_MARGIN_UNITS, HBA1C_MARGIN_POINTS,
};
use super::{geography, medication, numeric};

/// Combine the five structured criteria into a weighted 0-75 sub-score plus
/// a per-criterion status map for the explanation.
///
/// The geography component is already on its 0-10 scale and is added
/// directly, not rescaled.
pub(crate) fn structured_score(
    patient: &PatientProfile,
    trial: &TrialCriteria,
    weights: &ScoringWeights,
) -> (f64, BTreeMap<Criterion, CriterionStatus>) {
    let mut score = 0.0;
    let mut details = BTreeMap::new();

    let (age_score, age_status) = numeric::score_range(
        patient.age,
        trial.min_age,
        trial.max_age,
        weights.age,
        AGE_MARGIN_YEARS,
    );
    score += age_score;
    details.insert(Criterion::Age, age_status);

    let (hba1c_score, hba1c_status) = numeric::score_range(
        patient.hba1c,
        trial.min_hba1c,
        trial.max_hba1c,
        weights.hba1c,
        HBA1C_MARGIN_POINTS,
    );
    score += hba1c_score;
    details.insert(Criterion::Hba1c, hba1c_status);

    let (bmi_score, bmi_status) = numeric::score_range(
        patient.bmi,
        trial.min_bmi,
        trial.max_bmi,
        weights.bmi,
        BMI_MARGIN_UNITS,
    );
    score += bmi_score;
    details.insert(Criterion::Bmi, bmi_status);

    let (medication_score, medication_status) =
        medication::score_medication(patient, trial, weights.medication);
    score += medication_score;
    details.insert(Criterion::Medication, medication_status);

    let (geo_score, geo_status) = geography::score_geography(
        patient.state.as_deref(),
        &trial.states,
        trial.remote_allowed,
    );
    score += geo_score;
    details.insert(Criterion::Geography, geo_status.as_criterion_status());

    (score, details)
}
