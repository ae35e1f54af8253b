use super::common::*;
use crate::matching::domain::{Confidence, Criterion, ExtraExclusion, MatchStatus};

#[test]
fn insulin_exclusion_short_circuits_favorable_bounds() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.on_insulin = true;
    let mut trial = oregon_trial();
    trial.exclude_insulin = true;

    let breakdown = engine.score_trial(&patient, &trial);

    assert_eq!(breakdown.status, MatchStatus::Excluded);
    assert_eq!(breakdown.score_10, 0.0);
    assert_eq!(breakdown.probability, 0.0);
    assert_eq!(breakdown.raw_score, 0.0);
    assert_eq!(breakdown.confidence, Confidence::NotEligible);
    assert_eq!(breakdown.reasons, vec!["Trial excludes insulin users.".to_string()]);
    assert!(breakdown.met.is_empty());
    assert!(breakdown.partial.is_empty());
    assert!(breakdown.failed.is_empty());
}

#[test]
fn trial_flag_without_patient_condition_does_not_exclude() {
    let engine = engine();
    let patient = reference_patient();
    let mut trial = oregon_trial();
    trial.exclude_insulin = true;
    trial.exclude_ckd = true;

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Matched);
    assert!(breakdown.reasons.is_empty());
}

#[test]
fn multiple_reasons_accumulate_in_table_order() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.on_insulin = true;
    patient.pregnant = true;
    let mut trial = oregon_trial();
    trial.exclude_pregnancy = true;
    trial.exclude_insulin = true;

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(
        breakdown.reasons,
        vec![
            "Trial excludes insulin users.".to_string(),
            "Trial excludes pregnancy.".to_string(),
        ]
    );
}

#[test]
fn clinician_malignancy_flag_excludes() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.recent_malignancy = true;
    let mut trial = oregon_trial();
    trial.extra_exclusions.push(ExtraExclusion::Malignancy);

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Excluded);
    assert_eq!(breakdown.reasons, vec!["Trial excludes malignancy.".to_string()]);
}

#[test]
fn age_below_minimum_is_an_absolute_gate() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.age = Some(10.0);
    let trial = oregon_trial();

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Excluded);
    assert_eq!(breakdown.score_10, 0.0);
    assert_eq!(breakdown.failed, vec![Criterion::Age]);
    assert!(breakdown.reasons[0].contains("below minimum (18)"));
}

#[test]
fn age_gate_wins_even_inside_the_partial_margin() {
    // 17 is within the 3-year soft margin, but the absolute bound fires
    // before structured scoring is ever consulted.
    let engine = engine();
    let mut patient = reference_patient();
    patient.age = Some(17.0);
    let trial = oregon_trial();

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Excluded);
    assert_eq!(breakdown.failed, vec![Criterion::Age]);
}

#[test]
fn hba1c_above_maximum_is_an_absolute_gate() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.hba1c = Some(11.0);
    let trial = oregon_trial();

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Excluded);
    assert_eq!(breakdown.failed, vec![Criterion::Hba1c]);
    assert!(breakdown.reasons[0].contains("above maximum (9)"));
}

#[test]
fn boolean_table_takes_precedence_over_bound_gates() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.age = Some(10.0);
    patient.on_insulin = true;
    let mut trial = oregon_trial();
    trial.exclude_insulin = true;

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.reasons, vec!["Trial excludes insulin users.".to_string()]);
    assert!(breakdown.failed.is_empty());
}

#[test]
fn missing_patient_values_never_trigger_the_gate() {
    let engine = engine();
    let patient = crate::matching::PatientProfile::default();
    let trial = oregon_trial();

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.status, MatchStatus::Matched);
}
