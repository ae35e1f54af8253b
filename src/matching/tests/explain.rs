use super::common::*;
use crate::matching::domain::{Confidence, Criterion, MatchStatus};
use crate::matching::explain::probability_from_raw;

#[test]
fn reference_scenario_scores_seventy_three() {
    // age 15 + hba1c 25 + bmi 10 + medication 15 + neighbor geography 8 = 73.
    let engine = engine();
    let breakdown = engine.score_trial(&reference_patient(), &oregon_trial());

    assert_eq!(breakdown.status, MatchStatus::Matched);
    assert_eq!(breakdown.raw_score, 73.0);
    assert_eq!(breakdown.score_10, 7.6);
    assert_eq!(breakdown.confidence, Confidence::Moderate);
    assert_eq!(
        breakdown.met,
        vec![
            Criterion::Age,
            Criterion::Hba1c,
            Criterion::Bmi,
            Criterion::Medication
        ]
    );
    assert_eq!(breakdown.partial, vec![Criterion::Geography]);
    assert!(breakdown.failed.is_empty());
    assert!(breakdown.reasons.is_empty());
}

#[test]
fn probability_uses_the_logistic_calibration() {
    // Raw 50 sits exactly at the center.
    assert_eq!(probability_from_raw(50.0), 0.5);
    // Raw 73 from the reference scenario.
    assert_eq!(probability_from_raw(73.0), 0.872);
}

#[test]
fn probability_is_monotone_in_raw_score() {
    let mut previous = probability_from_raw(0.0);
    for raw in 1..=100 {
        let current = probability_from_raw(f64::from(raw));
        assert!(
            current >= previous,
            "probability regressed at raw {raw}: {current} < {previous}"
        );
        previous = current;
    }
}

#[test]
fn perfect_structured_and_semantic_scores_cap_at_one_hundred() {
    let engine = engine();
    let mut patient = reference_patient();
    let mut trial = oregon_trial();
    trial.states = vec!["CA".to_string()];
    let vector = vec![0.5f32, -0.1, 0.8];
    patient.embedding = Some(vector.clone());
    trial.embedding = Some(vector);

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.raw_score, 100.0);
    assert_eq!(breakdown.score_10, 10.0);
    assert_eq!(breakdown.confidence, Confidence::High);
    assert_eq!(breakdown.probability, 0.985);
}

#[test]
fn missing_embeddings_leave_only_the_structured_score() {
    let engine = engine();
    let mut trial = oregon_trial();
    trial.states = vec!["CA".to_string()];

    let breakdown = engine.score_trial(&reference_patient(), &trial);
    assert_eq!(breakdown.raw_score, 75.0);
    assert_eq!(breakdown.confidence, Confidence::Moderate);
}

#[test]
fn low_scores_fall_into_the_low_tier() {
    let engine = engine();
    let patient = reference_patient();
    // Out-of-reach geography, failed medication requirement, missing-bound
    // BMI neutrality: 15 + 25 + 5 + 0 + 0 = 45.
    let trial = crate::matching::TrialCriteria {
        nct_id: "NCT200".to_string(),
        title: "Far Away Study".to_string(),
        min_age: Some(18.0),
        max_age: Some(75.0),
        min_hba1c: Some(6.5),
        max_hba1c: Some(9.0),
        require_metformin: true,
        states: vec!["NY".to_string()],
        ..Default::default()
    };

    let breakdown = engine.score_trial(&patient, &trial);
    assert_eq!(breakdown.raw_score, 45.0);
    assert_eq!(breakdown.confidence, Confidence::Low);
    assert_eq!(breakdown.partial, vec![Criterion::Bmi]);
    assert_eq!(
        breakdown.failed,
        vec![Criterion::Medication, Criterion::Geography]
    );
}
