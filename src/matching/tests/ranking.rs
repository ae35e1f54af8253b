use super::common::*;
use crate::matching::domain::{MatchStatus, TrialCriteria};
use crate::matching::MatchError;

#[test]
fn results_are_sorted_by_probability_descending() {
    let engine = engine();
    let patient = reference_patient();

    let mut far = oregon_trial();
    far.nct_id = "NCT-FAR".to_string();
    far.states = vec!["NY".to_string()];

    let mut home = oregon_trial();
    home.nct_id = "NCT-HOME".to_string();
    home.states = vec!["CA".to_string()];

    let neighbor = oregon_trial();

    let ranked = engine
        .rank(&patient, &[far, neighbor, home])
        .expect("ranking succeeds");

    assert_eq!(ranked[0].nct_id, "NCT-HOME");
    assert_eq!(ranked[1].nct_id, "NCT100");
    assert_eq!(ranked[2].nct_id, "NCT-FAR");
    assert!(ranked[0].probability >= ranked[1].probability);
    assert!(ranked[1].probability >= ranked[2].probability);
}

#[test]
fn excluded_trials_sink_below_every_match() {
    let engine = engine();
    let mut patient = reference_patient();
    patient.on_insulin = true;

    let mut excluding = oregon_trial();
    excluding.nct_id = "NCT-EXCL".to_string();
    excluding.exclude_insulin = true;

    let mut weak = oregon_trial();
    weak.nct_id = "NCT-WEAK".to_string();
    weak.states = vec!["NY".to_string()];

    let ranked = engine
        .rank(&patient, &[excluding, weak])
        .expect("ranking succeeds");

    assert_eq!(ranked[0].nct_id, "NCT-WEAK");
    assert_eq!(ranked[0].status, MatchStatus::Matched);
    assert_eq!(ranked[1].nct_id, "NCT-EXCL");
    assert_eq!(ranked[1].status, MatchStatus::Excluded);
    assert_eq!(ranked[1].probability, 0.0);
}

#[test]
fn ties_preserve_input_order() {
    let engine = engine();
    let patient = reference_patient();

    let mut first = oregon_trial();
    first.nct_id = "NCT-A".to_string();
    let mut second = oregon_trial();
    second.nct_id = "NCT-B".to_string();

    let ranked = engine
        .rank(&patient, &[first, second])
        .expect("ranking succeeds");

    assert_eq!(ranked[0].nct_id, "NCT-A");
    assert_eq!(ranked[1].nct_id, "NCT-B");
}

#[test]
fn trial_without_identifier_is_skipped_not_fatal() {
    let engine = engine();
    let patient = reference_patient();

    let orphan = TrialCriteria {
        title: "Orphan Trial".to_string(),
        ..TrialCriteria::default()
    };

    let ranked = engine
        .rank(&patient, &[orphan, oregon_trial()])
        .expect("valid trial still ranks");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].nct_id, "NCT100");
}

#[test]
fn an_entirely_invalid_set_is_a_single_descriptive_error() {
    let engine = engine();
    let patient = reference_patient();

    let orphan = TrialCriteria::default();
    assert_eq!(
        engine.rank(&patient, &[orphan]),
        Err(MatchError::NoValidTrials)
    );
    assert_eq!(engine.rank(&patient, &[]), Err(MatchError::NoValidTrials));
}

#[test]
fn breakdowns_carry_trial_metadata() {
    let engine = engine();
    let ranked = engine
        .rank(&reference_patient(), &[unrestricted_trial("NCT300")])
        .expect("ranking succeeds");

    assert_eq!(ranked[0].nct_id, "NCT300");
    assert_eq!(ranked[0].title, "Trial NCT300");
}
