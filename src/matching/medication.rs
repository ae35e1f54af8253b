use super::domain::{CriterionStatus, PatientProfile, TrialCriteria};

/// Score the trial's medication prerequisite against patient status.
///
/// Absence of a requirement is never a barrier. Under a metformin
/// requirement, a patient stable on metformin earns full weight, one still
/// titrating earns half, and one not on it at all earns nothing.
pub(crate) fn score_medication(
    patient: &PatientProfile,
    trial: &TrialCriteria,
    weight: f64,
) -> (f64, CriterionStatus) {
    if !trial.require_metformin {
        return (weight, CriterionStatus::Full);
    }
    if patient.stable_metformin {
        (weight, CriterionStatus::Full)
    } else if patient.on_metformin {
        (weight / 2.0, CriterionStatus::Partial)
    } else {
        (0.0, CriterionStatus::Fail)
    }
}
