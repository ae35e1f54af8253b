/// Convert patient and trial embeddings into a bounded score contribution.
///
/// Cosine similarity in [-1, 1] is mapped linearly onto [0, max_weight].
/// A missing vector, a dimension mismatch, or a zero-magnitude vector is a
/// defined zero-contribution case, not an error.
pub(crate) fn score_semantic(
    patient: Option<&[f32]>,
    trial: Option<&[f32]>,
    max_weight: f64,
) -> f64 {
    let (Some(patient), Some(trial)) = (patient, trial) else {
        return 0.0;
    };
    if patient.len() != trial.len() || patient.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut patient_norm = 0.0f64;
    let mut trial_norm = 0.0f64;
    for (a, b) in patient.iter().zip(trial.iter()) {
        let (a, b) = (f64::from(*a), f64::from(*b));
        dot += a * b;
        patient_norm += a * a;
        trial_norm += b * b;
    }
    if patient_norm == 0.0 || trial_norm == 0.0 {
        return 0.0;
    }

    let cosine = dot / (patient_norm.sqrt() * trial_norm.sqrt());
    let normalized = (cosine + 1.0) / 2.0;
    normalized * max_weight
}
