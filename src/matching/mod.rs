//! Eligibility scoring and ranking engine.
//!
//! The engine is a pure function from (patient, trial set) to ranked
//! explanations: no I/O, no shared mutable state, re-evaluated per request.
//! Hard exclusions short-circuit the per-trial pipeline; everything else
//! flows through structured aggregation, the semantic signal, and the
//! logistic calibration.

pub mod domain;
pub mod providers;
pub mod router;
pub mod service;
pub mod weights;

mod exclusion;
mod explain;
mod geography;
mod medication;
mod numeric;
mod rules;
mod semantic;

#[cfg(test)]
mod tests;

pub use domain::{
    Confidence, Criterion, CriterionStatus, ExtraExclusion, MatchStatus, PatientProfile,
    ScoreBreakdown, TrialCriteria,
};
pub use geography::GeoStatus;
pub use providers::{patient_summary, EmbeddingProvider, ProfileExtractor, TrialSearch};
pub use router::match_router;
pub use service::{MatchService, MatchServiceError};
pub use weights::{ScoringWeights, WeightsError};

use std::cmp::Ordering;
use tracing::warn;

/// Stateless evaluator applying the scoring configuration to patient/trial
/// pairs.
pub struct MatchEngine {
    weights: ScoringWeights,
}

impl MatchEngine {
    /// Build an engine, refusing a weight configuration whose budgets do not
    /// sum exactly; a miscalibrated engine must not start.
    pub fn new(weights: ScoringWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single trial for a patient.
    ///
    /// The hard-exclusion gate (boolean table, then absolute age/HbA1c
    /// bounds) runs first and short-circuits the whole pipeline; structured
    /// and semantic scoring are skipped for excluded trials.
    pub fn score_trial(&self, patient: &PatientProfile, trial: &TrialCriteria) -> ScoreBreakdown {
        let reasons = exclusion::boolean_exclusions(patient, trial);
        if !reasons.is_empty() {
            return ScoreBreakdown::excluded(trial, reasons, Vec::new());
        }

        if let Some((reason, criterion)) = exclusion::absolute_bound_violation(patient, trial) {
            return ScoreBreakdown::excluded(trial, vec![reason], vec![criterion]);
        }

        let (structured, details) = rules::structured_score(patient, trial, &self.weights);
        let semantic = semantic::score_semantic(
            patient.embedding.as_deref(),
            trial.embedding.as_deref(),
            self.weights.semantic,
        );

        explain::explain(trial, structured, details, semantic)
    }

    /// Rank a candidate trial set for a patient, best first.
    ///
    /// Trials without an identifier are dropped with a diagnostic rather
    /// than aborting the whole ranking. The sort is stable and orders by
    /// probability descending, so excluded trials (probability 0.0) sink to
    /// the bottom and ties preserve input order.
    pub fn rank(
        &self,
        patient: &PatientProfile,
        trials: &[TrialCriteria],
    ) -> Result<Vec<ScoreBreakdown>, MatchError> {
        let mut results: Vec<ScoreBreakdown> = Vec::with_capacity(trials.len());
        for trial in trials {
            if trial.nct_id.trim().is_empty() {
                warn!(title = %trial.title, "skipping trial without an NCT identifier");
                continue;
            }
            results.push(self.score_trial(patient, trial));
        }

        if results.is_empty() {
            return Err(MatchError::NoValidTrials);
        }

        results.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        Ok(results)
    }
}

/// Failure of a ranking invocation as a whole; per-trial data issues never
/// surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("no valid trials in the candidate set")]
    NoValidTrials,
}
