use std::sync::Arc;

use tracing::debug;

use super::domain::{PatientProfile, ScoreBreakdown, TrialCriteria};
use super::{MatchEngine, MatchError};
use crate::catalog::TrialCatalog;

/// Service composing the scoring engine with the shared trial catalog.
///
/// Each ranking call operates on a catalog snapshot taken at entry, so a
/// concurrent reload never changes the trial set mid-ranking.
pub struct MatchService {
    engine: MatchEngine,
    catalog: Arc<TrialCatalog>,
}

impl MatchService {
    pub fn new(engine: MatchEngine, catalog: Arc<TrialCatalog>) -> Self {
        Self { engine, catalog }
    }

    /// Rank the full catalog for a patient, best match first.
    pub fn rank_patient(
        &self,
        patient: &PatientProfile,
    ) -> Result<Vec<ScoreBreakdown>, MatchServiceError> {
        let snapshot = self.catalog.snapshot();
        if snapshot.is_empty() {
            return Err(MatchServiceError::EmptyCatalog);
        }

        let ranked = self.engine.rank(patient, &snapshot)?;
        debug!(
            trials = snapshot.len(),
            ranked = ranked.len(),
            "ranked catalog for patient"
        );
        Ok(ranked)
    }

    pub fn find_trial(&self, nct_id: &str) -> Option<TrialCriteria> {
        self.catalog.find(nct_id)
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &TrialCatalog {
        &self.catalog
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("trial catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Match(#[from] MatchError),
}
