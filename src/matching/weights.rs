use serde::{Deserialize, Serialize};

/// Tolerance outside an age bound that still earns partial credit, in years.
pub const AGE_MARGIN_YEARS: f64 = 3.0;
/// Tolerance outside an HbA1c bound, in percentage points.
pub const HBA1C_MARGIN_POINTS: f64 = 0.5;
/// Tolerance outside a BMI bound, in BMI units.
pub const BMI_MARGIN_UNITS: f64 = 2.0;

/// Expected sum of the structured (non-semantic) weights.
pub const STRUCTURED_BUDGET: f64 = 75.0;
/// Expected sum of structured plus semantic weights.
pub const TOTAL_BUDGET: f64 = 100.0;

/// Scoring weights for the five structured criteria plus the semantic signal.
///
/// The structured weights must sum to [`STRUCTURED_BUDGET`] and the grand
/// total to [`TOTAL_BUDGET`]; [`ScoringWeights::validate`] enforces this at
/// engine construction so a miscalibrated configuration refuses to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub age: f64,
    pub hba1c: f64,
    pub bmi: f64,
    pub medication: f64,
    pub geography: f64,
    pub semantic: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age: 15.0,
            hba1c: 25.0,
            bmi: 10.0,
            medication: 15.0,
            geography: 10.0,
            semantic: 25.0,
        }
    }
}

impl ScoringWeights {
    pub fn structured_total(&self) -> f64 {
        self.age + self.hba1c + self.bmi + self.medication + self.geography
    }

    pub fn total(&self) -> f64 {
        self.structured_total() + self.semantic
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        let structured = self.structured_total();
        if (structured - STRUCTURED_BUDGET).abs() > f64::EPSILON {
            return Err(WeightsError::StructuredBudget { actual: structured });
        }
        let total = self.total();
        if (total - TOTAL_BUDGET).abs() > f64::EPSILON {
            return Err(WeightsError::TotalBudget { actual: total });
        }
        Ok(())
    }
}

/// Configuration invariant violations; fatal at initialization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("structured weights sum to {actual}, expected 75")]
    StructuredBudget { actual: f64 },
    #[error("structured plus semantic weights sum to {actual}, expected 100")]
    TotalBudget { actual: f64 },
}
