use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Structured patient profile handed to the engine by the intake boundary.
///
/// Every field is optional or defaulted: the upstream extractor may only be
/// able to populate a subset, and absence is handled by each scorer's
/// absence policy rather than treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub sex: Option<String>,
    /// Two-letter US state code.
    #[serde(default)]
    pub state: Option<String>,
    /// HbA1c percentage.
    #[serde(default)]
    pub hba1c: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub on_insulin: bool,
    #[serde(default)]
    pub recent_glp1: bool,
    #[serde(default)]
    pub ckd: bool,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub type1_diabetes: bool,
    #[serde(default)]
    pub recent_cv_event: bool,
    #[serde(default)]
    pub on_metformin: bool,
    #[serde(default)]
    pub stable_metformin: bool,
    #[serde(default)]
    pub pancreatitis: bool,
    #[serde(default)]
    pub recent_malignancy: bool,
    /// Fixed-length embedding of the natural-language profile summary,
    /// computed by an external provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Eligibility criteria for a single registered trial.
///
/// Snapshots are immutable per scoring run; the catalog loader performs all
/// coercion so the engine only ever sees typed optionals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialCriteria {
    pub nct_id: String,
    pub title: String,
    #[serde(default)]
    pub min_age: Option<f64>,
    #[serde(default)]
    pub max_age: Option<f64>,
    #[serde(default)]
    pub min_hba1c: Option<f64>,
    #[serde(default)]
    pub max_hba1c: Option<f64>,
    #[serde(default)]
    pub min_bmi: Option<f64>,
    #[serde(default)]
    pub max_bmi: Option<f64>,
    #[serde(default)]
    pub exclude_insulin: bool,
    #[serde(default)]
    pub exclude_glp1: bool,
    #[serde(default)]
    pub exclude_ckd: bool,
    #[serde(default)]
    pub exclude_pancreatitis: bool,
    #[serde(default)]
    pub exclude_recent_cv_event: bool,
    #[serde(default)]
    pub exclude_pregnancy: bool,
    #[serde(default)]
    pub exclude_type1: bool,
    /// Clinician-added exclusions beyond the fixed flag columns.
    #[serde(default)]
    pub extra_exclusions: Vec<ExtraExclusion>,
    #[serde(default)]
    pub require_metformin: bool,
    /// Two-letter state codes where the trial recruits.
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub remote_allowed: bool,
    /// Embedding of the trial's descriptive text, computed externally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub healthy_volunteers: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub study_type: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub brief_summary: Option<String>,
    #[serde(default)]
    pub us_cities: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl TrialCriteria {
    /// Text handed to the embedding provider when the catalog carries no
    /// precomputed vector for this trial.
    pub fn embedding_text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(summary) = self.brief_summary.as_deref() {
            text.push_str(". ");
            text.push_str(summary);
        }
        if let Some(eligibility) = self.eligibility.as_deref() {
            text.push(' ');
            text.push_str(eligibility);
        }
        if let Some(cities) = self.us_cities.as_deref() {
            text.push(' ');
            text.push_str(cities);
        }
        text
    }
}

/// Closed enumeration of clinician-supplied exclusion keys.
///
/// The source catalog models these as a free-form flag map; unknown keys are
/// dropped at ingestion rather than carried through untyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraExclusion {
    Malignancy,
}

/// Criteria that participate in structured scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Age,
    Hba1c,
    Bmi,
    Medication,
    Geography,
}

impl Criterion {
    pub const fn label(self) -> &'static str {
        match self {
            Criterion::Age => "age",
            Criterion::Hba1c => "hba1c",
            Criterion::Bmi => "bmi",
            Criterion::Medication => "medication",
            Criterion::Geography => "geography",
        }
    }
}

/// How well a single criterion was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Full,
    Partial,
    Fail,
}

/// Terminal state of a (patient, trial) evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Matched,
    Excluded,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Matched => "Matched",
            MatchStatus::Excluded => "Excluded",
        }
    }
}

/// Coarse display bucket summarizing raw score magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Moderate,
    Low,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Moderate => "Moderate",
            Confidence::Low => "Low",
            Confidence::NotEligible => "Not Eligible",
        }
    }
}

/// Per-trial engine output: calibrated score, eligibility status, and the
/// criteria breakdown backing the explanation UI.
///
/// Exactly one of `Matched`/`Excluded` holds. Excluded implies
/// `score_10 == 0.0`, `probability == 0.0`, empty category lists, and
/// `Not Eligible` confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub nct_id: String,
    pub title: String,
    pub raw_score: f64,
    pub score_10: f64,
    pub probability: f64,
    pub status: MatchStatus,
    pub confidence: Confidence,
    pub reasons: Vec<String>,
    pub met: Vec<Criterion>,
    pub partial: Vec<Criterion>,
    pub failed: Vec<Criterion>,
}

impl ScoreBreakdown {
    /// Short-circuited result for a hard-excluded trial.
    pub(crate) fn excluded(
        trial: &TrialCriteria,
        reasons: Vec<String>,
        failed: Vec<Criterion>,
    ) -> Self {
        Self {
            nct_id: trial.nct_id.clone(),
            title: trial.title.clone(),
            raw_score: 0.0,
            score_10: 0.0,
            probability: 0.0,
            status: MatchStatus::Excluded,
            confidence: Confidence::NotEligible,
            reasons,
            met: Vec::new(),
            partial: Vec::new(),
            failed,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.status == MatchStatus::Excluded
    }
}
