//! Interface boundaries for the external collaborators the engine consumes.
//!
//! The engine never calls these itself; callers use them to prepare inputs
//! (structured profiles, candidate sets, embedding vectors) before invoking
//! the ranking operation.

use super::domain::{PatientProfile, TrialCriteria};

/// Turns free-form intake text into a structured profile. Implementations
/// may leave any field unpopulated; the engine treats absence per each
/// component's absence policy, never as zero.
pub trait ProfileExtractor: Send + Sync {
    fn extract(&self, free_text: &str) -> Result<PatientProfile, ExtractionError>;
}

/// Produces a fixed-length embedding vector for a text. The engine only
/// consumes the vectors, never the text pipeline.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Keyword retrieval used to narrow a candidate set before ranking. The
/// engine accepts whatever candidate set it is given and does not require
/// this service.
pub trait TrialSearch: Send + Sync {
    fn search(&self, keywords: &str, limit: usize) -> Result<Vec<TrialCriteria>, SearchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("intake text is empty")]
    EmptyInput,
    #[error("extractor unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search index unavailable: {0}")]
    Unavailable(String),
}

/// Natural-language summary of a profile, used as the text handed to an
/// [`EmbeddingProvider`].
pub fn patient_summary(patient: &PatientProfile) -> String {
    let describe = |value: Option<f64>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    };

    let mut summary = format!(
        "Patient is {} years old with an HbA1c of {}% and a BMI of {}. ",
        describe(patient.age),
        describe(patient.hba1c),
        describe(patient.bmi),
    );

    let mut medications = Vec::new();
    if patient.on_metformin {
        medications.push("on metformin");
    }
    if patient.stable_metformin {
        medications.push("stable on metformin");
    }
    if patient.on_insulin {
        medications.push("using insulin");
    }
    if medications.is_empty() {
        summary.push_str("Currently not on diabetes medication. ");
    } else {
        summary.push_str("Current treatments include: ");
        summary.push_str(&medications.join(", "));
        summary.push_str(". ");
    }

    let mut conditions = Vec::new();
    if patient.ckd {
        conditions.push("chronic kidney disease");
    }
    if patient.pancreatitis {
        conditions.push("history of pancreatitis");
    }
    if patient.type1_diabetes {
        conditions.push("Type 1 Diabetes");
    }
    if conditions.is_empty() {
        summary.push_str("No history of CKD, pancreatitis, or Type 1 diabetes.");
    } else {
        summary.push_str("Medical history includes ");
        summary.push_str(&conditions.join(", "));
        summary.push('.');
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_vitals_and_treatments() {
        let patient = PatientProfile {
            age: Some(55.0),
            hba1c: Some(7.2),
            bmi: Some(30.0),
            on_metformin: true,
            ckd: true,
            ..PatientProfile::default()
        };

        let summary = patient_summary(&patient);
        assert!(summary.contains("55 years old"));
        assert!(summary.contains("HbA1c of 7.2%"));
        assert!(summary.contains("on metformin"));
        assert!(summary.contains("chronic kidney disease"));
    }

    #[test]
    fn summary_degrades_gracefully_when_fields_are_absent() {
        let summary = patient_summary(&PatientProfile::default());
        assert!(summary.contains("unknown years old"));
        assert!(summary.contains("Currently not on diabetes medication."));
        assert!(summary.contains("No history of CKD"));
    }

    #[test]
    fn trial_embedding_text_concatenates_descriptive_fields() {
        let trial = TrialCriteria {
            nct_id: "NCT001".to_string(),
            title: "Oral Agent Study".to_string(),
            brief_summary: Some("A study of oral agents.".to_string()),
            eligibility: Some("Adults with T2D.".to_string()),
            us_cities: Some("Portland".to_string()),
            ..TrialCriteria::default()
        };

        let text = trial.embedding_text();
        assert_eq!(
            text,
            "Oral Agent Study. A study of oral agents. Adults with T2D. Portland"
        );
    }
}
