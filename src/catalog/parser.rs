use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::CatalogError;
use crate::matching::{ExtraExclusion, TrialCriteria};

/// Load and canonicalize a trial CSV export from disk.
///
/// The result is sorted by `Last_Updated` descending (freshest first) so
/// downstream sampling and display favor current registrations.
pub fn load_trials(path: &Path) -> Result<Vec<TrialCriteria>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    let mut trials = parse_trials(file)?;
    trials.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    Ok(trials)
}

/// Parse trial criteria rows from any CSV reader.
///
/// Rows without an `NCT_ID` cannot participate in ranking and are skipped
/// with a diagnostic; all other malformed cells degrade to absent values per
/// the engine's absence policies.
pub fn parse_trials<R: Read>(reader: R) -> Result<Vec<TrialCriteria>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trials = Vec::new();
    for record in csv_reader.deserialize::<TrialRow>() {
        let row = record?;
        let nct_id = row
            .nct_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let Some(nct_id) = nct_id else {
            warn!(
                title = row.title.as_deref().unwrap_or("<untitled>"),
                "skipping catalog row without an NCT_ID"
            );
            continue;
        };
        trials.push(row.canonicalize(nct_id));
    }
    Ok(trials)
}

#[derive(Debug, Deserialize)]
struct TrialRow {
    #[serde(rename = "NCT_ID", default, deserialize_with = "empty_string_as_none")]
    nct_id: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(rename = "Min_Age", default, deserialize_with = "empty_string_as_none")]
    min_age: Option<String>,
    #[serde(rename = "Max_Age", default, deserialize_with = "empty_string_as_none")]
    max_age: Option<String>,
    #[serde(rename = "Min_HbA1c", default, deserialize_with = "empty_string_as_none")]
    min_hba1c: Option<String>,
    #[serde(rename = "Max_HbA1c", default, deserialize_with = "empty_string_as_none")]
    max_hba1c: Option<String>,
    #[serde(rename = "Min_BMI", default, deserialize_with = "empty_string_as_none")]
    min_bmi: Option<String>,
    #[serde(rename = "Max_BMI", default, deserialize_with = "empty_string_as_none")]
    max_bmi: Option<String>,
    #[serde(rename = "Exclude_Insulin", default, deserialize_with = "empty_string_as_none")]
    exclude_insulin: Option<String>,
    #[serde(rename = "Exclude_GLP1", default, deserialize_with = "empty_string_as_none")]
    exclude_glp1: Option<String>,
    #[serde(rename = "Exclude_CKD", default, deserialize_with = "empty_string_as_none")]
    exclude_ckd: Option<String>,
    #[serde(
        rename = "Exclude_Pancreatitis",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    exclude_pancreatitis: Option<String>,
    #[serde(
        rename = "Exclude_Recent_CV_Event",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    exclude_recent_cv_event: Option<String>,
    #[serde(
        rename = "Exclude_Pregnancy",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    exclude_pregnancy: Option<String>,
    #[serde(rename = "Exclude_Type1", default, deserialize_with = "empty_string_as_none")]
    exclude_type1: Option<String>,
    #[serde(
        rename = "Exclusion_Flags",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    exclusion_flags: Option<String>,
    #[serde(
        rename = "Require_Metformin",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    require_metformin: Option<String>,
    #[serde(rename = "States", default, deserialize_with = "empty_string_as_none")]
    states: Option<String>,
    #[serde(rename = "Remote_Allowed", default, deserialize_with = "empty_string_as_none")]
    remote_allowed: Option<String>,
    #[serde(rename = "Sex", default, deserialize_with = "empty_string_as_none")]
    sex: Option<String>,
    #[serde(
        rename = "Healthy_Volunteers",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    healthy_volunteers: Option<String>,
    #[serde(rename = "Phase", default, deserialize_with = "empty_string_as_none")]
    phase: Option<String>,
    #[serde(rename = "Study_Type", default, deserialize_with = "empty_string_as_none")]
    study_type: Option<String>,
    #[serde(rename = "Eligibility", default, deserialize_with = "empty_string_as_none")]
    eligibility: Option<String>,
    #[serde(rename = "Brief_Summary", default, deserialize_with = "empty_string_as_none")]
    brief_summary: Option<String>,
    #[serde(rename = "US_Cities", default, deserialize_with = "empty_string_as_none")]
    us_cities: Option<String>,
    #[serde(rename = "Last_Updated", default, deserialize_with = "empty_string_as_none")]
    last_updated: Option<String>,
}

impl TrialRow {
    fn canonicalize(self, nct_id: String) -> TrialCriteria {
        let title = self.title.unwrap_or_else(|| nct_id.clone());
        TrialCriteria {
            title,
            min_age: self.min_age.as_deref().and_then(parse_numeric),
            max_age: self.max_age.as_deref().and_then(parse_numeric),
            min_hba1c: self.min_hba1c.as_deref().and_then(parse_numeric),
            max_hba1c: self.max_hba1c.as_deref().and_then(parse_numeric),
            min_bmi: self.min_bmi.as_deref().and_then(parse_numeric),
            max_bmi: self.max_bmi.as_deref().and_then(parse_numeric),
            exclude_insulin: parse_bool(self.exclude_insulin.as_deref()),
            exclude_glp1: parse_bool(self.exclude_glp1.as_deref()),
            exclude_ckd: parse_bool(self.exclude_ckd.as_deref()),
            exclude_pancreatitis: parse_bool(self.exclude_pancreatitis.as_deref()),
            exclude_recent_cv_event: parse_bool(self.exclude_recent_cv_event.as_deref()),
            exclude_pregnancy: parse_bool(self.exclude_pregnancy.as_deref()),
            exclude_type1: parse_bool(self.exclude_type1.as_deref()),
            extra_exclusions: parse_extra_exclusions(self.exclusion_flags.as_deref()),
            require_metformin: parse_bool(self.require_metformin.as_deref()),
            states: parse_states(self.states.as_deref()),
            remote_allowed: parse_bool(self.remote_allowed.as_deref()),
            embedding: None,
            sex: self.sex,
            healthy_volunteers: self.healthy_volunteers,
            phase: self.phase,
            study_type: self.study_type,
            eligibility: self.eligibility,
            brief_summary: self.brief_summary,
            us_cities: self.us_cities,
            last_updated: self.last_updated.as_deref().and_then(parse_date),
            nct_id,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Extract a numeric value from cells like `"18"`, `"6.5"`, or `"18 Years"`.
fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    trimmed
        .split(|c: char| !c.is_ascii_digit() && c != '.')
        .find(|token| token.chars().any(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse::<f64>().ok())
}

/// Boolean-ish cells: `true/t/yes/y/1` (any case) are true, everything else
/// including absence is false.
fn parse_bool(cell: Option<&str>) -> bool {
    match cell {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "t" | "yes" | "y" | "1"
        ),
        None => false,
    }
}

/// State lists arrive delimited by `|`, `;`, or `,`.
fn parse_states(cell: Option<&str>) -> Vec<String> {
    let Some(cell) = cell else {
        return Vec::new();
    };
    cell.split(['|', ';', ','])
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Clinician exclusion flags beyond the fixed columns, e.g.
/// `exclude_malignancy`. Unknown keys are dropped with a diagnostic rather
/// than carried through untyped.
fn parse_extra_exclusions(cell: Option<&str>) -> Vec<ExtraExclusion> {
    let Some(cell) = cell else {
        return Vec::new();
    };
    let mut extras = Vec::new();
    for key in cell.split(['|', ';', ',']) {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            continue;
        }
        match key.as_str() {
            "exclude_malignancy" | "malignancy" => extras.push(ExtraExclusion::Malignancy),
            other => warn!(flag = other, "ignoring unknown exclusion flag"),
        }
    }
    extras
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
