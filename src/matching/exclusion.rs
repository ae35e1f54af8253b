use super::domain::{Criterion, ExtraExclusion, PatientProfile, TrialCriteria};

struct ExclusionRule {
    applies: fn(&TrialCriteria) -> bool,
    disqualifies: fn(&PatientProfile) -> bool,
    message: &'static str,
}

/// Fixed-order pairing of trial exclusion flags with patient condition
/// flags. Order determines the order of reasons in the output.
const EXCLUSION_RULES: &[ExclusionRule] = &[
    ExclusionRule {
        applies: |t| t.exclude_insulin,
        disqualifies: |p| p.on_insulin,
        message: "Trial excludes insulin users.",
    },
    ExclusionRule {
        applies: |t| t.exclude_glp1,
        disqualifies: |p| p.recent_glp1,
        message: "Trial excludes recent GLP-1 users.",
    },
    ExclusionRule {
        applies: |t| t.exclude_ckd,
        disqualifies: |p| p.ckd,
        message: "Trial excludes CKD patients.",
    },
    ExclusionRule {
        applies: |t| t.exclude_pancreatitis,
        disqualifies: |p| p.pancreatitis,
        message: "Trial excludes pancreatitis history.",
    },
    ExclusionRule {
        applies: |t| t.exclude_recent_cv_event,
        disqualifies: |p| p.recent_cv_event,
        message: "Trial excludes recent CV events.",
    },
    ExclusionRule {
        applies: |t| t.exclude_pregnancy,
        disqualifies: |p| p.pregnant,
        message: "Trial excludes pregnancy.",
    },
    ExclusionRule {
        applies: |t| t.exclude_type1,
        disqualifies: |p| p.type1_diabetes,
        message: "Trial excludes patients with Type 1 diabetes.",
    },
];

/// Evaluate the boolean exclusion table plus clinician-added exclusions.
/// Returns every reason that fires; the patient is excluded iff the list is
/// non-empty.
pub(crate) fn boolean_exclusions(patient: &PatientProfile, trial: &TrialCriteria) -> Vec<String> {
    let mut reasons = Vec::new();
    for rule in EXCLUSION_RULES {
        if (rule.applies)(trial) && (rule.disqualifies)(patient) {
            reasons.push(rule.message.to_string());
        }
    }
    for extra in &trial.extra_exclusions {
        match extra {
            ExtraExclusion::Malignancy => {
                if patient.recent_malignancy {
                    reasons.push("Trial excludes malignancy.".to_string());
                }
            }
        }
    }
    reasons
}

/// Absolute age/HbA1c bound gate, checked before any structured scoring.
///
/// Unlike the soft margins of the numeric scorer, a value strictly outside
/// these bounds disqualifies unconditionally; this precedence mirrors the
/// source engine and wins over partial credit. Returns the reason and the
/// failed criterion for the single-reason exclusion result.
pub(crate) fn absolute_bound_violation(
    patient: &PatientProfile,
    trial: &TrialCriteria,
) -> Option<(String, Criterion)> {
    if let Some(age) = patient.age {
        if let Some(min_age) = trial.min_age {
            if age < min_age {
                return Some((
                    format!("Patient age below minimum ({}).", fmt_bound(min_age)),
                    Criterion::Age,
                ));
            }
        }
        if let Some(max_age) = trial.max_age {
            if age > max_age {
                return Some((
                    format!("Patient age above maximum ({}).", fmt_bound(max_age)),
                    Criterion::Age,
                ));
            }
        }
    }

    if let Some(hba1c) = patient.hba1c {
        if let Some(min_hba1c) = trial.min_hba1c {
            if hba1c < min_hba1c {
                return Some((
                    format!("HbA1c below minimum ({}).", fmt_bound(min_hba1c)),
                    Criterion::Hba1c,
                ));
            }
        }
        if let Some(max_hba1c) = trial.max_hba1c {
            if hba1c > max_hba1c {
                return Some((
                    format!("HbA1c above maximum ({}).", fmt_bound(max_hba1c)),
                    Criterion::Hba1c,
                ));
            }
        }
    }

    None
}

/// Render a bound without a trailing `.0` so messages read "minimum (18)"
/// rather than "minimum (18.0)".
fn fmt_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
