use super::domain::CriterionStatus;

/// Score a bounded numeric criterion with partial credit near the bounds.
///
/// A missing patient value earns the full weight: the patient is never
/// penalized for data the intake could not extract. Missing bounds mean no
/// restriction on that side; when both are missing the criterion is awarded
/// half weight as a neutral, unverified match. A value outside a bound by
/// distance `d <= margin` earns `weight * (1 - d/margin)`.
pub(crate) fn score_range(
    value: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
    weight: f64,
    margin: f64,
) -> (f64, CriterionStatus) {
    let Some(value) = value else {
        return (weight, CriterionStatus::Full);
    };

    match (lower, upper) {
        (None, None) => (weight * 0.5, CriterionStatus::Partial),
        (Some(lower), None) => {
            if value >= lower {
                (weight, CriterionStatus::Full)
            } else {
                ramp(lower - value, weight, margin)
            }
        }
        (None, Some(upper)) => {
            if value <= upper {
                (weight, CriterionStatus::Full)
            } else {
                ramp(value - upper, weight, margin)
            }
        }
        (Some(lower), Some(upper)) => {
            if lower <= value && value <= upper {
                (weight, CriterionStatus::Full)
            } else {
                let distance = if value < lower {
                    lower - value
                } else {
                    value - upper
                };
                ramp(distance, weight, margin)
            }
        }
    }
}

fn ramp(distance: f64, weight: f64, margin: f64) -> (f64, CriterionStatus) {
    if distance <= margin {
        let ratio = (1.0 - distance / margin).max(0.0);
        (weight * ratio, CriterionStatus::Partial)
    } else {
        (0.0, CriterionStatus::Fail)
    }
}
