//! Pension estimate from a per-state benefit multiplier.
//!
//! Most states are a flat `years × multiplier × salary`; AK, AZ, KY and NY
//! use graded schedules.

use serde::{Deserialize, Serialize};

const FLAT_MULTIPLIERS: &[(&str, f64)] = &[
    ("AL", 0.0165),
    ("AR", 0.0215),
    ("CA", 0.02),
    ("CO", 0.025),
    ("CT", 0.02),
    ("DE", 0.0185),
    ("FL", 0.016),
    ("GA", 0.02),
    ("HI", 0.0175),
    ("ID", 0.02),
    ("IL", 0.022),
    ("IN", 0.011),
    ("IA", 0.02),
    ("KS", 0.0185),
    ("LA", 0.025),
    ("ME", 0.02),
    ("MD", 0.015),
    ("MA", 0.025),
    ("MI", 0.015),
    ("MN", 0.019),
    ("MS", 0.02),
    ("MO", 0.025),
    ("MT", 0.0167),
    ("NE", 0.02),
    ("NV", 0.0225),
    ("NH", 0.0152),
    ("NJ", 0.0167),
    ("NM", 0.0235),
    ("NC", 0.0182),
    ("ND", 0.02),
    ("OH", 0.022),
    ("OK", 0.02),
    ("OR", 0.015),
    ("PA", 0.02),
    ("RI", 0.01),
    ("SC", 0.0182),
    ("SD", 0.0155),
    ("TN", 0.01),
    ("TX", 0.023),
    ("UT", 0.015),
    ("VT", 0.0167),
    ("VA", 0.01),
    ("WA", 0.02),
    ("WV", 0.02),
    ("WI", 0.016),
    ("WY", 0.02),
];

/// Kentucky marginal brackets: (years in bracket, multiplier). The last bracket is open-ended.
const KENTUCKY_BRACKETS: &[(f64, f64)] = &[
    (10.0, 0.017),
    (10.0, 0.02),
    (6.0, 0.023),
    (4.0, 0.025),
    (f64::INFINITY, 0.03),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionRequest {
    pub state: String,
    pub years_of_service: f64,
    pub average_salary: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionResponse {
    pub success: bool,
    pub state: String,
    pub years_of_service: f64,
    pub average_salary: f64,
    pub estimated_pension: f64,
    pub income_gap: f64,
}

/// Annual pension for a two-letter state code, or `None` for an unsupported state.
pub fn estimate_pension(state: &str, years: f64, salary: f64) -> Option<f64> {
    let code = state.trim().to_ascii_uppercase();
    let rate_years = match code.as_str() {
        "AK" => {
            if years <= 20.0 {
                years * 0.02
            } else {
                20.0 * 0.02 + (years - 20.0) * 0.025
            }
        }
        "AZ" => {
            let multiplier = if years < 20.0 {
                0.021
            } else if years < 25.0 {
                0.0215
            } else if years < 30.0 {
                0.022
            } else {
                0.023
            };
            years * multiplier
        }
        "KY" => graded(years, KENTUCKY_BRACKETS),
        "NY" => {
            if years < 20.0 {
                years * 0.0167
            } else if years == 20.0 {
                years * 0.0175
            } else {
                20.0 * 0.0175 + (years - 20.0) * 0.02
            }
        }
        other => {
            let (_, multiplier) = FLAT_MULTIPLIERS.iter().find(|(s, _)| *s == other)?;
            years * multiplier
        }
    };
    Some(rate_years * salary)
}

/// Sum of `years × multiplier` across consecutive marginal brackets.
fn graded(years: f64, brackets: &[(f64, f64)]) -> f64 {
    let mut remaining = years.max(0.0);
    let mut total = 0.0;
    for (span, multiplier) in brackets {
        if remaining <= 0.0 {
            break;
        }
        let in_bracket = remaining.min(*span);
        total += in_bracket * multiplier;
        remaining -= in_bracket;
    }
    total
}

pub fn income_gap(salary: f64, pension: f64) -> f64 {
    salary - pension
}
