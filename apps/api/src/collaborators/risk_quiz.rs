use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vendors::risk::RiskTier;

/// Upper score bound (inclusive) for each tier; anything above the last is `MostAggressive`.
const SCORE_BANDS: &[(f64, RiskTier)] = &[
    (14.0, RiskTier::ShortTerm),
    (21.0, RiskTier::Conservative),
    (28.0, RiskTier::Balanced),
    (35.0, RiskTier::Growth),
    (42.0, RiskTier::AggressiveGrowth),
];

#[derive(Debug, Clone, Deserialize)]
pub struct RiskQuizRequest {
    pub answers: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskQuizResult {
    pub score: f64,
    pub risk_tier: RiskTier,
}

pub fn score_answers(answers: &BTreeMap<String, f64>) -> RiskQuizResult {
    let score: f64 = answers.values().sum();
    RiskQuizResult {
        score,
        risk_tier: tier_for_score(score),
    }
}

pub fn tier_for_score(score: f64) -> RiskTier {
    SCORE_BANDS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::MostAggressive)
}
