use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::resolver::{DistrictResolver, ResolveError};
use crate::models::district::District;
use crate::recommend::selector::RiskTierSelector;
use crate::recommend::RecommendationResult;
use crate::store::DistrictStore;
use crate::vendors::risk::RiskTier;

/// Reported as the district name when nothing was resolved.
pub const NO_DISTRICT: &str = "None";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Absent → no lookup requested. Present but blank → rejected.
    #[serde(default, alias = "district")]
    pub district_query: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "risk")]
    pub risk_tier: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub district: String,
    pub user_risk: Option<String>,
    pub recommendations: RecommendationResult,
}

/// Composes district resolution and vendor selection into one response.
#[derive(Debug, Clone)]
pub struct RecommendationAggregator {
    resolver: DistrictResolver,
    selector: RiskTierSelector,
    advisory_tiers: Vec<RiskTier>,
}

impl RecommendationAggregator {
    pub fn new(
        resolver: DistrictResolver,
        selector: RiskTierSelector,
        advisory_tiers: Vec<RiskTier>,
    ) -> Self {
        Self {
            resolver,
            selector,
            advisory_tiers,
        }
    }

    /// Resolves the district (one store read) and runs the selector against its carriers.
    pub async fn recommend(
        &self,
        store: &dyn DistrictStore,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ResolveError> {
        let district = match request.district_query.as_deref() {
            Some(query) => {
                self.resolver
                    .resolve(store, query, request.state.as_deref())
                    .await?
            }
            None => None,
        };

        let response = self.compose(district, request.risk_tier.as_deref());
        info!(
            district = %response.district,
            top = response.recommendations.top_403b.len(),
            fallback = response.recommendations.fallback_ira.len(),
            self_enroll = response.recommendations.self_enroll,
            "Recommendation served"
        );
        Ok(response)
    }

    /// Pure composition step: selector output plus district carriers and the enrollment flag.
    pub fn compose(&self, district: Option<District>, user_risk: Option<&str>) -> RecommendationResponse {
        let user_risk = user_risk
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        let (name, carriers, selection) = match district {
            Some(d) => {
                let selection = self.selector.select(&d.carriers, user_risk.as_deref());
                (d.name, d.carriers, selection)
            }
            None => (
                NO_DISTRICT.to_string(),
                Vec::new(),
                self.selector.select_without_district(user_risk.as_deref()),
            ),
        };

        RecommendationResponse {
            district: name,
            recommendations: RecommendationResult {
                top_403b: selection.top_403b,
                all_403b: carriers,
                fallback_ira: selection.fallback_ira,
                message: selection.message,
                self_enroll: self.self_enroll(selection.tier),
            },
            user_risk,
        }
    }

    /// False when the effective tier needs an advisor. `None` (an unrecognized
    /// label) can self-enroll.
    pub fn self_enroll(&self, tier: Option<RiskTier>) -> bool {
        tier.map_or(true, |t| !self.advisory_tiers.contains(&t))
    }
}
