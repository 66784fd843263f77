//! Axum route handlers for districts and recommendations.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommend::aggregator::{RecommendationRequest, RecommendationResponse};
use crate::state::AppState;
use crate::vendors::catalog::BaseVendor;
use crate::vendors::risk::RiskTier;

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub state: Option<String>,
}

/// GET /api/v1/districts
///
/// Names of every stored district, optionally narrowed by `?state=XX`.
pub async fn handle_list_districts(
    State(state): State<AppState>,
    Query(params): Query<StateQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let districts = state
        .store
        .find_districts_by_state(params.state.as_deref())
        .await?;
    Ok(Json(districts.into_iter().map(|d| d.name).collect()))
}

/// POST /api/v1/recommendations
///
/// Resolves the district query and returns up to two vendor recommendations.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let response = state
        .recommender
        .recommend(state.store.as_ref(), &request)
        .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorQuery {
    pub risk_tier: Option<String>,
}

/// GET /api/v1/vendors
///
/// The base vendor catalog, optionally narrowed to vendors suited to `?riskTier=`.
pub async fn handle_list_vendors(
    State(state): State<AppState>,
    Query(params): Query<VendorQuery>,
) -> Result<Json<Vec<BaseVendor>>, AppError> {
    let tier = match params.risk_tier.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => Some(RiskTier::parse(label).ok_or_else(|| {
            AppError::Validation(format!("unrecognized risk tier '{label}'"))
        })?),
        None => None,
    };

    let vendors = state
        .catalog
        .vendors()
        .iter()
        .filter(|v| tier.map_or(true, |t| v.suits(t)))
        .cloned()
        .collect();
    Ok(Json(vendors))
}
