//! Vendor Recommendation Engine
//! Resolver + Selector + Aggregator: free-text district query in, shortlist out.

pub mod aggregator;
pub mod handlers;
pub mod selector;

use serde::Serialize;

use crate::models::district::Carrier;
use crate::vendors::catalog::EnrichedVendor;

/// The recommendation payload returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    #[serde(rename = "top403b")]
    pub top_403b: Vec<EnrichedVendor>,
    /// Every carrier of the resolved district, unfiltered.
    #[serde(rename = "all403b")]
    pub all_403b: Vec<Carrier>,
    #[serde(rename = "fallbackIRA")]
    pub fallback_ira: Vec<EnrichedVendor>,
    pub message: String,
    pub self_enroll: bool,
}
