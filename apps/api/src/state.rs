use std::sync::Arc;

use crate::collaborators::registration::RegistrationClient;
use crate::recommend::aggregator::RecommendationAggregator;
use crate::store::DistrictStore;
use crate::vendors::catalog::VendorCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable district store. Postgres in production, in-memory in tests.
    pub store: Arc<dyn DistrictStore>,
    /// Immutable after startup; read concurrently without locking.
    pub catalog: Arc<VendorCatalog>,
    pub recommender: Arc<RecommendationAggregator>,
    pub registration: RegistrationClient,
}
