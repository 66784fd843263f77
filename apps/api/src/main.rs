mod collaborators;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod recommend;
mod routes;
mod state;
mod store;
mod vendors;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::collaborators::registration::RegistrationClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::matching::resolver::{DistrictResolver, FuzzyOptions};
use crate::recommend::aggregator::RecommendationAggregator;
use crate::recommend::selector::RiskTierSelector;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgDistrictStore;
use crate::vendors::catalog::VendorCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let store = Arc::new(PgDistrictStore::new(db));

    // Vendor catalog is immutable for the life of the process
    let catalog = Arc::new(VendorCatalog::standard());
    info!("Vendor catalog loaded ({} vendors)", catalog.vendors().len());

    let resolver = DistrictResolver::new(FuzzyOptions {
        threshold: config.match_threshold,
        ..FuzzyOptions::default()
    });
    let selector = RiskTierSelector::new(catalog.clone(), config.filler_strategy);
    let recommender = Arc::new(RecommendationAggregator::new(
        resolver,
        selector,
        config.advisory_tiers.clone(),
    ));
    info!(
        "Recommender ready (threshold {}, filler {:?}, advisory tiers {:?})",
        config.match_threshold, config.filler_strategy, config.advisory_tiers
    );

    let registration = RegistrationClient::new(
        config.registration_url.clone(),
        config.registration_api_key.clone(),
    )?;
    if config.registration_api_key.is_none() {
        info!("REGISTRATION_API_KEY not set; registration proxy disabled");
    }

    // Build app state
    let state = AppState {
        store,
        catalog,
        recommender,
        registration,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
