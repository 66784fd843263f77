use anyhow::{bail, Context, Result};

use crate::recommend::selector::FillerStrategy;
use crate::vendors::risk::RiskTier;

const DEFAULT_REGISTRATION_URL: &str = "https://self-enroll.ai/api/external-registration";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Key forwarded as `x-api-key` by the registration proxy. The proxy
    /// answers 503 when this is unset instead of refusing to boot.
    pub registration_api_key: Option<String>,
    pub registration_url: String,
    /// Risk tiers that must talk to an advisor before enrolling.
    pub advisory_tiers: Vec<RiskTier>,
    pub filler_strategy: FillerStrategy,
    pub match_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let advisory_tiers = match std::env::var("ADVISORY_RISK_TIERS") {
            Ok(raw) => parse_tier_list(&raw)?,
            Err(_) => default_advisory_tiers(),
        };

        let filler_strategy = match std::env::var("FILLER_STRATEGY") {
            Ok(raw) => raw
                .parse::<FillerStrategy>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("FILLER_STRATEGY must be 'ordered' or 'random'")?,
            Err(_) => FillerStrategy::default(),
        };

        let match_threshold = std::env::var("MATCH_THRESHOLD")
            .unwrap_or_else(|_| "0.4".to_string())
            .parse::<f64>()
            .context("MATCH_THRESHOLD must be a number")?;
        if !(0.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must be between 0.0 and 1.0, got {match_threshold}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            registration_api_key: std::env::var("REGISTRATION_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            registration_url: std::env::var("REGISTRATION_URL")
                .unwrap_or_else(|_| DEFAULT_REGISTRATION_URL.to_string()),
            advisory_tiers,
            filler_strategy,
            match_threshold,
        })
    }
}

pub fn default_advisory_tiers() -> Vec<RiskTier> {
    vec![RiskTier::AggressiveGrowth, RiskTier::MostAggressive]
}

/// Parses a comma-separated list of tier labels, e.g. `"Balanced, MostAggressive"`.
fn parse_tier_list(raw: &str) -> Result<Vec<RiskTier>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|label| {
            RiskTier::parse(label)
                .with_context(|| format!("ADVISORY_RISK_TIERS contains unknown tier '{label}'"))
        })
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
