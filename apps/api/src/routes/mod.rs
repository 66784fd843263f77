pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::collaborators::handlers as collaborators;
use crate::recommend::handlers as recommend;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation core
        .route("/api/v1/districts", get(recommend::handle_list_districts))
        .route("/api/v1/vendors", get(recommend::handle_list_vendors))
        .route(
            "/api/v1/recommendations",
            post(recommend::handle_recommendations),
        )
        // Collaborators
        .route("/api/v1/risk-score", post(collaborators::handle_risk_score))
        .route("/api/v1/pension", post(collaborators::handle_pension))
        .route(
            "/api/v1/external-registration",
            post(collaborators::handle_external_registration),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::collaborators::registration::RegistrationClient;
    use crate::config::{default_advisory_tiers, Config};
    use crate::matching::resolver::{DistrictResolver, FuzzyOptions};
    use crate::models::district::{Carrier, CarrierType, District};
    use crate::recommend::aggregator::RecommendationAggregator;
    use crate::recommend::selector::{FillerStrategy, RiskTierSelector};
    use crate::store::{DistrictStore, InMemoryDistrictStore};
    use crate::vendors::catalog::VendorCatalog;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            db_max_connections: 1,
            port: 0,
            rust_log: "info".to_string(),
            registration_api_key: None,
            registration_url: "http://127.0.0.1:9/unused".to_string(),
            advisory_tiers: default_advisory_tiers(),
            filler_strategy: FillerStrategy::Ordered,
            match_threshold: 0.4,
        }
    }

    fn app_with(store: Arc<dyn DistrictStore>) -> Router {
        let config = test_config();
        let catalog = Arc::new(VendorCatalog::standard());
        let recommender = RecommendationAggregator::new(
            DistrictResolver::new(FuzzyOptions::default()),
            RiskTierSelector::new(catalog.clone(), config.filler_strategy),
            config.advisory_tiers.clone(),
        );
        build_router(AppState {
            store,
            catalog,
            recommender: Arc::new(recommender),
            registration: RegistrationClient::new(config.registration_url, None).unwrap(),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(InMemoryDistrictStore::new(vec![
            District::new("Anniston City Board of Education", "AL")
                .with_carrier(Carrier::new("NLG", CarrierType::Nlg))
                .with_carrier(Carrier::new("Midland", CarrierType::Midland)),
            District::new("Mesa Unified District", "AZ")
                .with_carrier(Carrier::new("Equitable", CarrierType::B403)),
        ])))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["vendors"], 12);
        assert!(body["checkedAt"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_end_to_end() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/recommendations",
                json!({"districtQuery": "anniston", "riskTier": "Conservative"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["district"], "Anniston City Board of Education");
        assert_eq!(body["userRisk"], "Conservative");
        let top = body["recommendations"]["top403b"].as_array().unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0]["vendor"], "National Life Group");
        assert_eq!(top[1]["vendor"], "Midland");
        assert_eq!(body["recommendations"]["fallbackIRA"], json!([]));
        assert_eq!(body["recommendations"]["selfEnroll"], true);
    }

    #[tokio::test]
    async fn test_blank_district_query_is_bad_request() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/recommendations", json!({"districtQuery": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_store_outage_is_service_unavailable() {
        let app = app_with(Arc::new(InMemoryDistrictStore::failing("db down")));
        let (status, body) = send(
            app,
            post_json("/api/v1/recommendations", json!({"districtQuery": "anniston"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_list_districts_by_state() {
        let (status, body) = send(
            app(),
            Request::get("/api/v1/districts?state=az")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Mesa Unified District"]));
    }

    #[tokio::test]
    async fn test_list_vendors_for_tier() {
        let (status, body) = send(
            app(),
            Request::get("/api/v1/vendors?riskTier=Balanced")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["vendor"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["AX Corebridge", "F&G", "Security Benefit"]);
    }

    #[tokio::test]
    async fn test_list_vendors_rejects_unknown_tier() {
        let (status, _) = send(
            app(),
            Request::get("/api/v1/vendors?riskTier=Reckless")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_risk_score() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/risk-score",
                json!({"answers": {"q1": 10, "q2": 10, "q3": 10}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 30.0);
        assert_eq!(body["riskTier"], "Growth");
    }

    #[tokio::test]
    async fn test_risk_score_requires_answers() {
        let (status, _) = send(app(), post_json("/api/v1/risk-score", json!({"answers": {}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pension() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/pension",
                json!({"state": "CO", "yearsOfService": 20, "averageSalary": 50000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["estimatedPension"], 25000.0);
        assert_eq!(body["incomeGap"], 25000.0);
    }

    #[tokio::test]
    async fn test_pension_unknown_state_estimates_zero() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/pension",
                json!({"state": "ZZ", "yearsOfService": 20, "averageSalary": 50000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimatedPension"], 0.0);
        assert_eq!(body["incomeGap"], 50000.0);
    }

    #[tokio::test]
    async fn test_registration_without_key_is_service_unavailable() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/external-registration", json!({"firstName": "Ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "REGISTRATION_UNCONFIGURED");
    }
}
