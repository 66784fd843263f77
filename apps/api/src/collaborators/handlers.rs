//! Axum route handlers for the pension, risk-quiz and registration endpoints.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::warn;

use crate::collaborators::pension::{estimate_pension, income_gap, PensionRequest, PensionResponse};
use crate::collaborators::risk_quiz::{score_answers, RiskQuizRequest, RiskQuizResult};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/risk-score
pub async fn handle_risk_score(
    Json(request): Json<RiskQuizRequest>,
) -> Result<Json<RiskQuizResult>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }
    if request.answers.values().any(|v| !v.is_finite()) {
        return Err(AppError::Validation("answers must be numbers".to_string()));
    }
    Ok(Json(score_answers(&request.answers)))
}

/// POST /api/v1/pension
///
/// Unsupported states estimate 0, so the income gap equals the salary.
pub async fn handle_pension(
    Json(request): Json<PensionRequest>,
) -> Result<Json<PensionResponse>, AppError> {
    if request.years_of_service < 0.0 || request.average_salary < 0.0 {
        return Err(AppError::Validation(
            "yearsOfService and averageSalary must be non-negative".to_string(),
        ));
    }

    let estimated_pension = estimate_pension(
        &request.state,
        request.years_of_service,
        request.average_salary,
    )
    .unwrap_or_else(|| {
        warn!(state = %request.state, "State code not recognized for pension estimate");
        0.0
    });

    Ok(Json(PensionResponse {
        success: true,
        income_gap: income_gap(request.average_salary, estimated_pension),
        state: request.state,
        years_of_service: request.years_of_service,
        average_salary: request.average_salary,
        estimated_pension,
    }))
}

/// POST /api/v1/external-registration
///
/// Forwards the JSON body to the configured registration service.
pub async fn handle_external_registration(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let body = state.registration.forward(&payload).await?;
    Ok(Json(body))
}
