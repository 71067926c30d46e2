//! Request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use symptom_triage_core::scheduler::schedule as suggest_slot;
use symptom_triage_core::{PredictError, Prediction, ScheduleSuggestion};

use crate::error::ApiError;
use crate::request::{parse_predict, parse_schedule, MISSING_SYMPTOMS};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub timestamp: String,
}

/// `POST /predict`: most likely disease, confidence and risk level.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Prediction>, ApiError> {
    let report = parse_predict(&body)?;

    let prediction = state.predictor.predict(&report).map_err(|e| match e {
        PredictError::NoSymptoms => ApiError::BadRequest(MISSING_SYMPTOMS),
        other => ApiError::internal("Prediction failed", other),
    })?;

    tracing::info!(
        disease = %prediction.disease,
        confidence = prediction.confidence,
        risk = %prediction.risk_level,
        "Prediction served"
    );
    Ok(Json(prediction))
}

/// `POST /schedule`: suggested appointment date and slots.
pub async fn schedule(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScheduleSuggestion>, ApiError> {
    let today = state.today();
    let request = parse_schedule(&body, today)?;

    let suggestion = suggest_slot(request.risk_level, request.preferred_date, today)
        .map_err(|e| ApiError::internal("Scheduling failed", e))?;

    tracing::info!(
        priority = %suggestion.priority,
        date = %suggestion.suggested_date,
        time = %suggestion.suggested_time,
        "Appointment suggested"
    );
    Ok(Json(suggestion))
}

/// `GET /health`: liveness and model readiness.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
}
