use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::PatientProfile;
use super::service::{MatchService, MatchServiceError};

/// Router builder exposing the ranking operation and catalog lookups.
pub fn match_router(service: Arc<MatchService>) -> Router {
    Router::new()
        .route("/api/v1/match", post(match_handler))
        .route("/api/v1/trials/:nct_id", get(trial_handler))
        .with_state(service)
}

async fn match_handler(
    State(service): State<Arc<MatchService>>,
    axum::Json(patient): axum::Json<PatientProfile>,
) -> Response {
    match service.rank_patient(&patient) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(err @ (MatchServiceError::EmptyCatalog | MatchServiceError::Match(_))) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

async fn trial_handler(
    State(service): State<Arc<MatchService>>,
    Path(nct_id): Path<String>,
) -> Response {
    match service.find_trial(&nct_id) {
        Some(trial) => (StatusCode::OK, axum::Json(trial)).into_response(),
        None => {
            let payload = json!({ "error": format!("trial '{nct_id}' not found") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
