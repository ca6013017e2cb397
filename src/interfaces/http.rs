use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::application::gateway::PredictionGateway;
use crate::domain::validation::FeatureValidator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<PredictionGateway>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire shape of a successful prediction.
#[derive(Debug, Serialize)]
struct PredictResponse {
    churn_prediction: u8,
    churn_probability: Option<f64>,
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "project": "Customer Churn Prediction System",
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": state.gateway.oracle_name(),
        "model_version": state.gateway.oracle_version(),
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn predict(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(input) = body.as_object() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_body",
                "message": "request body must be a JSON object",
            })),
        )
            .into_response();
    };

    let features = match FeatureValidator::validate(input) {
        Ok(features) => features,
        Err(errors) => {
            warn!(violations = errors.len(), "Rejected malformed prediction request");
            let fields: Vec<Value> = errors
                .iter()
                .map(|e| json!({"field": e.field(), "message": e.to_string()}))
                .collect();
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "validation_failed",
                    "fields": fields,
                })),
            )
                .into_response();
        }
    };

    match state.gateway.predict(&features) {
        Ok(result) => Json(PredictResponse {
            churn_prediction: result.label.as_u8(),
            churn_probability: result.churn_probability,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "inference_failed",
                "message": e.to_string(),
            })),
        )
            .into_response(),
    }
}
