//! HTTP route handlers for the decision engine API.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::AppState;

use super::models::{
    CapacityReport, EngineError, EvaluateRequest, EvaluateResponse, MealCheck, ProjectRequest,
    ProjectResponse, ProjectionPoint,
};
use super::{advisor, capacity, classifier, projection, TOOL, TOOL_VERSION};

/// Compute SHA256 hash of input string.
fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex::encode(digest))
}

/// Create the engine router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .route("/project", post(project))
        .route("/capacity", post(capacity_check))
}

/// Health check with the policy constants currently in force.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "decision-engine",
        "version": TOOL_VERSION,
        "policy": {
            "target_glucose": state.params.target_glucose,
            "carb_factor": state.params.carb_factor,
            "nadir_window": state.params.nadir_window,
            "rapid_drop_buffer": state.params.rapid_drop_buffer,
        }
    }))
}

/// Full decision pass: classify, advise, project, and optionally check a
/// proposed meal volume, in one response for the dashboard.
async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>> {
    // Serialize request for input hash
    let input_json = serde_json::to_string(&request).unwrap_or_default();

    request.reading.validate()?;

    let params = &state.params;
    let (tier, narrative) = classifier::classify(&request.reading, params);
    let recommendation = advisor::advise(&request.reading, tier, params);
    let points: Vec<ProjectionPoint> =
        projection::project(&request.reading, params, request.horizon_hours).collect();

    let meal = match &request.meal {
        Some(check) => Some(capacity_report(check)?),
        None => None,
    };

    tracing::info!(
        glucose = request.reading.glucose_mg_dl,
        tier = tier.as_str(),
        action = ?recommendation.action,
        "evaluated reading"
    );

    Ok(Json(EvaluateResponse {
        tool: TOOL,
        tool_version: TOOL_VERSION,
        tier,
        narrative,
        recommendation,
        projection: points,
        meal,
        input_hash: sha256_hex(&input_json),
        evaluated_at: Utc::now(),
    }))
}

/// Forecast curve only.
async fn project(
    State(state): State<AppState>,
    Json(request): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    request.reading.validate()?;
    let points =
        projection::project(&request.reading, &state.params, request.horizon_hours).collect();
    Ok(Json(ProjectResponse { points }))
}

/// Gastric ceiling and meal fit, independent of the glucose path.
async fn capacity_check(Json(request): Json<MealCheck>) -> Result<Json<CapacityReport>> {
    Ok(Json(capacity_report(&request)?))
}

fn capacity_report(check: &MealCheck) -> std::result::Result<CapacityReport, EngineError> {
    let ceiling = capacity::max_meal_volume(check.base_capacity_g, check.cyst_diameter_mm)?;
    let fit = match check.proposed_meal_g {
        Some(proposed) => Some(capacity::classify_meal(proposed, ceiling)?),
        None => None,
    };
    Ok(CapacityReport {
        max_meal_volume_g: ceiling,
        proposed_meal_g: check.proposed_meal_g,
        fit,
    })
}
