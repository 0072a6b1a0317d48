//! Handlers for the AI features: transfer-advice chat and the
//! projected-points estimate.
//!
//! Both run the same shape: validate body -> build squad context ->
//! invoke the advice pipeline -> map the normalized result to JSON.
//! They differ in how a degraded context is treated: chat still asks the
//! model against the sentinel text, projection rejects with 500.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use fplmate_advice::Source;
use fplmate_fpl::{ContextBuilder, ContextVariant};

use crate::error::{AppError, AppResult};
use crate::handlers::users::require_manager_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/advice`.
#[derive(Debug, Deserialize)]
pub struct ChatAdviceRequest {
    pub prompt: Option<String>,
    #[serde(rename = "managerId")]
    pub manager_id: Option<String>,
}

/// Response for `POST /chat/advice`.
#[derive(Debug, Serialize)]
pub struct ChatAdviceResponse {
    pub advice: String,
    pub sources: Vec<Source>,
}

/// Request body for `POST /projectedPoints/points`.
#[derive(Debug, Deserialize)]
pub struct ProjectedPointsRequest {
    #[serde(rename = "managerId")]
    pub manager_id: Option<String>,
}

/// Response for `POST /projectedPoints/points`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPointsResponse {
    pub projected_points: String,
    pub sources: Vec<Source>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /chat/advice
///
/// Answer a free-text FPL question against the manager's current squad.
/// A degraded context is passed through to the model so the user still
/// gets an answer when the squad could not be fetched.
pub async fn chat_advice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChatAdviceRequest>,
) -> AppResult<Json<ChatAdviceResponse>> {
    let prompt = input
        .prompt
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Prompt is required.".into()))?;
    let manager_id = require_manager_id(input.manager_id)?;

    tracing::info!(user_id = auth_user.user_id, manager_id = %manager_id, "chat advice requested");

    let outcome = ContextBuilder::new(&state.fpl)
        .build(&manager_id, ContextVariant::Chat)
        .await?;

    let result = state
        .advice
        .chat_advice(&prompt, &outcome.render(), outcome.current_gameweek())
        .await?;

    Ok(Json(ChatAdviceResponse {
        advice: result.text,
        sources: result.sources,
    }))
}

/// POST /projectedPoints/points
///
/// Project the manager's points for the current gameweek. Unlike chat,
/// a degraded context is a hard failure here: a projection over an
/// unknown squad would be meaningless.
pub async fn projected_points(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ProjectedPointsRequest>,
) -> AppResult<Json<ProjectedPointsResponse>> {
    let manager_id = input
        .manager_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(
                "FPL Manager ID is missing. Please enter your FPL ID in the settings \
                 to enable personalized advice."
                    .into(),
            )
        })?;

    tracing::info!(user_id = auth_user.user_id, manager_id = %manager_id, "projection requested");

    let outcome = ContextBuilder::new(&state.fpl)
        .build(&manager_id, ContextVariant::Projection)
        .await?;

    if outcome.is_degraded() {
        return Err(AppError::ContextDegraded(outcome.render()));
    }

    let result = state.advice.projected_points(&outcome.render()).await?;

    Ok(Json(ProjectedPointsResponse {
        projected_points: result.text,
        sources: result.sources,
    }))
}
