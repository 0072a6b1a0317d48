//! Handlers for the `/users` resource: manager-id linking and the
//! dashboard reads proxied from the FPL entry/history endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use fplmate_core::error::CoreError;
use fplmate_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/managerId`.
#[derive(Debug, Deserialize)]
pub struct LinkManagerRequest {
    #[serde(rename = "managerId")]
    pub manager_id: Option<String>,
}

/// Response for `POST /users/managerId`.
#[derive(Debug, Serialize)]
pub struct LinkManagerResponse {
    pub message: String,
    #[serde(rename = "managerId")]
    pub manager_id: String,
}

/// Response for `GET /users/fpl-manager/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerNameResponse {
    pub manager_name: String,
    pub team_name: String,
}

/// Response for `GET /users/points/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveScoreResponse {
    pub game_week_points: i64,
    pub overall_points: i64,
}

/// Response for `GET /users/ranks/{id}`.
#[derive(Debug, Serialize)]
pub struct RanksResponse {
    pub leagues: Vec<LeagueRank>,
}

#[derive(Debug, Serialize)]
pub struct LeagueRank {
    pub name: String,
    pub rank: Option<i64>,
}

/// Response for `GET /users/gameweekChart/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekChartResponse {
    pub game_week_points_chart: Vec<GameweekPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekPoint {
    pub gw: i32,
    pub gw_point: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users/managerId
///
/// Validate the manager id against the FPL entry endpoint, then store it
/// (and the FPL manager's display name) on the authenticated user.
pub async fn link_manager(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<LinkManagerRequest>,
) -> AppResult<Json<LinkManagerResponse>> {
    let manager_id = require_manager_id(input.manager_id)?;

    // An unknown id 404s on the entry endpoint; report that as a bad
    // request rather than a missing resource on our side.
    let entry = state.fpl.entry(&manager_id).await.map_err(|err| {
        if err.is_not_found() {
            AppError::BadRequest("Invalid FPL Manager ID.".into())
        } else {
            AppError::Fpl(err)
        }
    })?;

    let manager_name = format!("{} {}", entry.player_first_name, entry.player_last_name);

    let user = UserRepo::link_manager(&state.pool, auth_user.user_id, &manager_id, &manager_name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "user",
                id: auth_user.user_id.to_string(),
            })
        })?;

    tracing::info!(user_id = user.id, manager_id = %manager_id, "manager id linked");

    Ok(Json(LinkManagerResponse {
        message: "Manager ID successfully saved.".into(),
        manager_id,
    }))
}

/// GET /users/fpl-manager/{id}
///
/// Look up a manager's display name and team name.
pub async fn manager_name(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ManagerNameResponse>> {
    let entry = state.fpl.entry(&id).await?;

    Ok(Json(ManagerNameResponse {
        manager_name: format!("{} {}", entry.player_first_name, entry.player_last_name),
        team_name: entry.name,
    }))
}

/// GET /users/points/{id}
///
/// Live gameweek score and overall points for a manager.
pub async fn live_score(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<LiveScoreResponse>> {
    let entry = state.fpl.entry(&id).await?;

    Ok(Json(LiveScoreResponse {
        game_week_points: entry.summary_event_points.unwrap_or(0),
        overall_points: entry.summary_overall_points.unwrap_or(0),
    }))
}

/// GET /users/ranks/{id}
///
/// Classic-league ranks for a manager.
pub async fn ranks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<RanksResponse>> {
    let entry = state.fpl.entry(&id).await?;

    let leagues = entry
        .leagues
        .classic
        .into_iter()
        .map(|league| LeagueRank {
            name: league.name,
            rank: league.entry_rank,
        })
        .collect();

    Ok(Json(RanksResponse { leagues }))
}

/// GET /users/gameweekChart/{id}
///
/// Per-gameweek points for the season, in gameweek order, for charting.
pub async fn gameweek_chart(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<GameweekChartResponse>> {
    let history = state.fpl.history(&id).await?;

    let game_week_points_chart = history
        .current
        .into_iter()
        .map(|gw| GameweekPoint {
            gw: gw.event,
            gw_point: gw.points,
        })
        .collect();

    Ok(Json(GameweekChartResponse {
        game_week_points_chart,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject absent or blank manager ids with the canonical 400 message.
pub(crate) fn require_manager_id(manager_id: Option<String>) -> AppResult<String> {
    manager_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Manager ID is required.".into()))
}
