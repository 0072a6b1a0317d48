pub mod auth;
pub mod chat;
pub mod health;
pub mod projected_points;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register               register (public)
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (requires auth)
///
/// /users/managerId             link FPL manager id (POST, requires auth)
/// /users/fpl-manager/{id}      manager + team name (GET, requires auth)
/// /users/points/{id}           live gameweek + overall points (GET, requires auth)
/// /users/ranks/{id}            classic-league ranks (GET, requires auth)
/// /users/gameweekChart/{id}    per-gameweek points series (GET, requires auth)
///
/// /chat/advice                 transfer-advice chat (POST, requires auth)
/// /projectedPoints/points      projected-points estimate (POST, requires auth)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/chat", chat::router())
        .nest("/projectedPoints", projected_points::router())
}
