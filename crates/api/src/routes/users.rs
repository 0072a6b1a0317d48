//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require authentication.
///
/// ```text
/// POST /managerId          -> link_manager
/// GET  /fpl-manager/{id}   -> manager_name
/// GET  /points/{id}        -> live_score
/// GET  /ranks/{id}         -> ranks
/// GET  /gameweekChart/{id} -> gameweek_chart
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/managerId", post(users::link_manager))
        .route("/fpl-manager/{id}", get(users::manager_name))
        .route("/points/{id}", get(users::live_score))
        .route("/ranks/{id}", get(users::ranks))
        .route("/gameweekChart/{id}", get(users::gameweek_chart))
}
