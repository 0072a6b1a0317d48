//! Route definitions for the `/projectedPoints` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::advice;
use crate::state::AppState;

/// Routes mounted at `/projectedPoints`.
///
/// ```text
/// POST /points -> projected_points (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/points", post(advice::projected_points))
}
