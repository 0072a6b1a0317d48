//! Route definitions for the `/chat` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::advice;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST /advice -> chat_advice (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/advice", post(advice::chat_advice))
}
