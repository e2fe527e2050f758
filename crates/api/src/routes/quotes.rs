//! Route definitions for the public quotation wizard.
//!
//! Mounted at `/quotes` by `api_routes()`.

use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::handlers::quotes;
use crate::middleware::rate_limit::limit_quote_submissions;
use crate::state::AppState;

/// Quote routes.
///
/// ```text
/// POST   /                  -> submit_quote (per-IP hourly limit)
/// POST   /estimate          -> estimate_quote
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(quotes::submit_quote).route_layer(from_fn_with_state(
                state.clone(),
                limit_quote_submissions,
            )),
        )
        .route("/estimate", post(quotes::estimate_quote))
}
