//! Route definitions for the admin dashboard.
//!
//! Mounted at `/admin` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes.
///
/// ```text
/// GET    /quotes                -> list_quotes
/// GET    /quotes/{id}           -> get_quote
/// PUT    /quotes/{id}/status    -> update_quote_status
/// PUT    /quotes/{id}/cost      -> approve_quote_cost
/// PUT    /quotes/{id}/paid      -> mark_quote_paid
/// GET    /board                 -> get_board
/// GET    /stats                 -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(admin::list_quotes))
        .route("/quotes/{id}", get(admin::get_quote))
        .route("/quotes/{id}/status", put(admin::update_quote_status))
        .route("/quotes/{id}/cost", put(admin::approve_quote_cost))
        .route("/quotes/{id}/paid", put(admin::mark_quote_paid))
        .route("/board", get(admin::get_board))
        .route("/stats", get(admin::get_stats))
}
