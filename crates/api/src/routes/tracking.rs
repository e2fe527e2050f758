//! Route definitions for customer order tracking.
//!
//! Mounted at `/track` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

/// Tracking routes.
///
/// ```text
/// GET    /{id}                  -> get_order
/// POST   /{id}/payment-proof    -> submit_payment_proof
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(tracking::get_order))
        .route("/{id}/payment-proof", post(tracking::submit_payment_proof))
}
