pub mod admin;
pub mod catalog;
pub mod health;
pub mod quotes;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                  service + database health
///
/// /catalog                                 wizard options (GET)
///
/// /quotes                                  submit quote (POST, rate limited)
/// /quotes/estimate                         price preview (POST)
///
/// /track/{id}                              customer order view (GET)
/// /track/{id}/payment-proof                mark payment proof uploaded (POST)
///
/// /admin/quotes                            list (GET, ?status&limit&offset)
/// /admin/quotes/{id}                       get
/// /admin/quotes/{id}/status                move pipeline stage (PUT)
/// /admin/quotes/{id}/cost                  approve final price (PUT)
/// /admin/quotes/{id}/paid                  confirm payment (PUT)
/// /admin/board                             kanban columns (GET)
/// /admin/stats                             dashboard counters (GET)
/// ```
///
/// `state` binds the quote limiter to `POST /quotes`.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/catalog", catalog::router())
        .nest("/quotes", quotes::router(state))
        .nest("/track", tracking::router())
        .nest("/admin", admin::router())
}
