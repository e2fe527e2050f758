//! Mounted at `/catalog` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET    /                  -> get_catalog
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(catalog::get_catalog))
}
