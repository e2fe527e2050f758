//! Response envelope types shared by the JSON handlers.

use serde::Serialize;

/// `{ "data": T }` wrapper used by read endpoints.
///
/// Quote submission returns the bare `{ id, success }` shape instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
