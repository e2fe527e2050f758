use axum::Json;

use ermel_core::catalog::{self, Catalog};

use crate::response::DataResponse;

/// GET /api/catalog -- the options the quotation wizard offers.
pub async fn get_catalog() -> Json<DataResponse<Catalog>> {
    Json(DataResponse {
        data: catalog::catalog(),
    })
}
