//! Handlers for the customer tracking dashboard.
//!
//! Customers look orders up by id alone, so the view never exposes the
//! full phone number.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use ermel_core::error::CoreError;
use ermel_core::order_id::is_valid_order_id;
use ermel_core::phone::mask_phone;
use ermel_core::quote_status::OrderStatus;
use ermel_core::types::Date;
use ermel_db::models::quote::Quote;
use ermel_db::repositories::QuoteRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One step of the progress indicator.
#[derive(Debug, Serialize)]
pub struct StageView {
    pub status: OrderStatus,
    pub label: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// What a customer sees for their order.
#[derive(Debug, Serialize)]
pub struct OrderTracking {
    pub id: String,
    pub customer: String,
    pub project: String,
    pub material: String,
    pub glass_type: String,
    pub dimensions: String,
    pub status: OrderStatus,
    pub stage_label: &'static str,
    pub stage_description: &'static str,
    pub stages: Vec<StageView>,
    pub created_date: Date,
    pub scheduled_date: Option<Date>,
    pub estimated_cost: f64,
    pub approved_cost: Option<f64>,
    pub display_cost: f64,
    pub paid: bool,
    pub payment_uploaded: bool,
    pub can_pay: bool,
    pub phone: String,
}

impl OrderTracking {
    fn from_quote(quote: Quote) -> Result<Self, CoreError> {
        let status = quote.order_status()?;
        let stages = OrderStatus::ALL
            .iter()
            .map(|&s| StageView {
                status: s,
                label: s.label(),
                complete: s.position() < status.position(),
                current: s == status,
            })
            .collect();

        Ok(Self {
            display_cost: quote.display_cost(),
            can_pay: quote.can_pay(),
            phone: mask_phone(&quote.phone),
            stage_label: status.label(),
            stage_description: status.description(),
            status,
            stages,
            id: quote.id,
            customer: quote.customer,
            project: quote.project,
            material: quote.material,
            glass_type: quote.glass_type,
            dimensions: quote.dimensions,
            created_date: quote.created_date,
            scheduled_date: quote.scheduled_date,
            estimated_cost: quote.estimated_cost,
            approved_cost: quote.approved_cost,
            paid: quote.paid,
            payment_uploaded: quote.payment_uploaded,
        })
    }
}

/// Look up an order, treating malformed ids as missing.
async fn find_order(state: &AppState, id: &str) -> AppResult<Quote> {
    let not_found = || CoreError::NotFound {
        entity: "Order",
        id: id.to_string(),
    };
    if !is_valid_order_id(id) {
        return Err(not_found().into());
    }
    QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found().into())
}

// ---------------------------------------------------------------------------
// GET /track/{id}
// ---------------------------------------------------------------------------

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<OrderTracking>>> {
    let quote = find_order(&state, &id).await?;
    Ok(Json(DataResponse {
        data: OrderTracking::from_quote(quote)?,
    }))
}

// ---------------------------------------------------------------------------
// POST /track/{id}/payment-proof
// ---------------------------------------------------------------------------

/// Record that the customer uploaded proof of a QRPH payment.
///
/// Only orders with an approved price that are neither paid nor already
/// awaiting verification accept a proof.
pub async fn submit_payment_proof(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<OrderTracking>>> {
    let quote = find_order(&state, &id).await?;
    if !quote.can_pay() {
        return Err(CoreError::Conflict(format!(
            "Order {id} is not awaiting payment"
        ))
        .into());
    }

    let updated = QuoteRepo::mark_payment_uploaded(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Order",
            id: id.clone(),
        })?;

    tracing::info!(order_id = %id, "Payment proof uploaded");

    Ok(Json(DataResponse {
        data: OrderTracking::from_quote(updated)?,
    }))
}
