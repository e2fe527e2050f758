//! Handlers for the public quotation wizard.
//!
//! The wizard previews a price while the customer fills in the form and
//! then submits the whole request. Both paths recompute the estimate on
//! the server from the catalog rates.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use ermel_core::error::CoreError;
use ermel_core::estimation::{self, CostEstimate};
use ermel_core::measurement::{self, MeasurementUnit, UnitValues};
use ermel_core::order_id::{generate_order_id, MAX_ID_ATTEMPTS};
use ermel_core::phone::mask_phone;
use ermel_core::submission::{self, LooseNumber, ValidatedQuote, HEIGHT_INVALID, WIDTH_INVALID};
use ermel_core::types::Date;
use ermel_db::models::quote::Quote;
use ermel_db::repositories::QuoteRepo;
use ermel_db::DbPool;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a stored quote.
#[derive(Debug, Serialize)]
pub struct SubmitQuoteResponse {
    pub id: String,
    pub success: bool,
}

/// Price preview request. Unknown selections fall back to default rates.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub project: Option<String>,
    pub glass_type: Option<String>,
    pub material: Option<String>,
    pub measurement_unit: Option<String>,
    pub width: Option<LooseNumber>,
    pub height: Option<LooseNumber>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub unit: MeasurementUnit,
    pub width: UnitValues,
    pub height: UnitValues,
    #[serde(flatten)]
    pub estimate: CostEstimate,
}

// ---------------------------------------------------------------------------
// POST /quotes/estimate
// ---------------------------------------------------------------------------

/// Compute a price preview without storing anything.
pub async fn estimate_quote(
    AppJson(input): AppJson<EstimateRequest>,
) -> AppResult<Json<DataResponse<EstimateResponse>>> {
    let unit = MeasurementUnit::parse_or_default(input.measurement_unit.as_deref());
    let width = input.width.as_ref().map_or(f64::NAN, LooseNumber::value);
    let height = input.height.as_ref().map_or(f64::NAN, LooseNumber::value);

    let mut errors = Vec::new();
    if !measurement::is_valid_measurement(width, unit) {
        errors.push(WIDTH_INVALID);
    }
    if !measurement::is_valid_measurement(height, unit) {
        errors.push(HEIGHT_INVALID);
    }
    if !errors.is_empty() {
        return Err(CoreError::Validation(errors.join(" ")).into());
    }

    let estimate = estimation::estimate_quote(
        input.project.as_deref().unwrap_or_default(),
        input.glass_type.as_deref().unwrap_or_default(),
        input.material.as_deref().unwrap_or_default(),
        width,
        height,
        unit,
    );

    Ok(Json(DataResponse {
        data: EstimateResponse {
            unit,
            width: measurement::all_units_from_meters(measurement::to_meters(width, unit)),
            height: measurement::all_units_from_meters(measurement::to_meters(height, unit)),
            estimate,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /quotes
// ---------------------------------------------------------------------------

/// Validate and store a quote request, returning its new order id.
///
/// All validation failures are reported together as one 400 message.
pub async fn submit_quote(
    State(state): State<AppState>,
    AppJson(input): AppJson<submission::QuoteSubmission>,
) -> AppResult<impl IntoResponse> {
    let quote = submission::validate_submission(&input)?;

    let created = insert_with_fresh_id(&state.pool, Utc::now().date_naive(), &quote).await?;

    tracing::info!(
        order_id = %created.id,
        customer = %created.customer,
        phone = %mask_phone(&quote.phone),
        project = %created.project,
        dimensions = %created.dimensions,
        estimated_cost = created.estimated_cost,
        "Quote request stored",
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitQuoteResponse {
            id: created.id,
            success: true,
        }),
    ))
}

/// Insert under a freshly generated order id, drawing a new one when the
/// id is already taken.
async fn insert_with_fresh_id(
    pool: &DbPool,
    created_date: Date,
    quote: &ValidatedQuote,
) -> AppResult<Quote> {
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let id = generate_order_id(created_date.year());
        match QuoteRepo::create(pool, &id, created_date, quote).await {
            Ok(created) => return Ok(created),
            Err(err) if is_unique_violation(&err) => {
                tracing::warn!(order_id = %id, attempt, "Order id already taken, retrying");
            }
            Err(err) => return Err(AppError::Database(err)),
        }
    }

    Err(AppError::InternalError(format!(
        "No free order id after {MAX_ID_ATTEMPTS} attempts"
    )))
}
