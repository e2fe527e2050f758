//! Handlers for the admin dashboard.
//!
//! Covers the quote list, the kanban board, pipeline moves with
//! installation scheduling, price approval and payment confirmation.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use ermel_core::dashboard::{self, DashboardStats};
use ermel_core::error::CoreError;
use ermel_core::quote_status::{self, OrderStatus};
use ermel_core::scheduling::{self, ScheduledOrder};
use ermel_db::models::quote::{ApproveQuoteCost, Quote, QuoteListParams, UpdateQuoteStatus};
use ermel_db::repositories::QuoteRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::query::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// One kanban column.
#[derive(Debug, Serialize)]
pub struct BoardColumn {
    pub status: OrderStatus,
    pub label: &'static str,
    pub orders: Vec<Quote>,
}

fn quote_not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Quote",
        id: id.to_string(),
    }
}

async fn find_quote(state: &AppState, id: &str) -> AppResult<Quote> {
    QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| quote_not_found(id).into())
}

// ---------------------------------------------------------------------------
// GET /admin/quotes
// ---------------------------------------------------------------------------

/// List quotes, newest first, optionally filtered by status.
pub async fn list_quotes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<QuoteListParams>,
) -> AppResult<Json<DataResponse<Vec<Quote>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let quotes = QuoteRepo::list_filtered(
        &state.pool,
        status.map(OrderStatus::as_str),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: quotes }))
}

// ---------------------------------------------------------------------------
// GET /admin/quotes/{id}
// ---------------------------------------------------------------------------

pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Quote>>> {
    let quote = find_quote(&state, &id).await?;
    Ok(Json(DataResponse { data: quote }))
}

// ---------------------------------------------------------------------------
// PUT /admin/quotes/{id}/status
// ---------------------------------------------------------------------------

/// Move a quote to an adjacent pipeline stage, or reschedule it in place.
///
/// Keeping the current stage is accepted only when `scheduled_date` changes.
/// Moving or rescheduling into `installation` on a date already taken by
/// another installation is refused with 409 unless `force` is set.
///
/// The quote row stays locked for the whole update, and installation
/// bookings take the schedule advisory lock before the conflict check.
pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateQuoteStatus>,
) -> AppResult<Json<DataResponse<Quote>>> {
    let target: OrderStatus = input.status.parse()?;

    let mut tx = state.pool.begin().await?;
    let current = QuoteRepo::find_by_id_for_update(&mut *tx, &id)
        .await?
        .ok_or_else(|| quote_not_found(&id))?;
    let from = current.order_status()?;

    let reschedules = input
        .scheduled_date
        .is_some_and(|date| Some(date) != current.scheduled_date);
    quote_status::validate_status_update(from, target, reschedules)?;

    let scheduled_date = input.scheduled_date.or(current.scheduled_date);
    if target == OrderStatus::Installation {
        QuoteRepo::lock_installation_schedule(&mut *tx).await?;

        if let Some(date) = scheduled_date {
            let booked = QuoteRepo::list_installations_on(&mut *tx, date)
                .await?
                .iter()
                .map(Quote::scheduling_view)
                .collect::<Result<Vec<ScheduledOrder>, CoreError>>()?;

            if let Some(clash) =
                scheduling::find_installation_conflict(&id, target, Some(date), &booked)
            {
                if !input.force {
                    return Err(CoreError::Conflict(format!(
                        "Installation on {date} is already booked for order {}",
                        clash.id
                    ))
                    .into());
                }
                tracing::warn!(
                    order_id = %id,
                    conflicting_order = %clash.id,
                    %date,
                    "Installation double-booked by override",
                );
            }
        }
    }

    let updated = QuoteRepo::update_status(&mut *tx, &id, target, input.scheduled_date)
        .await?
        .ok_or_else(|| quote_not_found(&id))?;
    tx.commit().await?;

    tracing::info!(
        order_id = %id,
        from = %from,
        to = %target,
        scheduled_date = ?updated.scheduled_date,
        "Order status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /admin/quotes/{id}/cost
// ---------------------------------------------------------------------------

/// Approve the final price. A new price clears any earlier payment.
pub async fn approve_quote_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ApproveQuoteCost>,
) -> AppResult<Json<DataResponse<Quote>>> {
    if !input.approved_cost.is_finite() || input.approved_cost <= 0.0 {
        return Err(CoreError::Validation(
            "Approved cost must be a positive number".to_string(),
        )
        .into());
    }

    let updated = QuoteRepo::approve_cost(&state.pool, &id, input.approved_cost)
        .await?
        .ok_or_else(|| quote_not_found(&id))?;

    tracing::info!(
        order_id = %id,
        approved_cost = input.approved_cost,
        "Quote cost approved",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /admin/quotes/{id}/paid
// ---------------------------------------------------------------------------

/// Confirm payment for a quote that has an approved price.
pub async fn mark_quote_paid(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Quote>>> {
    let current = find_quote(&state, &id).await?;
    if current.approved_cost.is_none() {
        return Err(CoreError::Conflict(format!(
            "Quote {id} has no approved cost to pay"
        ))
        .into());
    }

    let updated = QuoteRepo::mark_paid(&state.pool, &id)
        .await?
        .ok_or_else(|| quote_not_found(&id))?;

    tracing::info!(order_id = %id, "Quote marked paid");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /admin/board
// ---------------------------------------------------------------------------

/// All quotes grouped into one column per pipeline stage.
pub async fn get_board(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BoardColumn>>>> {
    let mut columns: Vec<BoardColumn> = OrderStatus::ALL
        .iter()
        .map(|&status| BoardColumn {
            status,
            label: status.label(),
            orders: Vec::new(),
        })
        .collect();

    for quote in QuoteRepo::list_all(&state.pool).await? {
        let status = quote.order_status()?;
        columns[status.position()].orders.push(quote);
    }

    Ok(Json(DataResponse { data: columns }))
}

// ---------------------------------------------------------------------------
// GET /admin/stats
// ---------------------------------------------------------------------------

/// Dashboard counters over every stored quote.
pub async fn get_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let summaries = QuoteRepo::list_all(&state.pool)
        .await?
        .iter()
        .map(Quote::summary)
        .collect::<Result<Vec<_>, CoreError>>()?;

    let stats = dashboard::compute_stats(summaries);
    Ok(Json(DataResponse { data: stats }))
}
