//! Quote / order entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ermel_core::dashboard::{self, OrderSummary};
use ermel_core::error::CoreError;
use ermel_core::quote_status::OrderStatus;
use ermel_core::scheduling::ScheduledOrder;
use ermel_core::types::{Date, Timestamp};

/// A row from the `quotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: String,
    pub customer: String,
    pub project: String,
    pub material: String,
    pub glass_type: String,
    pub dimensions: String,
    pub estimated_cost: f64,
    pub approved_cost: Option<f64>,
    pub status: String,
    pub created_date: Date,
    pub scheduled_date: Option<Date>,
    pub phone: String,
    #[serde(skip_serializing)]
    pub phone_hash: String,
    pub email: String,
    pub notes: Option<String>,
    pub paid: bool,
    pub payment_uploaded: bool,
    pub address: String,
    pub project_category_other: Option<String>,
    pub glass_type_other: Option<String>,
    pub color: Option<String>,
    pub color_other: Option<String>,
    pub measurement_unit: String,
    pub width_m: f64,
    pub height_m: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub width_ft: f64,
    pub height_ft: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quote {
    /// Parse the stored status. The table's CHECK constraint keeps this
    /// in the known set.
    pub fn order_status(&self) -> Result<OrderStatus, CoreError> {
        self.status.parse()
    }

    /// The price the customer is asked to pay: approved if set, else the
    /// estimate.
    pub fn display_cost(&self) -> f64 {
        self.approved_cost.unwrap_or(self.estimated_cost)
    }

    pub fn can_pay(&self) -> bool {
        dashboard::can_pay(self.approved_cost, self.paid, self.payment_uploaded)
    }

    pub fn summary(&self) -> Result<OrderSummary, CoreError> {
        Ok(OrderSummary {
            status: self.order_status()?,
            approved_cost: self.approved_cost,
            paid: self.paid,
        })
    }

    pub fn scheduling_view(&self) -> Result<ScheduledOrder, CoreError> {
        Ok(ScheduledOrder {
            id: self.id.clone(),
            status: self.order_status()?,
            scheduled_date: self.scheduled_date,
        })
    }
}

/// DTO for moving an order to another pipeline stage.
#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatus {
    pub status: String,
    /// New scheduled date; the stored date is kept when absent.
    pub scheduled_date: Option<Date>,
    /// Move into installation even when another installation shares the date.
    #[serde(default)]
    pub force: bool,
}

/// DTO for approving the final price.
#[derive(Debug, Deserialize)]
pub struct ApproveQuoteCost {
    pub approved_cost: f64,
}

/// Query parameters for listing quotes.
#[derive(Debug, Deserialize)]
pub struct QuoteListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
