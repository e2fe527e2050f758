//! Installation crew scheduling.
//!
//! A single crew handles installations, so two orders in the
//! `installation` stage cannot share a scheduled date.

use crate::quote_status::OrderStatus;
use crate::types::Date;

/// PostgreSQL advisory lock ID serializing installation bookings.
pub const INSTALLATION_SCHEDULE_LOCK_ID: i64 = 604_221_907;

/// The scheduling-relevant view of an existing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledOrder {
    pub id: String,
    pub status: OrderStatus,
    pub scheduled_date: Option<Date>,
}

/// Find an order that would clash with moving `order_id` into `target`
/// on `scheduled_date`.
///
/// Only moves into `installation` with a date can conflict, and an order
/// never conflicts with itself.
pub fn find_installation_conflict<'a>(
    order_id: &str,
    target: OrderStatus,
    scheduled_date: Option<Date>,
    others: &'a [ScheduledOrder],
) -> Option<&'a ScheduledOrder> {
    if target != OrderStatus::Installation {
        return None;
    }
    let date = scheduled_date?;
    others.iter().find(|o| {
        o.id != order_id
            && o.status == OrderStatus::Installation
            && o.scheduled_date == Some(date)
    })
}
