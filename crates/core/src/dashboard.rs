//! Admin dashboard counters and customer payment eligibility.

use serde::Serialize;

use crate::quote_status::OrderStatus;

/// The subset of an order the dashboard counters look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub status: OrderStatus,
    pub approved_cost: Option<f64>,
    pub paid: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub new_inquiries: i64,
    pub active_projects: i64,
    pub completed: i64,
    pub awaiting_payment: i64,
}

pub fn compute_stats<I>(orders: I) -> DashboardStats
where
    I: IntoIterator<Item = OrderSummary>,
{
    orders
        .into_iter()
        .fold(DashboardStats::default(), |mut stats, order| {
            match order.status {
                OrderStatus::Inquiry => {
                    stats.new_inquiries += 1;
                    stats.active_projects += 1;
                }
                OrderStatus::Installation => stats.completed += 1,
                _ => stats.active_projects += 1,
            }
            if order.approved_cost.is_some() && !order.paid {
                stats.awaiting_payment += 1;
            }
            stats
        })
}

/// A customer may pay once the admin approved a price, until either the
/// payment is confirmed or a proof has been uploaded.
pub fn can_pay(approved_cost: Option<f64>, paid: bool, payment_uploaded: bool) -> bool {
    approved_cost.is_some_and(|c| c > 0.0) && !paid && !payment_uploaded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(status: OrderStatus, approved_cost: Option<f64>, paid: bool) -> OrderSummary {
        OrderSummary {
            status,
            approved_cost,
            paid,
        }
    }

    #[test]
    fn counts_each_bucket() {
        let stats = compute_stats([
            summary(OrderStatus::Inquiry, Some(44_500.0), false),
            summary(OrderStatus::Quotation, Some(27_500.0), false),
            summary(OrderStatus::Fabrication, Some(34_800.0), true),
            summary(OrderStatus::Installation, Some(17_800.0), true),
            summary(OrderStatus::Inquiry, None, false),
        ]);
        assert_eq!(
            stats,
            DashboardStats {
                new_inquiries: 2,
                active_projects: 4,
                completed: 1,
                awaiting_payment: 2,
            }
        );
    }

    #[test]
    fn empty_board_is_all_zero() {
        assert_eq!(compute_stats(Vec::new()), DashboardStats::default());
    }

    #[test]
    fn payment_requires_approved_unpaid_order() {
        assert!(can_pay(Some(17_800.0), false, false));
        assert!(!can_pay(None, false, false));
        assert!(!can_pay(Some(17_800.0), true, false));
        assert!(!can_pay(Some(17_800.0), false, true));
    }
}
