//! Order pipeline stages and transition rules.
//!
//! Orders move through five fixed stages. The admin board may move an order
//! one stage forward or one stage back; skipping stages is rejected. An
//! update that keeps the stage must change the scheduled date.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Inquiry,
    Quotation,
    Ordering,
    Fabrication,
    Installation,
}

impl OrderStatus {
    /// Pipeline order, first to last.
    pub const ALL: [OrderStatus; 5] = [
        Self::Inquiry,
        Self::Quotation,
        Self::Ordering,
        Self::Fabrication,
        Self::Installation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inquiry => "inquiry",
            Self::Quotation => "quotation",
            Self::Ordering => "ordering",
            Self::Fabrication => "fabrication",
            Self::Installation => "installation",
        }
    }

    /// Kanban column heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inquiry => "Inquiry Received",
            Self::Quotation => "Quotation Drafting",
            Self::Ordering => "Ordering Materials",
            Self::Fabrication => "Fabrication",
            Self::Installation => "Installation",
        }
    }

    /// Customer-facing explanation of the stage.
    pub fn description(self) -> &'static str {
        match self {
            Self::Inquiry => "We received your request and will review it shortly.",
            Self::Quotation => "Our team is preparing your detailed quotation.",
            Self::Ordering => "Materials for your project are being ordered.",
            Self::Fabrication => "Your glass and frames are being fabricated in our shop.",
            Self::Installation => "Your project is scheduled for installation.",
        }
    }

    /// Zero-based position in the pipeline.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.position().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Stages reachable from this one.
    pub fn valid_transitions(self) -> Vec<Self> {
        [self.previous(), self.next()].into_iter().flatten().collect()
    }

    pub fn can_transition(self, to: Self) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid order status '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// Validate a stage move requested by the admin board.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), CoreError> {
    if from == to {
        return Err(CoreError::Validation(format!(
            "Order is already in '{from}'"
        )));
    }
    if from.can_transition(to) {
        Ok(())
    } else {
        let allowed: Vec<&str> = from
            .valid_transitions()
            .into_iter()
            .map(OrderStatus::as_str)
            .collect();
        Err(CoreError::Validation(format!(
            "Cannot move order from '{from}' to '{to}'. Allowed: {}",
            allowed.join(", ")
        )))
    }
}

/// Validate an admin status update that may also reschedule the order.
///
/// Keeping the current stage is allowed when the update changes the
/// scheduled date; otherwise the move must be a valid transition.
pub fn validate_status_update(
    from: OrderStatus,
    to: OrderStatus,
    reschedules: bool,
) -> Result<(), CoreError> {
    if from == to && reschedules {
        return Ok(());
    }
    validate_transition(from, to)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use OrderStatus::*;

    #[test]
    fn round_trips_through_strings() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!("shipped".parse::<OrderStatus>(), Err(CoreError::Validation(_)));
        assert_matches!("".parse::<OrderStatus>(), Err(CoreError::Validation(_)));
        assert_matches!("Inquiry".parse::<OrderStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn pipeline_neighbours() {
        assert_eq!(Inquiry.previous(), None);
        assert_eq!(Inquiry.next(), Some(Quotation));
        assert_eq!(Fabrication.next(), Some(Installation));
        assert_eq!(Installation.next(), None);
        assert_eq!(Installation.previous(), Some(Fabrication));
    }

    #[test]
    fn adjacent_moves_are_allowed() {
        assert!(validate_transition(Inquiry, Quotation).is_ok());
        assert!(validate_transition(Ordering, Quotation).is_ok());
        assert!(validate_transition(Fabrication, Installation).is_ok());
        assert!(validate_transition(Installation, Fabrication).is_ok());
    }

    #[test]
    fn skipping_stages_is_rejected() {
        assert_matches!(
            validate_transition(Inquiry, Fabrication),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(Installation, Inquiry),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn same_stage_move_is_rejected() {
        assert_matches!(
            validate_transition(Ordering, Ordering),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn same_stage_update_is_allowed_only_to_reschedule() {
        assert!(validate_status_update(Installation, Installation, true).is_ok());
        assert_matches!(
            validate_status_update(Installation, Installation, false),
            Err(CoreError::Validation(_))
        );
        assert!(validate_status_update(Fabrication, Installation, true).is_ok());
        assert_matches!(
            validate_status_update(Inquiry, Installation, true),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Fabrication).unwrap(), "\"fabrication\"");
    }
}
