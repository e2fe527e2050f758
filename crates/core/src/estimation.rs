//! Cost estimation.
//!
//! `estimate = area (m²) × base rate × glass multiplier × frame multiplier`,
//! rounded to centavos. The server always recomputes this figure; a cost
//! sent by the browser is never stored.

use serde::Serialize;

use crate::catalog;
use crate::measurement::{area_sqm, round2, to_meters, MeasurementUnit};

/// Inputs and result of a single estimate, returned to the wizard so it can
/// show the breakdown next to the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    pub area_sqm: f64,
    pub base_rate: f64,
    pub glass_multiplier: f64,
    pub frame_multiplier: f64,
    pub estimated_cost: f64,
}

/// Apply the cost formula to canonical meter dimensions.
///
/// Non-finite or negative inputs yield `0.0` rather than a nonsense figure.
pub fn estimate_cost(
    width_m: f64,
    height_m: f64,
    base_rate: f64,
    glass_multiplier: f64,
    frame_multiplier: f64,
) -> f64 {
    let cost = area_sqm(width_m, height_m) * base_rate * glass_multiplier * frame_multiplier;
    if cost.is_finite() && cost > 0.0 {
        round2(cost)
    } else {
        0.0
    }
}

/// Resolve catalog factors for the submitted selections and estimate.
pub fn estimate_quote(
    category: &str,
    glass_type: &str,
    frame_material: &str,
    width: f64,
    height: f64,
    unit: MeasurementUnit,
) -> CostEstimate {
    let width_m = to_meters(width, unit);
    let height_m = to_meters(height, unit);
    let base_rate = catalog::base_rate_for(category);
    let glass_multiplier = catalog::glass_multiplier_for(glass_type);
    let frame_multiplier = catalog::frame_multiplier_for(frame_material);

    let area = area_sqm(width_m, height_m);

    CostEstimate {
        area_sqm: if area.is_finite() && area > 0.0 { round2(area) } else { 0.0 },
        base_rate,
        glass_multiplier,
        frame_multiplier,
        estimated_cost: estimate_cost(
            width_m,
            height_m,
            base_rate,
            glass_multiplier,
            frame_multiplier,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_multiplies_all_factors() {
        // 1.2m × 1.5m = 1.8 m² × 1800 × 1.25 × 1.3
        assert_eq!(estimate_cost(1.2, 1.5, 1800.0, 1.25, 1.3), 5265.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(estimate_cost(1.0, 1.0, 1100.0, 1.35, 1.0), 1485.0);
        assert_eq!(estimate_cost(0.333, 1.0, 1000.0, 1.0, 1.0), 333.0);
        assert_eq!(estimate_cost(0.12345, 1.0, 1.0, 1.0, 1.0), 0.12);
    }

    #[test]
    fn invalid_inputs_estimate_zero() {
        assert_eq!(estimate_cost(f64::NAN, 1.0, 1200.0, 1.0, 1.0), 0.0);
        assert_eq!(estimate_cost(-1.0, 1.0, 1200.0, 1.0, 1.0), 0.0);
        assert_eq!(estimate_cost(0.0, 1.0, 1200.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn estimate_quote_resolves_labels() {
        let est = estimate_quote(
            "Storefront",
            "Bronze Glass",
            "Steel Frame",
            120.0,
            150.0,
            MeasurementUnit::Cm,
        );
        assert_eq!(est.area_sqm, 1.8);
        assert_eq!(est.base_rate, 1800.0);
        assert_eq!(est.glass_multiplier, 1.25);
        assert_eq!(est.frame_multiplier, 1.3);
        assert_eq!(est.estimated_cost, 5265.0);
    }

    #[test]
    fn estimate_quote_falls_back_for_other_selections() {
        let est = estimate_quote(
            "Other: Skylight",
            "Other: Low-E coated 8mm",
            "Aluminum Frame",
            2.0,
            1.0,
            MeasurementUnit::M,
        );
        assert_eq!(est.base_rate, 1200.0);
        assert_eq!(est.glass_multiplier, 1.0);
        assert_eq!(est.estimated_cost, 2400.0);
    }
}
