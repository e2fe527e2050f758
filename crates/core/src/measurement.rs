//! Measurement units and conversions.
//!
//! All dimensions are stored canonically in meters. The wizard lets the
//! customer type centimeters, meters or feet, so every value is converted on
//! the way in and re-expanded into all three units for display and storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Meters per centimeter.
pub const METERS_PER_CM: f64 = 0.01;
/// Meters per international foot.
pub const METERS_PER_FT: f64 = 0.3048;
/// Largest accepted width or height, in meters.
pub const MAX_DIMENSION_METERS: f64 = 100.0;

// ---------------------------------------------------------------------------
// Unit enum
// ---------------------------------------------------------------------------

/// A length unit accepted by the quotation form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    #[default]
    Cm,
    M,
    Ft,
}

impl MeasurementUnit {
    pub const ALL: [MeasurementUnit; 3] = [Self::Cm, Self::M, Self::Ft];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cm => "cm",
            Self::M => "m",
            Self::Ft => "ft",
        }
    }

    /// Factor that converts a value in this unit to meters.
    fn to_meters_factor(self) -> f64 {
        match self {
            Self::Cm => METERS_PER_CM,
            Self::M => 1.0,
            Self::Ft => METERS_PER_FT,
        }
    }

    /// Factor that converts meters to this unit.
    fn from_meters_factor(self) -> f64 {
        match self {
            Self::Cm => 1.0 / METERS_PER_CM,
            Self::M => 1.0,
            Self::Ft => 1.0 / METERS_PER_FT,
        }
    }

    /// Parse a unit leniently, falling back to centimeters.
    ///
    /// The wizard defaults to `cm`, so an absent or unrecognised unit is
    /// treated the same way rather than rejected.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cm" => Ok(Self::Cm),
            "m" => Ok(Self::M),
            "ft" => Ok(Self::Ft),
            other => Err(CoreError::Validation(format!(
                "Unknown measurement unit '{other}'. Must be one of: cm, m, ft"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a value from `unit` to canonical meters.
pub fn to_meters(value: f64, unit: MeasurementUnit) -> f64 {
    value * unit.to_meters_factor()
}

/// Convert a meters value to the requested display unit.
pub fn from_meters(meters: f64, unit: MeasurementUnit) -> f64 {
    meters * unit.from_meters_factor()
}

/// Convert between any two supported units.
pub fn convert_unit(value: f64, from: MeasurementUnit, to: MeasurementUnit) -> f64 {
    if from == to {
        return value;
    }
    from_meters(to_meters(value, from), to)
}

/// The maximum allowed dimension expressed in `unit`.
pub fn max_in_unit(unit: MeasurementUnit) -> f64 {
    from_meters(MAX_DIMENSION_METERS, unit)
}

/// Validate a single width or height.
///
/// Rejects NaN, zero, negatives and anything above 100 m. Exactly 100 m
/// is accepted.
pub fn is_valid_measurement(value: f64, unit: MeasurementUnit) -> bool {
    if value.is_nan() || value <= 0.0 {
        return false;
    }
    let meters = to_meters(value, unit);
    meters > 0.0 && meters <= MAX_DIMENSION_METERS
}

/// Format a number with exactly two decimals.
pub fn fmt2(n: f64) -> String {
    format!("{n:.2}")
}

/// Round a number to two decimals.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// A length expressed in every supported unit, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitValues {
    pub m: f64,
    pub cm: f64,
    pub ft: f64,
}

/// Expand a canonical meters value into all display units.
pub fn all_units_from_meters(meters: f64) -> UnitValues {
    UnitValues {
        m: round2(meters),
        cm: round2(from_meters(meters, MeasurementUnit::Cm)),
        ft: round2(from_meters(meters, MeasurementUnit::Ft)),
    }
}

/// Opening area in square meters.
pub fn area_sqm(width_m: f64, height_m: f64) -> f64 {
    width_m * height_m
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use MeasurementUnit::{Cm, Ft, M};

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // -- conversions ---------------------------------------------------------

    #[test]
    fn cm_to_meters() {
        assert!(close(to_meters(100.0, Cm), 1.0, 1e-9));
        assert!(close(to_meters(120.0, Cm), 1.2, 1e-9));
        assert_eq!(to_meters(0.0, Cm), 0.0);
    }

    #[test]
    fn meters_to_cm() {
        assert!(close(from_meters(1.0, Cm), 100.0, 1e-9));
        assert!(close(from_meters(1.2, Cm), 120.0, 1e-9));
    }

    #[test]
    fn feet_and_meters() {
        assert!(close(to_meters(1.0, Ft), 0.3048, 1e-9));
        assert!(close(to_meters(10.0, Ft), 3.048, 1e-9));
        assert!(close(from_meters(0.3048, Ft), 1.0, 1e-9));
        assert!(close(from_meters(1.0, Ft), 3.2808, 1e-3));
    }

    #[test]
    fn cm_through_feet_returns_to_cm() {
        let in_m = convert_unit(120.0, Cm, M);
        assert!(close(in_m, 1.2, 1e-9));
        let in_ft = convert_unit(120.0, Cm, Ft);
        assert!(close(in_ft, 3.937, 1e-2));
        assert!(close(convert_unit(in_ft, Ft, Cm), 120.0, 1e-6));
    }

    #[test]
    fn feet_through_cm_returns_to_feet() {
        assert!(close(convert_unit(5.0, Ft, M), 1.524, 1e-9));
        let in_cm = convert_unit(5.0, Ft, Cm);
        assert!(close(in_cm, 152.4, 1e-9));
        assert!(close(convert_unit(in_cm, Cm, Ft), 5.0, 1e-9));
    }

    #[test]
    fn same_unit_conversion_is_identity() {
        assert_eq!(convert_unit(50.0, Cm, Cm), 50.0);
        assert_eq!(convert_unit(2.5, M, M), 2.5);
        assert_eq!(convert_unit(8.0, Ft, Ft), 8.0);
    }

    #[test]
    fn max_in_each_unit() {
        assert!(close(max_in_unit(Cm), 10_000.0, 1e-9));
        assert_eq!(max_in_unit(M), 100.0);
        assert!(close(max_in_unit(Ft), 328.084, 1e-3));
    }

    // -- formatting ----------------------------------------------------------

    #[test]
    fn fmt2_pads_and_rounds() {
        assert_eq!(fmt2(1.2), "1.20");
        assert_eq!(fmt2(0.0), "0.00");
        assert_eq!(fmt2(100.999), "101.00");
    }

    #[test]
    fn all_units_from_meters_expands_each_unit() {
        let v = all_units_from_meters(1.2);
        assert_eq!(v.m, 1.2);
        assert_eq!(v.cm, 120.0);
        assert_eq!(v.ft, 3.94);
    }

    // -- bounds --------------------------------------------------------------

    #[test]
    fn zero_and_negative_are_invalid() {
        for unit in MeasurementUnit::ALL {
            assert!(!is_valid_measurement(0.0, unit));
        }
        assert!(!is_valid_measurement(-10.0, Cm));
        assert!(!is_valid_measurement(-1.0, M));
    }

    #[test]
    fn above_one_hundred_meters_is_invalid() {
        assert!(!is_valid_measurement(10_001.0, Cm));
        assert!(!is_valid_measurement(101.0, M));
        assert!(!is_valid_measurement(329.0, Ft));
    }

    #[test]
    fn in_range_values_are_valid() {
        assert!(is_valid_measurement(120.0, Cm));
        assert!(is_valid_measurement(1.5, M));
        assert!(is_valid_measurement(10.0, Ft));
        assert!(is_valid_measurement(10_000.0, Cm));
        assert!(is_valid_measurement(100.0, M));
        assert!(is_valid_measurement(1.5, Cm));
        assert!(is_valid_measurement(0.01, M));
        assert!(is_valid_measurement(0.5, Ft));
    }

    #[test]
    fn nan_is_invalid() {
        assert!(!is_valid_measurement(f64::NAN, Cm));
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn unknown_unit_falls_back_to_cm() {
        assert_eq!(MeasurementUnit::parse_or_default(Some("in")), Cm);
        assert_eq!(MeasurementUnit::parse_or_default(None), Cm);
        assert_eq!(MeasurementUnit::parse_or_default(Some("ft")), Ft);
    }

    #[test]
    fn strict_parse_rejects_unknown_unit() {
        assert!("yd".parse::<MeasurementUnit>().is_err());
        assert_eq!("m".parse::<MeasurementUnit>().unwrap(), M);
    }
}
