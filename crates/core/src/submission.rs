//! Server-side validation of a quote submission.
//!
//! The wizard validates as the customer types, but the API re-checks every
//! field. All problems are collected so the customer sees them at once,
//! joined into a single message.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::catalog;
use crate::error::CoreError;
use crate::estimation::{estimate_quote, CostEstimate};
use crate::measurement::{
    all_units_from_meters, is_valid_measurement, to_meters, MeasurementUnit, UnitValues,
};
use crate::phone::{clean_phone, hash_phone, is_valid_ph_phone, PHONE_ERROR_MESSAGE};
use crate::sanitize::{
    is_valid_address, is_valid_other, sanitize_other, sanitize_text, ADDRESS_ERROR_MESSAGE,
};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const CATEGORY_REQUIRED: &str = "Project category is required.";
pub const CATEGORY_OTHER_REQUIRED: &str = "Please specify the \"Other\" project category.";
pub const GLASS_REQUIRED: &str = "Glass type is required.";
pub const GLASS_OTHER_REQUIRED: &str = "Please specify the \"Other\" glass type.";
pub const COLOR_OTHER_REQUIRED: &str = "Please specify the \"Other\" color.";
pub const MATERIAL_REQUIRED: &str = "Frame material is required.";
pub const WIDTH_INVALID: &str = "Width must be a positive number (max 100m).";
pub const HEIGHT_INVALID: &str = "Height must be a positive number (max 100m).";
pub const CUSTOMER_REQUIRED: &str = "Customer name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";

// ---------------------------------------------------------------------------
// Loose numbers
// ---------------------------------------------------------------------------

static NUMERIC_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?").expect("valid regex")
});

/// A dimension as typed into a form: a JSON number, a string, or any other
/// JSON value, which never reads as a number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    /// Read the leading number, `NaN` when there is none.
    ///
    /// `"120"`, `" 120 "` and `"120cm"` all read as `120`.
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => NUMERIC_PREFIX_RE
                .find(s.trim())
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(f64::NAN),
            Self::Other(_) => f64::NAN,
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

fn loose_value(n: &Option<LooseNumber>) -> f64 {
    n.as_ref().map_or(f64::NAN, LooseNumber::value)
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Raw quote submission as posted by the quotation wizard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub customer: Option<String>,
    pub email: Option<String>,
    pub project: Option<String>,
    pub project_category_other: Option<String>,
    pub glass_type: Option<String>,
    pub glass_type_other: Option<String>,
    pub color: Option<String>,
    pub color_other: Option<String>,
    pub material: Option<String>,
    pub measurement_unit: Option<String>,
    pub width: Option<LooseNumber>,
    pub height: Option<LooseNumber>,
    /// Unmasked phone; preferred over `phone`, which the wizard masks.
    #[serde(rename = "phone_plain")]
    pub phone_plain: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A submission that passed every check, with canonical values computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuote {
    pub customer: String,
    pub email: String,
    pub project: String,
    pub project_category_other: Option<String>,
    pub glass_type: String,
    pub glass_type_other: Option<String>,
    pub color: Option<String>,
    pub color_other: Option<String>,
    pub material: String,
    pub unit: MeasurementUnit,
    pub width: UnitValues,
    pub height: UnitValues,
    /// Dimensions as the customer entered them, e.g. `120cm × 150cm`.
    pub dimensions: String,
    pub phone: String,
    pub phone_hash: String,
    pub address: String,
    pub notes: Option<String>,
    pub estimate: CostEstimate,
}

fn sanitized(field: &Option<String>) -> String {
    field.as_deref().map(sanitize_text).unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Check an "Other" selection, returning the sanitized answer.
///
/// Pushes `message` when the selection is "Other" but the answer is
/// missing or invalid.
fn other_answer(
    selection: &str,
    answer: &Option<String>,
    message: &'static str,
    errors: &mut Vec<&'static str>,
) -> Option<String> {
    if !catalog::is_other(selection) {
        return None;
    }
    let cleaned = answer.as_deref().map(sanitize_other).unwrap_or_default();
    if !is_valid_other(&cleaned) {
        errors.push(message);
        return None;
    }
    Some(cleaned)
}

/// Validate a raw submission.
///
/// Returns [`CoreError::Validation`] carrying every failed check, joined by
/// a single space, in form order.
pub fn validate_submission(input: &QuoteSubmission) -> Result<ValidatedQuote, CoreError> {
    let mut errors: Vec<&'static str> = Vec::new();

    // Category
    let project = sanitized(&input.project);
    if project.is_empty() {
        errors.push(CATEGORY_REQUIRED);
    }
    let project_category_other = other_answer(
        &project,
        &input.project_category_other,
        CATEGORY_OTHER_REQUIRED,
        &mut errors,
    );

    // Glass type
    let glass_type = sanitized(&input.glass_type);
    if glass_type.is_empty() {
        errors.push(GLASS_REQUIRED);
    }
    let glass_type_other = other_answer(
        &glass_type,
        &input.glass_type_other,
        GLASS_OTHER_REQUIRED,
        &mut errors,
    );

    // Color (optional, but "Other" must be specified)
    let color = non_empty(sanitized(&input.color));
    let color_other = match &color {
        Some(c) => other_answer(c, &input.color_other, COLOR_OTHER_REQUIRED, &mut errors),
        None => input.color_other.as_deref().map(sanitize_other).and_then(non_empty),
    };

    // Frame material
    let material = sanitized(&input.material);
    if material.is_empty() {
        errors.push(MATERIAL_REQUIRED);
    }

    // Measurements
    let unit = MeasurementUnit::parse_or_default(input.measurement_unit.as_deref());
    let raw_width = loose_value(&input.width);
    let raw_height = loose_value(&input.height);
    if !is_valid_measurement(raw_width, unit) {
        errors.push(WIDTH_INVALID);
    }
    if !is_valid_measurement(raw_height, unit) {
        errors.push(HEIGHT_INVALID);
    }

    // Phone
    let raw_phone = input
        .phone_plain
        .as_deref()
        .filter(|p| !p.is_empty())
        .or(input.phone.as_deref())
        .unwrap_or_default();
    let phone = clean_phone(raw_phone);
    if !is_valid_ph_phone(&phone) {
        errors.push(PHONE_ERROR_MESSAGE);
    }

    // Address
    let address = sanitized(&input.address);
    if !is_valid_address(&address) {
        errors.push(ADDRESS_ERROR_MESSAGE);
    }

    // Name & email
    let customer = sanitized(&input.customer);
    if customer.is_empty() {
        errors.push(CUSTOMER_REQUIRED);
    }
    let email = sanitized(&input.email);
    if email.is_empty() {
        errors.push(EMAIL_REQUIRED);
    } else if !email.validate_email() {
        errors.push(EMAIL_INVALID);
    }

    if !errors.is_empty() {
        return Err(CoreError::Validation(errors.join(" ")));
    }

    let width_m = to_meters(raw_width, unit);
    let height_m = to_meters(raw_height, unit);
    let estimate = estimate_quote(&project, &glass_type, &material, raw_width, raw_height, unit);

    Ok(ValidatedQuote {
        dimensions: format!("{raw_width}{unit} × {raw_height}{unit}"),
        width: all_units_from_meters(width_m),
        height: all_units_from_meters(height_m),
        phone_hash: hash_phone(&phone),
        notes: non_empty(sanitized(&input.notes)),
        customer,
        email,
        project,
        project_category_other,
        glass_type,
        glass_type_other,
        color,
        color_other,
        material,
        unit,
        phone,
        address,
        estimate,
    })
}
