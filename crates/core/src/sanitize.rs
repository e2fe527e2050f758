//! Free-text sanitisation and length rules.
//!
//! Every string that reaches the database passes through [`sanitize_text`]
//! first. Lengths are counted in characters, not bytes, so addresses with
//! `ñ` are measured the way the customer typed them.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum sanitized length of a delivery / installation address.
pub const ADDRESS_MIN_LENGTH: usize = 10;
/// Maximum sanitized length of an "Other – please specify" answer.
pub const OTHER_MAX_LENGTH: usize = 150;

pub const ADDRESS_ERROR_MESSAGE: &str =
    "Please enter a complete address (minimum 10 characters).";

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Remove every `<...>` tag, keeping the text between tags.
pub fn strip_html_tags(input: &str) -> String {
    HTML_TAG_RE.replace_all(input, "").into_owned()
}

/// Trim surrounding whitespace, then strip HTML tags.
pub fn sanitize_text(input: &str) -> String {
    strip_html_tags(input.trim())
}

/// Double single quotes for contexts that interpolate into SQL text.
///
/// Queries are parameterized; this is only for log lines and exports.
pub fn escape_for_db(input: &str) -> String {
    input.replace('\'', "''")
}

pub fn is_valid_address(address: &str) -> bool {
    sanitize_text(address).chars().count() >= ADDRESS_MIN_LENGTH
}

/// An "Other" answer must be non-empty and at most 150 characters.
pub fn is_valid_other(value: &str) -> bool {
    let len = sanitize_text(value).chars().count();
    len > 0 && len <= OTHER_MAX_LENGTH
}

/// Sanitize an "Other" answer and truncate it to 150 characters.
pub fn sanitize_other(value: &str) -> String {
    sanitize_text(value).chars().take(OTHER_MAX_LENGTH).collect()
}
