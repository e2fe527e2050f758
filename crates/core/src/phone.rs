//! Philippine mobile number handling.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

pub const PHONE_ERROR_MESSAGE: &str =
    "Please enter a valid Philippine mobile number (11 digits starting with 09).";

static PH_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09[0-9]{9}$").expect("valid regex"));

/// Remove the formatting customers commonly type: whitespace, `-`, `(`, `)`, `+`.
pub fn clean_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '+'))
        .collect()
}

/// `09` followed by exactly nine ASCII digits.
pub fn is_valid_ph_phone(phone: &str) -> bool {
    PH_PHONE_RE.is_match(phone)
}

/// SHA-256 hex digest of the cleaned phone, used for lookups without
/// exposing the number.
pub fn hash_phone(phone: &str) -> String {
    let hash = Sha256::digest(phone.as_bytes());
    format!("{hash:x}")
}

/// Mask a phone for logs and customer-facing views: `0917****567`.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 7 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}****{tail}")
}
