//! Human-readable order identifiers (`EGA-2026-123`).

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

/// Prefix shared by every order id.
pub const ORDER_ID_PREFIX: &str = "EGA";
/// Attempts before giving up on finding an unused id.
pub const MAX_ID_ATTEMPTS: usize = 5;

static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EGA-[0-9]{4}-[0-9]{3}$").expect("valid regex"));

/// Generate an id with a random three-digit suffix in `100..=999`.
pub fn generate_order_id(year: i32) -> String {
    let suffix: u16 = rand::rng().random_range(100..=999);
    format!("{ORDER_ID_PREFIX}-{year}-{suffix}")
}

pub fn is_valid_order_id(id: &str) -> bool {
    ORDER_ID_RE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed() {
        for _ in 0..200 {
            let id = generate_order_id(2026);
            assert!(is_valid_order_id(&id), "malformed id {id}");
            let suffix: u16 = id.rsplit('-').next().unwrap().parse().unwrap();
            assert!((100..=999).contains(&suffix));
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(is_valid_order_id("EGA-2026-001"));
        assert!(!is_valid_order_id("EGA-2026-1"));
        assert!(!is_valid_order_id("ABC-2026-123"));
        assert!(!is_valid_order_id("EGA-26-123"));
        assert!(!is_valid_order_id(""));
        assert!(!is_valid_order_id("EGA-2026-\u{0661}\u{0662}\u{0663}"));
    }
}
