//! Input validation and sanitization helpers.
//!
//! Every free-text field is passed through `sanitize_text` before it
//! reaches the store; truncation is silent by design.

use uuid::Uuid;

use crate::error::{AppError, Result};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_CITY_LEN: usize = 120;
pub const MAX_COUNTRY_LEN: usize = 120;
pub const MAX_ADDRESS_LEN: usize = 300;
pub const MAX_REVIEW_LEN: usize = 2000;
pub const MAX_NOTES_LEN: usize = 2000;
pub const MAX_CAPTION_LEN: usize = 300;
pub const MAX_NOTE_LEN: usize = 500;
pub const MAX_URL_LEN: usize = 500;
pub const MAX_DAY_LABEL_LEN: usize = 100;

/// Trim, strip ASCII control characters, and truncate to `max_chars`
/// (counted in chars, so multi-byte input cannot be split mid-character).
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect();

    if cleaned.chars().count() <= max_chars {
        cleaned
    } else {
        cleaned.chars().take(max_chars).collect()
    }
}

/// Sanitize an optional field, collapsing empty results to `None`.
pub fn optional_text(input: Option<&str>, max_chars: usize) -> Option<String> {
    let cleaned = sanitize_text(input?, max_chars);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Parse a UUID from route or form input.
pub fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid id", raw.trim())))
}

/// Ratings are whole stars from 1 to 5.
pub fn validate_rating(rating: i32) -> Result<i32> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

/// Expense amounts must be finite and strictly positive.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(AppError::Validation(
            "Amount must be greater than zero".to_string(),
        ))
    }
}

/// Dedup key for artist and venue names: trimmed + lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_and_strips_controls() {
        assert_eq!(sanitize_text("  Teatro\x07 Colón\n", 200), "Teatro Colón");
    }

    #[test]
    fn sanitize_truncates_on_char_boundary() {
        // 4 chars, each multi-byte; must not panic on a byte boundary
        assert_eq!(sanitize_text("ééééé", 4), "éééé");
        assert_eq!(sanitize_text("abcdef", 3), "abc");
    }

    #[test]
    fn optional_text_collapses_empty_to_none() {
        assert_eq!(optional_text(Some("   "), 100), None);
        assert_eq!(optional_text(None, 100), None);
        assert_eq!(optional_text(Some(" x "), 100), Some("x".to_string()));
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn amount_rejects_zero_negative_and_nan() {
        assert!(validate_amount(10.5).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-3.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_uuid(" 6c0a6f70-9f0e-4a59-93c5-0f6c9f0e4a59 ").is_ok());
    }

    #[test]
    fn normalize_name_is_case_insensitive_key() {
        assert_eq!(normalize_name("  Teatro Y "), normalize_name("TEATRO Y"));
    }
}
