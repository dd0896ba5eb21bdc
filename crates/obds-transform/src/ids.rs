//! Identifier conversion for registry patient numbers.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{trace, warn};

use crate::redact::redact_value;

/// Nine digits not starting with `0`.
static NINE_DIGIT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[1-9]\d{8}").expect("identifier pattern is valid"));

/// Extracts the first nine-digit number without a leading `0`.
///
/// Identifiers without such a number are returned unchanged and a warning is
/// logged; the result is usable either way.
pub fn convert_id(id: &str) -> String {
    if let Some(found) = NINE_DIGIT_ID.find(id) {
        return found.as_str().to_string();
    }
    warn!(
        id_len = id.len(),
        "identifier to convert does not have 9 digits without leading '0'"
    );
    trace!(identifier = redact_value(id), "unconverted identifier");
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_zero_padding() {
        assert_eq!(convert_id("000123456789"), "123456789");
        assert_eq!(convert_id("123456789"), "123456789");
    }

    #[test]
    fn takes_first_match() {
        assert_eq!(convert_id("PAT-987654321-123456789"), "987654321");
    }

    #[test]
    fn short_or_zero_led_ids_pass_through() {
        assert_eq!(convert_id("12345"), "12345");
        assert_eq!(convert_id("012345678"), "012345678");
        assert_eq!(convert_id(""), "");
    }

    #[test]
    fn letter_before_eight_digits_is_not_an_id() {
        // Only digits form an id; a leading letter is never part of the match.
        assert_eq!(convert_id("AB12345678"), "AB12345678");
        assert_eq!(convert_id("AB123456789"), "123456789");
    }
}
