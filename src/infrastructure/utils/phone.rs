use crate::constants::NO_PHONE_PLACEHOLDER;

/// Strips non-digit characters and formats exactly-10-digit numbers as
/// `XXX-XXX-XXXX`. Anything else renders as the placeholder.
pub fn format_phone(raw: Option<&str>) -> String {
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.len() == 10 {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        NO_PHONE_PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_ten_digit_numbers() {
        assert_eq!(format_phone(Some("4045551234")), "404-555-1234");
    }

    #[test]
    fn strips_punctuation_before_formatting() {
        assert_eq!(format_phone(Some("(404) 555-1234")), "404-555-1234");
    }

    #[test]
    fn placeholder_for_missing_input() {
        assert_eq!(format_phone(None), "None Provided");
        assert_eq!(format_phone(Some("")), "None Provided");
    }

    #[test]
    fn placeholder_for_nine_digits() {
        assert_eq!(format_phone(Some("404555123")), "None Provided");
    }

    #[test]
    fn placeholder_for_eleven_digits() {
        assert_eq!(format_phone(Some("14045551234")), "None Provided");
    }

    #[test]
    fn placeholder_for_non_numeric_input() {
        assert_eq!(format_phone(Some("call me maybe")), "None Provided");
    }
}
