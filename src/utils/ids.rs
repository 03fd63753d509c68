use crate::error::{Error, Result};

/// Integer id from user input. Leading whitespace and a sign are accepted and
/// parsing stops at the first non-digit, so `"42abc"` is 42. Returns `None`
/// when no digits lead the input.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Reference id carried by a draft or patch; unlike path ids an unreadable
/// reference is a request error.
pub fn parse_reference(field: &str, raw: &str) -> Result<i64> {
    parse_record_id(raw)
        .ok_or_else(|| Error::BadRequest(format!("Invalid {}: {:?}", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_like_integer_parsing() {
        assert_eq!(parse_record_id("42"), Some(42));
        assert_eq!(parse_record_id("  7"), Some(7));
        assert_eq!(parse_record_id("42abc"), Some(42));
        assert_eq!(parse_record_id("-3"), Some(-3));
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id(""), None);
    }

    #[test]
    fn reference_errors_name_the_field() {
        let err = parse_reference("jobId", "x").unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Invalid jobId: \"x\"");
    }
}
