pub mod listing_filter;
pub mod sort_parser;

pub use listing_filter::{FlagFilter, ListingFilter, ListingQuery, PriceRange, TypeFilter};
pub use sort_parser::{SortField, SortOrder, SortSpec};

/// Parse the leading integer of a string the way browsers' `parseInt` does:
/// leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Returns `None` when no digit is found or the value overflows.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        seen_digit = true;
        value = value.checked_mul(10)?.checked_add(i64::from(digit))?;
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::parse_int_prefix;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("9"), Some(9));
        assert_eq!(parse_int_prefix("  42"), Some(42));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }
}
