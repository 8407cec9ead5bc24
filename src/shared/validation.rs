use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for decimal coordinates submitted as text
    /// Anything it accepts also parses as `f64`
    /// - Valid: "-23.5505", "46", "+0.5", ".25", "1e-3"
    /// - Invalid: "", "abc", "12,5", "1.2.3", " 10", "NaN"
    pub static ref COORDINATE_REGEX: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_regex_valid() {
        assert!(COORDINATE_REGEX.is_match("-23.5505"));
        assert!(COORDINATE_REGEX.is_match("46"));
        assert!(COORDINATE_REGEX.is_match("+0.5"));
        assert!(COORDINATE_REGEX.is_match(".25"));
        assert!(COORDINATE_REGEX.is_match("10."));
        assert!(COORDINATE_REGEX.is_match("1e-3"));
    }

    #[test]
    fn test_coordinate_regex_invalid() {
        assert!(!COORDINATE_REGEX.is_match(""));
        assert!(!COORDINATE_REGEX.is_match("abc"));
        assert!(!COORDINATE_REGEX.is_match("12,5"));
        assert!(!COORDINATE_REGEX.is_match("1.2.3"));
        assert!(!COORDINATE_REGEX.is_match(" 10"));
        assert!(!COORDINATE_REGEX.is_match("NaN"));
        assert!(!COORDINATE_REGEX.is_match("-"));
    }
}
