use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating UF codes (two-letter state abbreviation)
    /// - Valid: "SP", "RJ", "AC"
    /// - Invalid: "sp" (pre-normalization), "S", "SPX", "S1", ""
    pub static ref UF_REGEX: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
}

/// Trim a raw name field into canonical form. Absent fields become empty.
pub fn normalize_name(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_string()
}

/// Trim and uppercase a raw UF field into canonical form.
pub fn normalize_uf(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_uppercase()
}

/// Parse a path id as a base-10 integer. Non-numeric input yields `None`
/// rather than an error so callers decide the failure mapping.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uf_regex_valid() {
        assert!(UF_REGEX.is_match("SP"));
        assert!(UF_REGEX.is_match("RJ"));
        assert!(UF_REGEX.is_match("AC"));
    }

    #[test]
    fn test_uf_regex_invalid() {
        assert!(!UF_REGEX.is_match("sp")); // lowercase
        assert!(!UF_REGEX.is_match("S")); // too short
        assert!(!UF_REGEX.is_match("SPX")); // too long
        assert!(!UF_REGEX.is_match("S1")); // digit
        assert!(!UF_REGEX.is_match("")); // empty
        assert!(!UF_REGEX.is_match(" SP")); // untrimmed
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(Some("  Campinas ")), "Campinas");
        assert_eq!(normalize_name(Some("Campinas")), "Campinas");
        assert_eq!(normalize_name(Some("   ")), "");
        assert_eq!(normalize_name(None), "");
    }

    #[test]
    fn test_normalize_uf() {
        assert_eq!(normalize_uf(Some(" sp ")), "SP");
        assert_eq!(normalize_uf(Some("Rj")), "RJ");
        assert_eq!(normalize_uf(None), "");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("-1"), Some(-1));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("12abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id(""), None);
    }
}
