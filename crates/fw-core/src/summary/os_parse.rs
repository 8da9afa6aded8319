//! OS description parsing.
//!
//! The inventory service reports an endpoint's operating system as a
//! single display string shaped like `"Windows Server 2019 (10.0.17763)"`.
//! That format is an assumption about upstream data, so it lives behind
//! this one parser; strings that do not match drop only the OS dimension
//! of the summary, never the whole endpoint.

use regex::Regex;

/// Parses `"<name> (<version>)"` OS description strings.
#[derive(Debug)]
pub(crate) struct OsDescriptionParser {
    pattern: Regex,
}

impl OsDescriptionParser {
    pub fn new() -> Self {
        // Version chars are restricted to alphanumerics and dots; the name
        // is whatever precedes the parenthesized version.
        let pattern = Regex::new(r"(?i)^([^(]*)\(([a-z0-9.]+)\)\s*$")
            .expect("Invalid OS description pattern");
        Self { pattern }
    }

    /// Returns the trimmed name/version pair, or `None` when the string
    /// does not match the expected format.
    pub fn parse(&self, raw: &str) -> Option<(String, String)> {
        let captures = self.pattern.captures(raw)?;
        let name = captures.get(1)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let version = captures.get(2)?.as_str().trim();
        Some((name.to_string(), version.to_string()))
    }
}

impl Default for OsDescriptionParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_windows_style_description() {
        let parser = OsDescriptionParser::new();
        assert_eq!(
            parser.parse("Windows (10.0.19041)"),
            Some(("Windows".to_string(), "10.0.19041".to_string()))
        );
    }

    #[test]
    fn test_trims_name_and_allows_multi_word_names() {
        let parser = OsDescriptionParser::new();
        assert_eq!(
            parser.parse("  Windows Server 2019  (10.0.17763)"),
            Some(("Windows Server 2019".to_string(), "10.0.17763".to_string()))
        );
    }

    #[test]
    fn test_version_may_be_alphanumeric() {
        let parser = OsDescriptionParser::new();
        assert_eq!(
            parser.parse("Ubuntu (22.04LTS)"),
            Some(("Ubuntu".to_string(), "22.04LTS".to_string()))
        );
    }

    #[test]
    fn test_rejects_unexpected_formats() {
        let parser = OsDescriptionParser::new();
        assert_eq!(parser.parse("Windows 10"), None);
        assert_eq!(parser.parse("Windows (build 19041)"), None);
        assert_eq!(parser.parse("(10.0.19041)"), None);
        assert_eq!(parser.parse(""), None);
    }

    #[test]
    fn test_rejects_trailing_text_after_version() {
        let parser = OsDescriptionParser::new();
        assert_eq!(parser.parse("Windows (10.0.19041) Pro"), None);
    }
}
