//! Class-name to identifier conversion.

use regex::Regex;
use std::sync::OnceLock;

struct CasePatterns {
    word: Regex,
    separators: Regex,
    boundary: Regex,
}

fn patterns() -> &'static CasePatterns {
    static PATTERNS: OnceLock<CasePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| CasePatterns {
        word: Regex::new(r"(.)([A-Z][a-z]+)").expect("Invalid regex pattern"),
        separators: Regex::new(r"[.\-]").expect("Invalid regex pattern"),
        boundary: Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid regex pattern"),
    })
}

/// Turn a camel-case class name into a snake-case identifier.
///
/// Capitalised words are split off with `-`, dots and dashes become `_`,
/// remaining lower-to-upper boundaries get a `-`, and the result is
/// lower-cased. Acronyms therefore keep a dash on one side:
///
/// ```rust
/// use mlutilz::utils::snake_case_id;
///
/// assert_eq!(snake_case_id("CamelCase"), "camel_case");
/// assert_eq!(snake_case_id("getHTTPResponse"), "get-http_response");
/// ```
pub fn snake_case_id(name: &str) -> String {
    let p = patterns();
    let name = p.word.replace_all(name, "${1}-${2}");
    let name = p.separators.replace_all(&name, "_");
    let name = p.boundary.replace_all(&name, "${1}-${2}");
    name.to_lowercase()
}
