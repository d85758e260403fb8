//! Per-field validators and answer filters

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

/// A validator returns the user-facing message when the input is rejected
pub type Validator = fn(&str) -> Result<(), String>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,4}$").expect("email pattern compiles")
});

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("non-word pattern compiles"));

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_\s]+").expect("separator pattern compiles"));

/// Author name must contain something other than whitespace
pub fn validate_author_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Please enter your full name".to_string());
    }
    Ok(())
}

/// Simple `local@domain.tld` check, no RFC 5322 parsing
pub fn validate_email(input: &str) -> Result<(), String> {
    if EMAIL_PATTERN.is_match(input) {
        Ok(())
    } else {
        Err("Please enter a valid email address".to_string())
    }
}

/// The slug of the library name becomes the package name, so it cannot be empty
pub fn validate_library_name(input: &str) -> Result<(), String> {
    if slugify(input).is_empty() {
        return Err("Library name must contain at least one letter or digit".to_string());
    }
    Ok(())
}

/// Scope is optional but must look like `@org` when present
pub fn validate_scope(input: &str) -> Result<(), String> {
    if input.is_empty() || input.starts_with('@') {
        Ok(())
    } else {
        Err("Scope must be empty or start with '@' (eg: @angular)".to_string())
    }
}

/// Convert arbitrary text into a kebab-case package name.
///
/// Accented letters are transliterated to ASCII, punctuation becomes a
/// separator, and runs of hyphens, underscores and whitespace collapse into a
/// single hyphen. Case changes are not word breaks: `ngxCharts` is `ngxcharts`.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input).to_lowercase();
    let dashed = NON_WORD.replace_all(&ascii, "-");
    let collapsed = SEPARATORS.replace_all(dashed.trim(), "-");
    collapsed.trim_matches('-').to_string()
}

/// Append the `/` separator so the scope can be prefixed to an import path as-is
pub fn normalize_scope(input: &str) -> String {
    if input.is_empty() {
        String::new()
    } else {
        format!("{}/", input)
    }
}
