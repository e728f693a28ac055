//! Input validation
//!
//! Pure predicates run before any request is sent.

/// Characters allowed in a resource identifier besides ASCII letters and digits
const ID_PUNCTUATION: &[char] = &['-', '.', '_'];

/// Check that a required string is present and non-empty
pub fn valid_string(v: Option<&str>) -> bool {
    matches!(v, Some(s) if !s.is_empty())
}

/// Check that a string is a typical resource identifier:
/// one or more of `[A-Za-z0-9\-._]`
pub fn valid_string_id(v: &str) -> bool {
    !v.is_empty()
        && v
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ID_PUNCTUATION.contains(&c))
}

/// Check that a required value is present
pub fn not_none<T>(v: &Option<T>) -> bool {
    v.is_some()
}
