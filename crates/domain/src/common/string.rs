//! String conversion utilities.

/// Converts a blank (empty or whitespace-only) string to `None`.
///
/// Form inputs arrive as empty strings when the visitor has not typed
/// anything yet; those fields count as "not entered".
///
/// # Examples
///
/// ```
/// use magnetiq_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("hello"), Some("hello"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
