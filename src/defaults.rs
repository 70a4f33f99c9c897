//! Fallback values for every optional payload input, kept in one place.

/// Primary brand color used when the payload does not provide a usable one.
pub const PRIMARY_COLOR: &str = "#2f8f83";

/// Language used when the payload does not name one.
pub const LANGUAGE: &str = "en";

/// Left header cell text shown when no logo file is available.
pub const LOGO_LABEL: &str = "Fund Manager";

/// Right header cell text shown when `header_text` is missing or empty.
pub const HEADER_TEXT: &str = "KYC Submission Summary";

/// Cell text for a field without a value.
pub const EMPTY_VALUE: &str = "-";

/// Blank line printed where a signature goes.
pub const SIGNATURE_LINE: &str = "____________________";

/// Signature rows used when the branding lists none.
pub const SIGNATURES: [(&str, &str); 2] = [
    ("GP Approval", SIGNATURE_LINE),
    ("Compliance", SIGNATURE_LINE),
];

/// Returns `value` when present and accepted by `is_usable`, otherwise `default`.
///
/// Every silent fallback in the builders goes through this helper so the accepted
/// shapes of each optional input can be read off the call sites.
pub fn resolve_with_default<T, F>(value: Option<T>, default: T, is_usable: F) -> T
where
    F: FnOnce(&T) -> bool,
{
    match value {
        Some(value) if is_usable(&value) => value,
        _ => default,
    }
}

/// Predicate for text values that must not be blank.
pub fn non_empty(value: &&str) -> bool {
    !value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_usable_values() {
        assert_eq!(resolve_with_default(Some("Acme"), HEADER_TEXT, non_empty), "Acme");
    }

    #[test]
    fn substitutes_missing_or_rejected_values() {
        assert_eq!(resolve_with_default(None, HEADER_TEXT, non_empty), HEADER_TEXT);
        assert_eq!(resolve_with_default(Some(""), HEADER_TEXT, non_empty), HEADER_TEXT);
        assert_eq!(
            resolve_with_default(Some(vec![1]), Vec::new(), |v: &Vec<i32>| v.len() > 1),
            Vec::<i32>::new()
        );
    }
}
