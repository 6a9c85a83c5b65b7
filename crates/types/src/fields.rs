//! Pure field sanitization and validation helpers.
//!
//! These functions are applied on every input event by the form controllers,
//! so they must be side-effect free and cheap. Character classes are checked
//! directly rather than through a regex engine.

/// Length of a report reference token.
pub const REPORT_REF_LEN: usize = 20;

/// Sanitizes a patient-name input value.
///
/// Strips everything except Latin letters and whitespace, collapses runs of
/// whitespace to a single space, and drops leading whitespace. The result
/// contains only ASCII letters and single interior/trailing spaces and never
/// begins with a space.
pub fn sanitize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphabetic() {
            out.push(ch);
        } else if ch.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out
}

/// Returns true if `input` is a valid patient name.
///
/// Valid means: after trimming, one or more whitespace-separated alphabetic
/// tokens with a total trimmed length of at least two characters.
pub fn is_valid_name(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.len() >= 2
        && trimmed
            .split_whitespace()
            .all(|token| token.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Returns true if `input` coerces to a whole number between 0 and 120.
///
/// Empty, fractional, and out-of-range values are all invalid.
pub fn is_valid_age(input: &str) -> bool {
    match input.trim().parse::<i64>() {
        Ok(value) => (0..=120).contains(&value),
        Err(_) => false,
    }
}

/// Normalizes a report reference input value.
///
/// Uppercases, strips every character outside `[A-Z0-9]`, and truncates to
/// [`REPORT_REF_LEN`] characters.
pub fn normalize_ref(input: &str) -> String {
    input
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(REPORT_REF_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name_strips_non_letters() {
        assert_eq!(sanitize_name("Jo3hn D0e!"), "John Doe");
        assert_eq!(sanitize_name("Ann-Marie"), "AnnMarie");
        assert_eq!(sanitize_name("1234"), "");
    }

    #[test]
    fn test_sanitize_name_collapses_whitespace() {
        assert_eq!(sanitize_name("Ann   Lee"), "Ann Lee");
        assert_eq!(sanitize_name("Ann\t\nLee"), "Ann Lee");
    }

    #[test]
    fn test_sanitize_name_strips_leading_whitespace() {
        assert_eq!(sanitize_name("   Ann"), "Ann");
        assert_eq!(sanitize_name(" 9 Ann"), "Ann");
    }

    #[test]
    fn test_sanitize_name_output_alphabet() {
        for input in ["  J@ne   d'Arc 3rd  ", "\t\tx", "a  b  c", "Ann Lee "] {
            let out = sanitize_name(input);
            assert!(!out.starts_with(' '), "output begins with space: {out:?}");
            assert!(
                out.chars().all(|c| c.is_ascii_alphabetic() || c == ' '),
                "unexpected character in {out:?}"
            );
            assert!(!out.contains("  "), "run of spaces in {out:?}");
        }
    }

    #[test]
    fn test_is_valid_name_accepts_multi_token_names() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("Ann Lee"));
        assert!(is_valid_name("Jean Paul Gaultier"));
        assert!(is_valid_name("  Ann Lee  "));
    }

    #[test]
    fn test_is_valid_name_rejects_short_and_non_alphabetic() {
        assert!(!is_valid_name("J"));
        assert!(!is_valid_name("Jo3"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("Ann-Lee"));
    }

    #[test]
    fn test_is_valid_age_bounds() {
        assert!(is_valid_age("0"));
        assert!(is_valid_age("120"));
        assert!(!is_valid_age("121"));
        assert!(!is_valid_age("-1"));
    }

    #[test]
    fn test_is_valid_age_rejects_non_integers() {
        assert!(!is_valid_age(""));
        assert!(!is_valid_age("3.5"));
        assert!(!is_valid_age("abc"));
        assert!(!is_valid_age("12a"));
    }

    #[test]
    fn test_normalize_ref_uppercases_and_strips() {
        assert_eq!(normalize_ref("ab-12 cd!"), "AB12CD");
        assert_eq!(normalize_ref("abcdefghij1234567890"), "ABCDEFGHIJ1234567890");
    }

    #[test]
    fn test_normalize_ref_truncates_to_twenty() {
        let long = "A1".repeat(30);
        assert_eq!(normalize_ref(&long).len(), REPORT_REF_LEN);
    }
}
