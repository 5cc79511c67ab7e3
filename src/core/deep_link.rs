//! Deep Links
//!
//! Extracts an error code from the forms a user might paste: a bare code,
//! a `#CODE` fragment, an `/error/CODE` route, or a full URL with either.

/// Longest string accepted as a code.
const MAX_CODE_LEN: usize = 16;

/// Extract the error code a link points at, keeping the user's casing.
///
/// Returns `None` when the input does not name a plausible code.
pub fn parse(input: &str) -> Option<String> {
    let mut target = input.trim();

    if let Some((before, fragment)) = target.split_once('#') {
        target = if fragment.trim().is_empty() { before } else { fragment };
    }
    if let Some((path, _query)) = target.split_once('?') {
        target = path;
    }
    if let Some((_scheme, rest)) = target.split_once("://") {
        target = rest.find('/').map_or("", |slash| &rest[slash..]);
    }

    let segments: Vec<&str> = target
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let code = match segments.as_slice() {
        [single] => *single,
        _ => segments
            .windows(2)
            .rev()
            .find(|pair| pair[0].eq_ignore_ascii_case("error"))
            .map(|pair| pair[1])?,
    };

    is_plausible_code(code).then(|| code.to_string())
}

fn is_plausible_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Route path for a code, the inverse of [`parse`].
pub fn route_for(code: &str) -> String {
    format!("/error/{}", code.trim().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_forms() {
        assert_eq!(parse("AC04").as_deref(), Some("AC04"));
        assert_eq!(parse("  #AC04 ").as_deref(), Some("AC04"));
        assert_eq!(parse("/error/AC04").as_deref(), Some("AC04"));
        assert_eq!(parse("error/ac04").as_deref(), Some("ac04"));
        assert_eq!(
            parse("https://mx-errors.example.org/error/AM04?ref=mail").as_deref(),
            Some("AM04")
        );
        assert_eq!(parse("https://mx-errors.example.org/#RC01").as_deref(), Some("RC01"));
        assert_eq!(
            parse("https://mx-errors.example.org/#/error/be01").as_deref(),
            Some("be01")
        );
    }

    #[test]
    fn test_rejected_forms() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("#"), None);
        assert_eq!(parse("https://mx-errors.example.org/"), None);
        assert_eq!(parse("/glossary/iban"), None);
        assert_eq!(parse("not a code"), None);
        assert_eq!(parse("AC-04"), None);
    }

    #[test]
    fn test_route_round_trips() {
        assert_eq!(route_for(" ac04 "), "/error/AC04");
        assert_eq!(parse(&route_for("ac04")).as_deref(), Some("AC04"));
    }
}
