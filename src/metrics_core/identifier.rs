//! Conversion between compact (`e01234`) and expanded (`10.7554/eLife.01234`) article identifiers

use super::error::MetricsError;

pub const DOI_PREFIX: &str = "10.7554/";
pub const JOURNAL_TAG: &str = "eLife.";
pub const COMPACT_TAG: &str = "e";

/// Number of digits in an article number
pub const ID_WIDTH: usize = 5;

const COMPACT_SHAPE: &str = "e followed by 5 digits";
const EXPANDED_SHAPE: &str = "10.7554/eLife. followed by 5 digits";

fn is_article_number(digits: &str) -> bool {
    digits.len() == ID_WIDTH && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Expand a compact identifier into the canonical aggregation key
///
/// `e12345` becomes `10.7554/eLife.12345`.
pub fn to_expanded(compact: &str) -> Result<String, MetricsError> {
    match compact.strip_prefix(COMPACT_TAG) {
        Some(digits) if is_article_number(digits) => {
            Ok(format!("{}{}{}", DOI_PREFIX, JOURNAL_TAG, digits))
        }
        _ => Err(MetricsError::MalformedIdentifier {
            input: compact.to_string(),
            expected: COMPACT_SHAPE,
        }),
    }
}

/// Reduce an expanded identifier to its compact form
///
/// `10.7554/eLife.12345` becomes `e12345`.
pub fn to_compact(expanded: &str) -> Result<String, MetricsError> {
    match expanded
        .strip_prefix(DOI_PREFIX)
        .and_then(|rest| rest.strip_prefix(JOURNAL_TAG))
    {
        Some(digits) if is_article_number(digits) => Ok(format!("{}{}", COMPACT_TAG, digits)),
        _ => Err(MetricsError::MalformedIdentifier {
            input: expanded.to_string(),
            expected: EXPANDED_SHAPE,
        }),
    }
}

/// Split a leading expanded identifier off `text`, ignoring case
///
/// Accepts both `10.7554/eLife.12345...` and the bare `eLife.12345...` form.
/// Returns the canonical expanded identifier and whatever follows it. The
/// remainder must be empty or begin with a `.` or `/` separator.
pub fn split_expanded_prefix(text: &str) -> Option<(String, &str)> {
    let rest = strip_prefix_ignore_case(text, DOI_PREFIX).unwrap_or(text);
    let rest = strip_prefix_ignore_case(rest, JOURNAL_TAG)?;
    let digits = rest.get(..ID_WIDTH)?;
    if !is_article_number(digits) {
        return None;
    }

    let remainder = &rest[ID_WIDTH..];
    if !(remainder.is_empty() || remainder.starts_with('.') || remainder.starts_with('/')) {
        return None;
    }

    Some((format!("{}{}{}", DOI_PREFIX, JOURNAL_TAG, digits), remainder))
}

pub(crate) fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_compact() {
        assert_eq!(to_expanded("e12345").unwrap(), "10.7554/eLife.12345");
        assert_eq!(to_expanded("e00011").unwrap(), "10.7554/eLife.00011");
    }

    #[test]
    fn test_compact_expanded() {
        assert_eq!(to_compact("10.7554/eLife.99999").unwrap(), "e99999");
        assert_eq!(to_compact("10.7554/eLife.00001").unwrap(), "e00001");
    }

    #[test]
    fn test_round_trip_both_directions() {
        for n in [0u32, 1, 42, 1234, 12345, 99999] {
            let compact = format!("e{:05}", n);
            assert_eq!(to_compact(&to_expanded(&compact).unwrap()).unwrap(), compact);

            let expanded = format!("10.7554/eLife.{:05}", n);
            assert_eq!(to_expanded(&to_compact(&expanded).unwrap()).unwrap(), expanded);
        }
    }

    #[test]
    fn test_malformed_compact() {
        let malformed = [
            "", "e", "e1234", "e123456", "E12345", "x12345", "e12a45", "12345", "e１２３４５",
        ];
        for bad in malformed {
            match to_expanded(bad) {
                Err(MetricsError::MalformedIdentifier { input, .. }) => assert_eq!(input, bad),
                other => panic!("expected MalformedIdentifier for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_malformed_expanded() {
        for bad in [
            "",
            "eLife.12345",
            "10.7554/elife.12345",
            "10.7554/eLife.1234",
            "10.7554/eLife.123456",
            "10.1000/eLife.12345",
            "10.7554/eLife.12345/abstract",
        ] {
            assert!(
                matches!(to_compact(bad), Err(MetricsError::MalformedIdentifier { .. })),
                "expected failure for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_split_expanded_prefix() {
        let (id, rest) = split_expanded_prefix("10.7554/eLife.99999/abstract-2").unwrap();
        assert_eq!(id, "10.7554/eLife.99999");
        assert_eq!(rest, "/abstract-2");

        let (id, rest) = split_expanded_prefix("ELIFE.00011").unwrap();
        assert_eq!(id, "10.7554/eLife.00011");
        assert_eq!(rest, "");

        assert!(split_expanded_prefix("10.7554/eLife.123456").is_none());
        assert!(split_expanded_prefix("10.7554/eLife.12").is_none());
        assert!(split_expanded_prefix("e12345").is_none());
    }
}
