//! Query parameter encoding for list endpoints.
//!
//! Options are turned into ordered `(key, value)` pairs; the caller decides
//! whether to attach them. Absent and zero values never produce a pair, so an
//! all-default options value encodes to nothing.

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{ClientError, Result};
use crate::models::{AuditTrailReadOptions, ListOptions};

pub const PARAM_SINCE: &str = "since";
pub const PARAM_PAGE_NUMBER: &str = "page[number]";
pub const PARAM_PAGE_SIZE: &str = "page[size]";

/// Append `page[number]` and `page[size]` when set and non-zero.
pub fn push_list_options(pairs: &mut Vec<(&'static str, String)>, options: &ListOptions) {
    if let Some(number) = options.page_number.filter(|n| *n > 0) {
        pairs.push((PARAM_PAGE_NUMBER, number.to_string()));
    }
    if let Some(size) = options.page_size.filter(|n| *n > 0) {
        pairs.push((PARAM_PAGE_SIZE, size.to_string()));
    }
}

/// Encode audit-trail read options.
///
/// # Errors
/// Returns [`ClientError::QueryEncoding`] when `since` has no RFC 3339
/// representation (years outside 0..=9999).
pub fn audit_trail_query(options: &AuditTrailReadOptions) -> Result<Vec<(&'static str, String)>> {
    let mut pairs = Vec::with_capacity(3);
    if let Some(since) = options.since {
        pairs.push((PARAM_SINCE, format_timestamp(since)?));
    }
    push_list_options(&mut pairs, &options.list_options);
    Ok(pairs)
}

/// Format an instant as RFC 3339 in UTC with whole-second precision.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String> {
    instant
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| ClientError::QueryEncoding(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| ClientError::QueryEncoding(format!("since: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::{Date, Month};

    #[test]
    fn test_default_options_encode_to_nothing() {
        let pairs = audit_trail_query(&AuditTrailReadOptions::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_full_options_order() {
        let options = AuditTrailReadOptions::new()
            .since(datetime!(2024-06-01 12:30:45.123 UTC))
            .page_number(3)
            .page_size(20);
        let pairs = audit_trail_query(&options).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("since", "2024-06-01T12:30:45Z".to_string()),
                ("page[number]", "3".to_string()),
                ("page[size]", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_since_is_normalized_to_utc() {
        let since = datetime!(2024-06-01 14:00 +02:00);
        assert_eq!(format_timestamp(since).unwrap(), "2024-06-01T12:00:00Z");
    }

    #[test]
    fn test_zero_page_values_are_omitted() {
        let options = AuditTrailReadOptions::new().page_number(0).page_size(0);
        assert!(audit_trail_query(&options).unwrap().is_empty());
    }

    #[test]
    fn test_unrepresentable_since_is_a_query_error() {
        let since = Date::from_calendar_date(-1, Month::January, 1)
            .unwrap()
            .midnight()
            .assume_utc();
        let err = audit_trail_query(&AuditTrailReadOptions::new().since(since)).unwrap_err();
        assert!(matches!(err, ClientError::QueryEncoding(_)));
    }
}
