//! Property-based tests for query encoding and page decoding.
//!
//! This module uses proptest to verify:
//! - Only set, non-zero options produce query parameters
//! - `since` survives the round trip through its RFC 3339 form
//! - Generated pages decode with the advertised item count and order

use proptest::prelude::*;
use tfe_client::endpoints::query::{
    PARAM_PAGE_NUMBER, PARAM_PAGE_SIZE, PARAM_SINCE, audit_trail_query,
};
use tfe_client::testing::generators::AuditEventGenerator;
use tfe_client::{AuditEventList, AuditTrailReadOptions};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Whole-second instants between 1970 and 2100.
fn instant() -> impl Strategy<Value = OffsetDateTime> {
    (0i64..4_102_444_800).prop_map(|secs| {
        OffsetDateTime::from_unix_timestamp(secs).expect("timestamp in range")
    })
}

proptest! {
    /// # Invariants Tested
    /// - Each key appears at most once and only when its value is set and non-zero
    /// - Keys keep the order since, page[number], page[size]
    #[test]
    fn test_only_set_values_are_encoded(
        since in proptest::option::of(instant()),
        page_number in proptest::option::of(0u32..1_000),
        page_size in proptest::option::of(0u32..200),
    ) {
        let mut options = AuditTrailReadOptions::new();
        options.since = since;
        options.list_options.page_number = page_number;
        options.list_options.page_size = page_size;

        let pairs = audit_trail_query(&options).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();

        let mut expected = Vec::new();
        if since.is_some() {
            expected.push(PARAM_SINCE);
        }
        if page_number.is_some_and(|n| n > 0) {
            expected.push(PARAM_PAGE_NUMBER);
        }
        if page_size.is_some_and(|n| n > 0) {
            expected.push(PARAM_PAGE_SIZE);
        }
        prop_assert_eq!(keys, expected);
    }

    /// `since` parses back to the same instant.
    #[test]
    fn test_since_round_trips(since in instant()) {
        let pairs = audit_trail_query(&AuditTrailReadOptions::new().since(since)).unwrap();
        prop_assert_eq!(pairs.len(), 1);
        let parsed = OffsetDateTime::parse(&pairs[0].1, &Rfc3339).unwrap();
        prop_assert_eq!(parsed, since);
        prop_assert!(pairs[0].1.ends_with('Z'));
    }

    /// # Invariants Tested
    /// - Every page decodes and holds `min(page_size, remaining)` events
    /// - Events keep generator order across pages
    /// - Only the last page reports no next page
    #[test]
    fn test_generated_pages_decode_in_order(
        (count, page_size) in (0usize..120, 1usize..40)
    ) {
        let generator = AuditEventGenerator::new().with_count(count);
        let total_pages = count.div_ceil(page_size).max(1);

        let mut seen = 0;
        for page in 1..=total_pages {
            let list: AuditEventList =
                serde_json::from_value(generator.page(page, page_size)).unwrap();
            prop_assert_eq!(list.items.len(), page_size.min(count - seen));
            for event in &list.items {
                prop_assert_eq!(&event.id, &AuditEventGenerator::event_id(seen));
                seen += 1;
            }
            prop_assert_eq!(list.pagination.has_next_page(), page < total_pages);
        }
        prop_assert_eq!(seen, count);
    }
}
