//! Property-based tests for todo input rules and pagination
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;
use todoboard::shared::todo::{normalize_tags, total_pages, validate_title};
use todoboard::shared::Pagination;

proptest! {
    #[test]
    fn test_valid_title_is_trimmed(
        lead in "[ \t]{0,3}",
        body in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}[a-zA-Z0-9]",
        trail in "[ \t]{0,3}",
    ) {
        prop_assume!(body != "undefined");
        let raw = format!("{lead}{body}{trail}");
        let title = validate_title(Some(&raw)).unwrap();
        prop_assert_eq!(title, body);
    }

    #[test]
    fn test_blank_title_rejected(blank in "[ \t\n]{1,10}") {
        prop_assert!(validate_title(Some(&blank)).is_err());
    }

    #[test]
    fn test_normalized_tags_are_clean(raw in prop::collection::vec("[ a-c]{0,4}", 0..12)) {
        let tags = normalize_tags(&raw);

        for (i, tag) in tags.iter().enumerate() {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.trim(), tag.as_str());
            prop_assert!(!tags[..i].contains(tag));
        }
        // Every non-blank input survives in some form
        for value in &raw {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                prop_assert!(tags.iter().any(|tag| tag == trimmed));
            }
        }
        prop_assert_eq!(normalize_tags(&tags), tags);
    }

    #[test]
    fn test_total_pages_covers_count(count in 0u64..10_000, limit in 1u32..=100) {
        let pages = total_pages(count, limit);
        let limit = u64::from(limit);

        prop_assert!(pages * limit >= count);
        if count > 0 {
            prop_assert!((pages - 1) * limit < count);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn test_pagination_echoes_inputs(page in 1u32..1000, limit in 1u32..=100, count in 0u64..10_000) {
        let pagination = Pagination::new(page, limit, count);
        prop_assert_eq!(pagination.page, page);
        prop_assert_eq!(pagination.limit, limit);
        prop_assert_eq!(pagination.total_count, count);
        prop_assert_eq!(pagination.total_pages, total_pages(count, limit));
    }
}
