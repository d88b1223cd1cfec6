use machex_kernel::slug::{DEFAULT_SEPARATOR, slugify, slugify_with};
use proptest::prelude::*;

#[test]
fn known_inputs_map_to_expected_slugs() {
    assert_eq!(slugify("Héllo World!!"), "hello-world");
    assert_eq!(slugify("Precision Lathe 200"), "precision-lathe-200");
    assert_eq!(slugify("CNC/Mill #3"), "cnc-mill-3");
    assert_eq!(slugify(""), "-");
}

proptest! {
    /// Every produced slug stays inside `[a-z0-9]` plus the separator.
    #[test]
    fn output_charset_is_closed(input in ".*") {
        let slug = slugify(&input);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == DEFAULT_SEPARATOR));
    }

    /// Slugs are never empty and never start or end with the separator,
    /// except for the degenerate single-separator slug.
    #[test]
    fn no_edge_separators(input in ".*") {
        let slug = slugify(&input);
        prop_assert!(!slug.is_empty());
        if slug != DEFAULT_SEPARATOR.to_string() {
            prop_assert!(!slug.starts_with(DEFAULT_SEPARATOR));
            prop_assert!(!slug.ends_with(DEFAULT_SEPARATOR));
        }
    }

    /// Separator runs always collapse to a single character.
    #[test]
    fn no_double_separators(input in ".*") {
        let slug = slugify(&input);
        let doubled: String = [DEFAULT_SEPARATOR, DEFAULT_SEPARATOR].iter().collect();
        prop_assert!(!slug.contains(&doubled));
    }

    /// Applying the transform twice changes nothing.
    #[test]
    fn idempotent(input in ".*") {
        let slug = slugify(&input);
        prop_assert_eq!(slugify(&slug), slug);
    }

    /// Custom separators honor the same closure and edge rules.
    #[test]
    fn custom_separator_properties(input in ".*") {
        let slug = slugify_with(&input, '_');
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!slug.contains("__"));
    }
}
