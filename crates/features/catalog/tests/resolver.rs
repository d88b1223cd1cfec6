use machex_catalog::CatalogError;
use machex_catalog::model::PathFields;
use machex_catalog::resolver::{LegacyLookup, resolve_canonical_path};
use machex_kernel::domain::locale::Locale;
use std::sync::atomic::{AtomicUsize, Ordering};

const KNOWN_KEY: &str = "2Qx7mKp9RtWz";

struct CountingLookup {
    calls: AtomicUsize,
    result: Option<PathFields>,
}

impl CountingLookup {
    fn returning(result: Option<PathFields>) -> Self {
        Self { calls: AtomicUsize::new(0), result }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LegacyLookup for CountingLookup {
    async fn find_path_fields(&self, _identifier: &str) -> Result<Option<PathFields>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

struct FailingLookup;

impl LegacyLookup for FailingLookup {
    async fn find_path_fields(&self, _identifier: &str) -> Result<Option<PathFields>, CatalogError> {
        Err(CatalogError::Internal { message: "store unreachable".into(), context: None })
    }
}

#[tokio::test]
async fn known_entry_resolves_to_its_canonical_path() {
    let lookup = CountingLookup::returning(Some(PathFields {
        slug: Some("lathe-200".to_owned()),
        category_slug: Some("metalworking".to_owned()),
    }));

    let path = resolve_canonical_path(&lookup, Locale::EN, KNOWN_KEY).await.expect("resolved");
    assert_eq!(path, "/en/catalog/metalworking/lathe-200");
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn missing_category_falls_back_to_machinery() {
    let lookup = CountingLookup::returning(Some(PathFields {
        slug: Some("press-40".to_owned()),
        category_slug: None,
    }));

    let path = resolve_canonical_path(&lookup, Locale::EN, KNOWN_KEY).await.expect("resolved");
    assert_eq!(path, "/en/catalog/machinery/press-40");
}

#[tokio::test]
async fn missing_slug_falls_back_to_the_raw_identifier() {
    let lookup = CountingLookup::returning(Some(PathFields {
        slug: None,
        category_slug: Some("metalworking".to_owned()),
    }));

    let path = resolve_canonical_path(&lookup, Locale::EN, KNOWN_KEY).await.expect("resolved");
    assert_eq!(path, format!("/en/catalog/metalworking/{KNOWN_KEY}"));
}

#[tokio::test]
async fn malformed_identifiers_never_reach_the_store() {
    for identifier in ["", "short", "way-too-long-for-a-key", "2Qx7mKp9RtW0", "item:2Qx7mKp9"] {
        let lookup = CountingLookup::returning(Some(PathFields {
            slug: Some("never".to_owned()),
            category_slug: None,
        }));

        let path =
            resolve_canonical_path(&lookup, Locale::EN, identifier).await.expect("resolved");
        assert_eq!(path, "/en/catalog", "identifier {identifier:?} should collapse");
        assert_eq!(lookup.calls(), 0, "identifier {identifier:?} should skip the lookup");
    }
}

#[tokio::test]
async fn unknown_identifiers_cost_exactly_one_lookup() {
    let lookup = CountingLookup::returning(None);

    let path = resolve_canonical_path(&lookup, Locale::EN, KNOWN_KEY).await.expect("resolved");
    assert_eq!(path, "/en/catalog");
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn store_failures_propagate_instead_of_collapsing() {
    let result = resolve_canonical_path(&FailingLookup, Locale::EN, KNOWN_KEY).await;
    assert!(matches!(result, Err(CatalogError::Internal { .. })));
}

#[tokio::test]
async fn language_code_flows_into_the_path() {
    let lookup = CountingLookup::returning(None);
    let uk: Locale = "uk".parse().expect("valid code");

    let path = resolve_canonical_path(&lookup, uk, "junk").await.expect("resolved");
    assert_eq!(path, "/uk/catalog");
    assert_eq!(lookup.calls(), 0);
}
