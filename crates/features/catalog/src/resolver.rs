//! Canonical-path resolution for legacy item links.
//!
//! Old deep links carry a raw record key (`/{lang}/item/{identifier}`); this
//! module maps them onto the canonical catalog tree with at most one
//! datastore round trip.

use crate::error::CatalogError;
use crate::model::PathFields;
use machex_kernel::domain::constants::{CATALOG_SEGMENT, FALLBACK_CATEGORY_SLUG};
use machex_kernel::domain::locale::Locale;
use machex_kernel::security::resource::ResourceGuard;
use tracing::debug;

/// Seam between path resolution and the datastore.
///
/// Production uses [`CatalogRepository`](crate::repository::CatalogRepository);
/// tests substitute a counting stub to pin down how often a resolution hits
/// the store.
pub trait LegacyLookup {
    /// Fetches only the path-relevant fields of one entry, or `None` when the
    /// identifier is unknown.
    fn find_path_fields(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<PathFields>, CatalogError>> + Send;
}

/// Builds the canonical path for a resolved entry.
#[must_use]
pub fn canonical_path(lang: Locale, category_slug: &str, slug: &str) -> String {
    format!("/{lang}/{CATALOG_SEGMENT}/{category_slug}/{slug}")
}

/// Builds the catalog listing path, the landing spot for unroutable links.
#[must_use]
pub fn listing_path(lang: Locale) -> String {
    format!("/{lang}/{CATALOG_SEGMENT}")
}

/// Resolves a legacy identifier to its canonical redirect target.
///
/// Identifiers that do not have the shape of a generated record key are
/// rejected before any lookup. Well-formed identifiers cost exactly one
/// projected lookup. Both malformed and unknown identifiers collapse to the
/// catalog listing so stale links degrade gracefully instead of erroring.
///
/// A known entry without a stored slug falls back to the raw identifier;
/// a missing category falls back to [`FALLBACK_CATEGORY_SLUG`].
///
/// # Errors
/// Datastore connectivity failures propagate untouched; only shape and
/// existence problems collapse to the listing path.
pub async fn resolve_canonical_path<L>(
    lookup: &L,
    lang: Locale,
    identifier: &str,
) -> Result<String, CatalogError>
where
    L: LegacyLookup + Sync,
{
    if !ResourceGuard::is_safe_key(identifier) {
        debug!(identifier, "Legacy identifier malformed, redirecting to listing");
        return Ok(listing_path(lang));
    }

    let Some(fields) = lookup.find_path_fields(identifier).await? else {
        debug!(identifier, "Legacy identifier unknown, redirecting to listing");
        return Ok(listing_path(lang));
    };

    let slug = fields.slug.unwrap_or_else(|| identifier.to_owned());
    let category_slug =
        fields.category_slug.unwrap_or_else(|| FALLBACK_CATEGORY_SLUG.to_owned());

    Ok(canonical_path(lang, &category_slug, &slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_catalog_layout() {
        let en = Locale::EN;
        assert_eq!(canonical_path(en, "metalworking", "lathe-200"), "/en/catalog/metalworking/lathe-200");
        assert_eq!(listing_path(en), "/en/catalog");

        let uk: Locale = "uk".parse().expect("valid code");
        assert_eq!(canonical_path(uk, "machinery", "press-40"), "/uk/catalog/machinery/press-40");
    }
}
