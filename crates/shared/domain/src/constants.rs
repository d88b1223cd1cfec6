//! String constants shared across slices.

/// Catalog segment used when an item carries no category slug.
pub const FALLBACK_CATEGORY_SLUG: &str = "machinery";

/// Path segment separating the language code from the catalog tree.
pub const CATALOG_SEGMENT: &str = "catalog";

// Entity table names.
pub const ITEM: &str = "item";
pub const OPERATOR: &str = "operator";
pub const SESSION: &str = "session";
pub const AUDIT: &str = "audit";

// Operator role names.
pub const ADMIN: &str = "admin";
pub const EDITOR: &str = "editor";
pub const VIEWER: &str = "viewer";

// OpenAPI tags.
pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
pub const IAM_TAG: &str = "IAM";
