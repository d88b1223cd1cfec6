use surrealdb::types::SurrealValue;

/// Read model for a catalog entry.
///
/// The `id` carries only the random record key, not the `item:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct Item {
    pub id: String,
    pub display_name: String,
    pub slug: String,
    pub category_slug: Option<String>,
    pub description: Option<String>,
}

/// Fields needed to build a new catalog entry.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub display_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Free-form slug source overriding the display name. Still normalized.
    pub slug_override: Option<String>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub slug_override: Option<String>,
}

/// Projection used by path resolution: the only two fields a redirect needs.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct PathFields {
    pub slug: Option<String>,
    pub category_slug: Option<String>,
}
