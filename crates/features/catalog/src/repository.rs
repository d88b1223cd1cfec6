use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::{Item, NewItem, PathFields, UpdateItem};
use crate::resolver::LegacyLookup;
use machex_database::Database;
use machex_kernel::domain::constants::ITEM;
use machex_kernel::safe_nanoid;
use machex_kernel::security::resource::ResourceGuard;
use machex_kernel::slug::slugify_with;
use tracing::instrument;

const ITEM_PROJECTION: &str = "id.id() AS id, display_name, slug, category_slug, description";

/// Datastore access for catalog entries.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: Database,
    separator: char,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(db: Database, separator: char) -> Self {
        Self { db, separator }
    }

    /// Creates a catalog entry with a freshly generated key and derived slug.
    ///
    /// The slug is always derived through normalization, even when the caller
    /// supplies an explicit override, so stored slugs stay URL-safe.
    ///
    /// # Errors
    /// * [`CatalogError::Validation`] if the display name is empty.
    /// * [`CatalogError::Conflict`] if the derived slug is already taken.
    #[instrument(skip(self, new))]
    pub async fn create(&self, new: NewItem) -> Result<Item, CatalogError> {
        if new.display_name.trim().is_empty() {
            return Err(CatalogError::Validation {
                message: "Display name must not be empty".into(),
                context: None,
            });
        }

        let slug_source = new.slug_override.as_deref().unwrap_or(&new.display_name);
        let slug = slugify_with(slug_source, self.separator);
        let category_slug = new.category.as_deref().map(|c| slugify_with(c, self.separator));
        let key = safe_nanoid!();

        self.db
            .query(
                "CREATE type::thing($table, $key) SET
                    display_name = $display_name,
                    slug = $slug,
                    category_slug = $category_slug,
                    description = $description",
            )
            .bind(("table", ITEM))
            .bind(("key", key.clone()))
            .bind(("display_name", new.display_name.clone()))
            .bind(("slug", slug.clone()))
            .bind(("category_slug", category_slug.clone()))
            .bind(("description", new.description.clone()))
            .await
            .context("Creating catalog entry")?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(map_index_conflict)?;

        Ok(Item {
            id: key,
            display_name: new.display_name,
            slug,
            category_slug,
            description: new.description,
        })
    }

    /// Fetches a single entry by its record key.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] if no entry exists under the key.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Item, CatalogError> {
        let full_id = ResourceGuard::verify(key, ITEM).map_err(|e| CatalogError::Validation {
            message: e.to_string().into(),
            context: None,
        })?;
        let key = full_id.split_once(':').map_or(full_id.as_str(), |(_, k)| k).to_owned();

        let item = self
            .db
            .query(format!("SELECT {ITEM_PROJECTION} FROM ONLY type::thing($table, $key)"))
            .bind(("table", ITEM))
            .bind(("key", key.clone()))
            .await
            .context("Fetching catalog entry")?
            .take::<Option<Item>>(0)
            .context("Parsing catalog entry")?;

        item.ok_or_else(|| CatalogError::NotFound { message: key.into(), context: None })
    }

    /// Lists all entries ordered by display name.
    ///
    /// # Errors
    /// Propagates datastore failures.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        self.db
            .query(format!("SELECT {ITEM_PROJECTION} FROM item ORDER BY display_name"))
            .await
            .context("Listing catalog entries")?
            .take::<Vec<Item>>(0)
            .context("Parsing catalog entries")
    }

    /// Applies a partial update and keeps the slug consistent.
    ///
    /// A renamed entry without an explicit override gets its slug recomputed
    /// from the new display name; an override always wins (normalized).
    ///
    /// # Errors
    /// * [`CatalogError::NotFound`] if the entry does not exist.
    /// * [`CatalogError::Conflict`] if the resulting slug is already taken.
    #[instrument(skip(self, update))]
    pub async fn update(&self, key: &str, update: UpdateItem) -> Result<Item, CatalogError> {
        let current = self.get(key).await?;

        let display_name = update.display_name.unwrap_or_else(|| current.display_name.clone());
        if display_name.trim().is_empty() {
            return Err(CatalogError::Validation {
                message: "Display name must not be empty".into(),
                context: None,
            });
        }

        let slug = match update.slug_override.as_deref() {
            Some(source) => slugify_with(source, self.separator),
            None if display_name != current.display_name => {
                slugify_with(&display_name, self.separator)
            },
            None => current.slug.clone(),
        };
        let category_slug = match update.category.as_deref() {
            Some(category) => Some(slugify_with(category, self.separator)),
            None => current.category_slug.clone(),
        };
        let description = update.description.or_else(|| current.description.clone());

        self.db
            .query(
                "UPDATE type::thing($table, $key) SET
                    display_name = $display_name,
                    slug = $slug,
                    category_slug = $category_slug,
                    description = $description,
                    updated_at = time::now()",
            )
            .bind(("table", ITEM))
            .bind(("key", current.id.clone()))
            .bind(("display_name", display_name.clone()))
            .bind(("slug", slug.clone()))
            .bind(("category_slug", category_slug.clone()))
            .bind(("description", description.clone()))
            .await
            .context("Updating catalog entry")?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(map_index_conflict)?;

        Ok(Item { id: current.id, display_name, slug, category_slug, description })
    }

    /// Deletes an entry, returning its last state for event publication.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] if the entry does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<Item, CatalogError> {
        let current = self.get(key).await?;

        self.db
            .query("DELETE type::thing($table, $key)")
            .bind(("table", ITEM))
            .bind(("key", current.id.clone()))
            .await
            .context("Deleting catalog entry")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Deleting catalog entry")?;

        Ok(current)
    }
}

impl LegacyLookup for CatalogRepository {
    /// Single projected lookup used by legacy path resolution.
    async fn find_path_fields(&self, identifier: &str) -> Result<Option<PathFields>, CatalogError> {
        self.db
            .query("SELECT slug, category_slug FROM ONLY type::thing($table, $key)")
            .bind(("table", ITEM))
            .bind(("key", identifier.to_owned()))
            .await
            .context("Resolving legacy identifier")?
            .take::<Option<PathFields>>(0)
            .context("Parsing path fields")
    }
}

/// The unique slug index rejects duplicates; everything else passes through.
fn map_index_conflict(err: surrealdb::Error) -> CatalogError {
    let text = err.to_string();
    if text.contains("item_slug_idx") {
        CatalogError::Conflict {
            message: "An entry with this slug already exists".into(),
            context: None,
        }
    } else {
        CatalogError::Surreal { source: err, context: None }
    }
}
