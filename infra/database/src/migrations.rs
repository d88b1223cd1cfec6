use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// A single schema revision shipped with the binary.
#[derive(Debug)]
pub(crate) struct Migration {
    pub key: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub(crate) const fn new(key: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { key, version, script }
    }

    fn checksum(&self) -> String {
        let digest = Sha256::digest(self.script.as_bytes());
        hex::encode(digest)
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            key: self.key.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

/// Ordered set of revisions applied to every fresh or upgraded datastore.
pub(crate) fn builtin_migrations() -> Vec<Migration> {
    vec![
        Migration::new("system", "0000", include_str!("../migrations/0000_system.surql")),
        Migration::new("catalog", "0001", include_str!("../migrations/0001_catalog.surql")),
        Migration::new("iam", "0002", include_str!("../migrations/0002_iam.surql")),
        Migration::new("audit", "0003", include_str!("../migrations/0003_audit.surql")),
    ]
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub key: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let migrations = builtin_migrations();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in migrations {
            if let Some(applied) =
                applied_migrations.get(&format!("{}:{}", migration.key, migration.version))
            {
                ensure_checksum_match(&migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration SET key = $key, version = $version, checksum = $checksum;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("key", migration.key))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}:{}", migration.key, migration.version))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration rejected at {}:{}", migration.key, migration.version))?;

        Ok(())
    }

    async fn is_system_ready(&self) -> Result<bool, DatabaseError> {
        let mut response = self
            .db
            .query("!(SELECT VALUE fields FROM ONLY INFO FOR TABLE migration).is_empty()")
            .await
            .context("Checking if migration ledger exists")?;

        let is_ready = response.take::<Option<bool>>(0)?.unwrap_or_default();
        Ok(is_ready)
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let is_ready = self.is_system_ready().await?;

        if !is_ready {
            return Ok(FxHashMap::default());
        }

        let entries = self
            .db
            .query("SELECT key, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migrations map")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.key, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let checksum = migration.checksum();
    if existing != checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {}:{} (expected {existing}, got {checksum})",
                migration.key, migration.version
            )
            .into(),
            context: Some("Migration already applied with different checksum".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_migrations_are_ordered_and_unique() {
        let migrations = builtin_migrations();
        assert!(!migrations.is_empty());

        let mut versions: Vec<_> = migrations.iter().map(|m| m.version).collect();
        let sorted = {
            let mut v = versions.clone();
            v.sort_unstable();
            v
        };
        assert_eq!(versions, sorted);
        versions.dedup();
        assert_eq!(versions.len(), migrations.len());
    }

    #[test]
    fn checksum_is_stable_hex_sha256() {
        let migration = Migration::new("system", "0000", "DEFINE TABLE migration SCHEMAFULL;");
        let first = migration.checksum();
        let second = migration.checksum();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
