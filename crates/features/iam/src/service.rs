use crate::error::{IamError, IamErrorExt};
use crate::model::{OperatorProfile, OperatorRecord};
use machex_database::Database;
use machex_kernel::domain::config::SecurityConfig;
use machex_kernel::domain::constants::{ADMIN, OPERATOR, SESSION};
use machex_kernel::safe_nanoid;
use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Length of issued bearer tokens (stored only in hashed form).
const TOKEN_LEN: usize = 32;

const OPERATOR_PROJECTION: &str = "id.id() AS id, login, password_hash, roles";

/// Session issuance and verification backed by the datastore.
#[derive(Debug, Clone)]
pub struct IamService {
    db: Database,
    cache: Cache<String, OperatorProfile>,
    session_ttl_seconds: u64,
}

impl IamService {
    #[must_use]
    pub fn new(config: &SecurityConfig, db: Database) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.session_cache_capacity)
            .time_to_live(std::time::Duration::from_secs(config.session_ttl_seconds))
            .build();

        Self { db, cache, session_ttl_seconds: config.session_ttl_seconds }
    }

    /// Creates the default admin account when the operator table is empty.
    ///
    /// # Errors
    /// Propagates datastore failures.
    pub async fn bootstrap(&self) -> Result<(), IamError> {
        let count = self
            .db
            .query("count(SELECT * FROM operator)")
            .await
            .context("Counting operators")?
            .take::<Option<i64>>(0)
            .context("Parsing operator count")?
            .unwrap_or_default();

        if count > 0 {
            return Ok(());
        }

        warn!("No operators found; creating default 'admin' account. Change its password!");
        self.db
            .query(
                "CREATE type::thing($table, $key) SET
                    login = $login,
                    password_hash = $password_hash,
                    roles = $roles",
            )
            .bind(("table", OPERATOR))
            .bind(("key", safe_nanoid!()))
            .bind(("login", ADMIN))
            .bind(("password_hash", sha256_hex(ADMIN)))
            .bind(("roles", vec![ADMIN.to_owned()]))
            .await
            .context("Creating default operator")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Creating default operator")?;

        Ok(())
    }

    /// Verifies credentials and issues an opaque bearer token.
    ///
    /// Unknown logins and wrong passwords fail identically so callers cannot
    /// probe which accounts exist.
    ///
    /// # Errors
    /// [`IamError::Unauthorized`] on any credential mismatch.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        login: &str,
        password: &str,
    ) -> Result<(String, OperatorProfile), IamError> {
        let record = self
            .db
            .query(format!(
                "SELECT {OPERATOR_PROJECTION} FROM operator WHERE login = $login LIMIT 1"
            ))
            .bind(("login", login.to_owned()))
            .await
            .context("Fetching operator")?
            .take::<Vec<OperatorRecord>>(0)
            .context("Parsing operator")?
            .into_iter()
            .next();

        let Some(record) = record else {
            return Err(unauthorized());
        };
        if record.password_hash != sha256_hex(password) {
            return Err(unauthorized());
        }

        let token = safe_nanoid!(TOKEN_LEN);
        let token_hash = sha256_hex(&token);

        self.db
            .query(
                "CREATE type::thing($table, $key) SET
                    token_hash = $token_hash,
                    operator = type::thing('operator', $operator),
                    expires_at = time::now() + duration::from::secs($ttl)",
            )
            .bind(("table", SESSION))
            .bind(("key", safe_nanoid!()))
            .bind(("token_hash", token_hash.clone()))
            .bind(("operator", record.id.clone()))
            .bind(("ttl", self.session_ttl_seconds))
            .await
            .context("Creating session")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Creating session")?;

        let profile = record.profile();
        self.cache.insert(token_hash, profile.clone()).await;

        Ok((token, profile))
    }

    /// Resolves a bearer token to the operator behind it.
    ///
    /// Hits the moka cache first; a miss costs one joined session lookup.
    ///
    /// # Errors
    /// [`IamError::Unauthorized`] for unknown or expired sessions.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<OperatorProfile, IamError> {
        let token_hash = sha256_hex(token);

        self.cache
            .try_get_with(token_hash.clone(), async {
                let record = self
                    .db
                    .query(
                        "SELECT
                            operator.id.id() AS id,
                            operator.login AS login,
                            operator.password_hash AS password_hash,
                            operator.roles AS roles
                        FROM session
                        WHERE token_hash = $token_hash AND expires_at > time::now()
                        LIMIT 1",
                    )
                    .bind(("token_hash", token_hash.clone()))
                    .await
                    .context("Fetching session")?
                    .take::<Vec<OperatorRecord>>(0)
                    .context("Parsing session")?
                    .into_iter()
                    .next();

                record.map(|r| r.profile()).ok_or_else(unauthorized)
            })
            .await
            .map_err(|e: Arc<IamError>| {
                Arc::try_unwrap(e).unwrap_or_else(|arc| IamError::Internal {
                    message: arc.to_string().into(),
                    context: Some("Cache loader returned an error, but it was shared (Arc)".into()),
                })
            })
    }

    /// Revokes the session behind a token.
    ///
    /// # Errors
    /// Propagates datastore failures; revoking an unknown token is a no-op.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), IamError> {
        let token_hash = sha256_hex(token);

        self.db
            .query("DELETE FROM session WHERE token_hash = $token_hash")
            .bind(("token_hash", token_hash.clone()))
            .await
            .context("Deleting session")?;

        self.cache.invalidate(&token_hash).await;
        Ok(())
    }
}

fn unauthorized() -> IamError {
    IamError::Unauthorized { message: "Invalid credentials".into(), context: None }
}

fn sha256_hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(input.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_stable_and_hex_encoded() {
        let first = sha256_hex("secret");
        assert_eq!(first, sha256_hex("secret"));
        assert_eq!(first.len(), 64);
        assert_ne!(first, sha256_hex("Secret"));
    }
}
