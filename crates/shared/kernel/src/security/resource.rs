use crate::{SAFE_ALPHABET, SAFE_KEY_LEN};
use std::borrow::Cow;

#[machex_derive::machex_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a `SurrealDB` ID string against a specific table.
    ///
    /// Prevents "ID Spoofing" where a caller provides an ID from a different table
    /// (e.g., providing a 'session:xyz' ID to an 'item' endpoint).
    ///
    /// # Arguments
    /// * `id` - The ID to verify (e.g., "item:2Qx7" or just "2Qx7")
    /// * `expected_table` - The table the ID must belong to (e.g., "item")
    ///
    /// # Errors
    /// Returns an error if the ID table does not match the expected table.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref();
        let table_ref = expected_table.as_ref();

        if let Some((table, _)) = id_ref.split_once(':') {
            if table != table_ref {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            }
            // Return the full validated ID
            Ok(id_ref.to_owned())
        } else {
            // Automatically prefix if only the random part was provided
            Ok(format!("{table_ref}:{id_ref}"))
        }
    }

    /// Checks whether a raw path token has the shape of a generated record key.
    ///
    /// Generated keys are exactly [`SAFE_KEY_LEN`] characters long and drawn
    /// from [`SAFE_ALPHABET`]. This is a pure shape test: it never touches the
    /// datastore, so callers can reject junk input before issuing any lookup.
    #[must_use]
    pub fn is_safe_key(candidate: &str) -> bool {
        candidate.len() == SAFE_KEY_LEN
            && candidate.chars().all(|ch| SAFE_ALPHABET.contains(&ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        // Correct table
        assert_eq!(ResourceGuard::verify("item:2Qx7mKp9RtWz", "item").unwrap(), "item:2Qx7mKp9RtWz");

        // Auto-prefix
        assert_eq!(ResourceGuard::verify("2Qx7mKp9RtWz", "item").unwrap(), "item:2Qx7mKp9RtWz");

        // Malicious mismatch
        let err = ResourceGuard::verify("session:config", "item");
        assert!(err.is_err());
    }

    #[test]
    fn test_safe_key_shape() {
        assert!(ResourceGuard::is_safe_key("2Qx7mKp9RtWz"));

        // Wrong length
        assert!(!ResourceGuard::is_safe_key("2Qx7"));
        assert!(!ResourceGuard::is_safe_key("2Qx7mKp9RtWz2"));

        // Ambiguous or foreign characters never appear in generated keys
        assert!(!ResourceGuard::is_safe_key("2Qx7mKp9RtW0"));
        assert!(!ResourceGuard::is_safe_key("2Qx7mKp9RtWI"));
        assert!(!ResourceGuard::is_safe_key("2Qx7mKp9Rt-z"));
        assert!(!ResourceGuard::is_safe_key("item:2Qx7mKp"));
    }
}
