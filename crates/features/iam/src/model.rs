use machex_kernel::domain::roles::RoleSet;
use surrealdb::types::SurrealValue;

/// Stored operator account.
#[derive(Debug, Clone, SurrealValue)]
pub(crate) struct OperatorRecord {
    pub id: String,
    pub login: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

impl OperatorRecord {
    pub(crate) fn profile(&self) -> OperatorProfile {
        OperatorProfile {
            id: self.id.clone(),
            login: self.login.clone(),
            roles: RoleSet::from_names(self.roles.iter().map(String::as_str)),
        }
    }
}

/// Session-resolved view of an operator, attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorProfile {
    pub id: String,
    pub login: String,
    pub roles: RoleSet,
}
