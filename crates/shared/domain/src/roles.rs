use crate::constants::{ADMIN, EDITOR, VIEWER};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

bitflags! {
    /// Represents a set of operator roles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RoleSet: u32 {
        const VIEWER = 1 << 0;
        const EDITOR = 1 << 1;
        const ADMIN = 1 << 2;

        const ALL = Self::VIEWER.bits() | Self::EDITOR.bits() | Self::ADMIN.bits();
    }
}

impl From<&str> for RoleSet {
    fn from(s: &str) -> Self {
        match s {
            VIEWER => Self::VIEWER,
            EDITOR => Self::EDITOR,
            ADMIN => Self::ADMIN,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for RoleSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl RoleSet {
    /// Collects a role set from the string form stored in the operator record.
    #[must_use]
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().map(Self::from).fold(Self::empty(), |acc, role| acc | role)
    }

    /// Editors and admins may mutate catalog entries.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        self.intersects(Self::EDITOR.union(Self::ADMIN))
    }
}

impl Serialize for RoleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
