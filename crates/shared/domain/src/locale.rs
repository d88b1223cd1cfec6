use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Two-letter lowercase language code used as the leading path segment.
///
/// Codes are not checked against an ISO registry, only against the shape
/// `[a-z]{2}`; unknown-but-well-formed codes pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale([u8; 2]);

/// Rejection reason for a malformed language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLocale(pub String);

impl fmt::Display for InvalidLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language code: {:?}", self.0)
    }
}

impl std::error::Error for InvalidLocale {}

impl Locale {
    /// English, the fallback for unroutable requests.
    pub const EN: Self = Self(*b"en");

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Constructors only admit ASCII lowercase bytes.
        std::str::from_utf8(&self.0).unwrap_or("en")
    }
}

impl FromStr for Locale {
    type Err = InvalidLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() == 2 && bytes.iter().all(u8::is_ascii_lowercase) {
            Ok(Self([bytes[0], bytes[1]]))
        } else {
            Err(InvalidLocale(s.to_owned()))
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
