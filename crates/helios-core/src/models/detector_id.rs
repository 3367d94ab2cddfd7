use serde::{Deserialize, Serialize};

/// Stable detector identifier.
///
/// Wraps a `String` for type safety. Ordering is lexicographic so that
/// maps keyed by `DetectorId` iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectorId(pub String);

impl DetectorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DetectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DetectorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DetectorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for DetectorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
