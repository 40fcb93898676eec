use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a sale.
///
/// Kept as an opaque string so that ids arriving from the HTTP path can be
/// carried through unparsed; freshly minted ids are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(String);

impl SaleId {
    /// Mints a new random sale ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier without validating it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ID is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SaleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SaleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of the user that owns a sale.
///
/// Users live in a separate service; this crate never checks the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_id_generate_creates_unique_ids() {
        let id1 = SaleId::generate();
        let id2 = SaleId::generate();
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn sale_id_empty_detection() {
        assert!(SaleId::new("").is_empty());
        assert!(!SaleId::generate().is_empty());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let sale_id = SaleId::new("abc");
        let owner_id = OwnerId::new("user-1");
        assert_eq!(serde_json::to_string(&sale_id).unwrap(), "\"abc\"");
        assert_eq!(serde_json::to_string(&owner_id).unwrap(), "\"user-1\"");
    }
}
