//! Board instance identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one board instance.
///
/// Namespaces the element ids a renderer emits, so several boards can share
/// a page without their arrowhead markers colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(BoardId::generate(), BoardId::generate());
    }

    #[test]
    fn test_explicit_id() {
        let id = BoardId::new("main-board");
        assert_eq!(id.to_string(), "main-board");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"main-board\"");
    }
}
