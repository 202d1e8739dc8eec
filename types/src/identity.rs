//! Caller identity (a ledger principal).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated principal on the surrounding ledger.
///
/// The core never verifies identities; whatever the delivery layer hands over is
/// trusted. Ordering is lexicographic so identity-keyed maps iterate
/// deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identity is non-empty and free of whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_rejects_empty_and_whitespace() {
        assert!(Identity::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").is_valid());
        assert!(!Identity::new("").is_valid());
        assert!(!Identity::new("ST1 PQ").is_valid());
    }
}
