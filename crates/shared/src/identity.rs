//! Acting-identity context value.
//!
//! Authentication happens upstream; the service only receives who is
//! acting. The identity is passed explicitly into core operations rather
//! than read from ambient global state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity performing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub id: Uuid,
    /// Display name, used to stamp `author_name` on new documents.
    pub display_name: String,
    /// Email address.
    pub email: String,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(id: Uuid, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_new() {
        let id = Uuid::new_v4();
        let identity = Identity::new(id, "Ana Lopez", "ana@example.com");
        assert_eq!(identity.id, id);
        assert_eq!(identity.display_name, "Ana Lopez");
        assert_eq!(identity.email, "ana@example.com");
    }
}
