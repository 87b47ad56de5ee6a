//! Identity collaborator
//!
//! An external provider supplies a stable user id and a display name.
//! Every persistence call is scoped by that id; without an identity, save
//! operations fail with a user-visible error.

use crate::record::UserId;

/// Source of the current user's identity
pub trait Identity: Send + Sync {
    /// Stable user identifier
    fn user_id(&self) -> UserId;

    /// Human-readable display name
    fn display_name(&self) -> String;
}

/// Fixed identity for tests and embedding demos
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: UserId,
    display_name: String,
}

impl StaticIdentity {
    /// Identity with the given id and display name
    #[must_use]
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(user_id),
            display_name: display_name.into(),
        }
    }
}

impl Identity for StaticIdentity {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }
}
