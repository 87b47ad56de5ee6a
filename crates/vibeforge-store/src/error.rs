//! Error types for persistence and identity

use crate::record::ProjectId;

/// Failures from the persistence collaborator
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with that identifier
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Record exists but belongs to another user
    #[error("unauthorized access to project {0}")]
    Unauthorized(ProjectId),

    /// Save attempted without an identity; surfaced to the user, never a
    /// silent no-op
    #[error("an identity is required to save projects")]
    IdentityRequired,

    /// Backend-specific failure
    #[error("storage backend failed: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_project() {
        let id = ProjectId::new();
        assert!(StoreError::NotFound(id).to_string().contains(&id.to_string()));
        assert!(StoreError::Unauthorized(id)
            .to_string()
            .contains("unauthorized"));
    }
}
