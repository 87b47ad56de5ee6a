//! Persistence records
//!
//! Defines the project record stored by the external document store and
//! the partial-update shape applied to it. The project's file map lives
//! opaquely under [`ProjectRecord::code`]; the store never interprets it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique project identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Ulid);

impl ProjectId {
    /// Generate a new project ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable user identifier supplied by the external identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wrap a provider-issued identifier
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique identifier
    pub id: ProjectId,
    /// Owning user; every access is scoped by this
    pub owner: UserId,
    /// Display name
    pub name: String,
    /// Free-form description (usually the creating prompt)
    pub description: String,
    /// Opaque file-map blob; absent until the first save
    pub code: Option<serde_json::Value>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Fresh record for an owner
    #[must_use]
    pub fn new(owner: UserId, name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            owner,
            name: name.into(),
            description: description.into(),
            code: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to a stored project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New opaque code blob
    pub code: Option<serde_json::Value>,
}

impl ProjectPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a new name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With a new description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With a new code blob
    #[inline]
    #[must_use]
    pub fn with_code(mut self, code: serde_json::Value) -> Self {
        self.code = Some(code);
        self
    }

    /// Whether the patch changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.code.is_none()
    }
}
