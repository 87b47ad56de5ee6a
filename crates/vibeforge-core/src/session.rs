//! Project session
//!
//! One session owns the single-writer project state — the file map — and
//! wires the collaborators around it: the orchestrator mutates the map,
//! the store persists it as an opaque blob, and the preview session
//! renders it. All suspension points are the LLM and store awaits; no
//! other operation in the core blocks.

use crate::error::SessionError;
use crate::orchestrator::{ExecutionOutcome, Orchestrator, OrchestratorConfig};
use crate::phase::ProjectPhase;
use crate::plan::PlanInstructions;
use std::sync::Arc;
use std::time::Duration;
use vibeforge_llm::CompletionClient;
use vibeforge_preview::{PreviewDocument, PreviewSession};
use vibeforge_project::{starter_files, FileMap};
use vibeforge_store::{
    Identity, ProjectId, ProjectPatch, ProjectRecord, ProjectStore, StoreError,
};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Orchestrator behavior
    pub orchestrator: OrchestratorConfig,
    /// Delay before the automatic preview refresh after a merge
    pub refresh_delay: Duration,
}

impl SessionConfig {
    /// File-aware defaults with the standard refresh delay
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different refresh delay (tests use zero)
    #[inline]
    #[must_use]
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            orchestrator: OrchestratorConfig::new(),
            refresh_delay: Duration::from_millis(500),
        }
    }
}

/// One user's working session on one project
pub struct ProjectSession {
    store: Arc<dyn ProjectStore>,
    identity: Option<Arc<dyn Identity>>,
    record: Option<ProjectRecord>,
    name: String,
    description: String,
    files: FileMap,
    orchestrator: Orchestrator,
    preview: PreviewSession,
    refresh_delay: Duration,
}

impl std::fmt::Debug for ProjectSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSession")
            .field("name", &self.name)
            .field("phase", &self.orchestrator.phase())
            .field("files", &self.files.len())
            .field("saved", &self.record.is_some())
            .finish_non_exhaustive()
    }
}

impl ProjectSession {
    /// Fresh unsaved session starting from the template
    #[must_use]
    pub fn new(
        store: Arc<dyn ProjectStore>,
        identity: Option<Arc<dyn Identity>>,
        client: Arc<dyn CompletionClient>,
        config: SessionConfig,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            store,
            identity,
            record: None,
            name: name.into(),
            description: description.into(),
            files: starter_files(),
            orchestrator: Orchestrator::new(client, config.orchestrator),
            preview: PreviewSession::new(),
            refresh_delay: config.refresh_delay,
        }
    }

    /// Load a stored project, enforcing ownership
    ///
    /// # Errors
    /// [`StoreError::IdentityRequired`] without an identity,
    /// [`StoreError::Unauthorized`] when the record belongs to another
    /// user, [`StoreError::NotFound`] for unknown ids; blob decode
    /// failures surface as [`SessionError::Blob`].
    pub async fn load(
        store: Arc<dyn ProjectStore>,
        identity: Arc<dyn Identity>,
        client: Arc<dyn CompletionClient>,
        config: SessionConfig,
        id: ProjectId,
    ) -> Result<Self, SessionError> {
        let record = store.get_project(id).await?;
        if record.owner != identity.user_id() {
            tracing::warn!(project = %id, "ownership check failed");
            return Err(StoreError::Unauthorized(id).into());
        }

        let files = match record.code.clone() {
            Some(blob) => FileMap::from_blob(blob)?,
            None => starter_files(),
        };

        Ok(Self {
            store,
            identity: Some(identity),
            name: record.name.clone(),
            description: record.description.clone(),
            record: Some(record),
            files,
            orchestrator: Orchestrator::new(client, config.orchestrator),
            preview: PreviewSession::new(),
            refresh_delay: config.refresh_delay,
        })
    }

    /// Persist the session, creating the record on first save
    ///
    /// # Errors
    /// [`StoreError::IdentityRequired`] without an identity; store and
    /// blob failures otherwise.
    pub async fn save(&mut self) -> Result<ProjectId, SessionError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(StoreError::IdentityRequired)?;
        let blob = self.files.to_blob()?;

        let id = match &self.record {
            Some(record) => record.id,
            None => {
                let created = self
                    .store
                    .create_project(&identity.user_id(), &self.name, &self.description)
                    .await?;
                created.id
            }
        };
        let updated = self
            .store
            .update_project(id, ProjectPatch::new().with_code(blob))
            .await?;
        self.record = Some(updated);
        tracing::info!(project = %id, "session saved");
        Ok(id)
    }

    /// Run the planning call for a user prompt
    ///
    /// # Errors
    /// Propagates orchestrator validation/upstream failures.
    pub async fn plan(&mut self, prompt: &str) -> Result<&PlanInstructions, SessionError> {
        let plan = self
            .orchestrator
            .submit_plan(&self.name, prompt, &self.files)
            .await?;
        Ok(plan)
    }

    /// Edit the pending instructions in place
    ///
    /// # Errors
    /// Invalid outside the approval phase.
    pub fn edit_instructions(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.orchestrator.edit_instructions(text)?;
        Ok(())
    }

    /// Reject the pending plan
    ///
    /// # Errors
    /// Invalid outside the approval phase.
    pub fn reject_plan(&mut self) -> Result<(), SessionError> {
        self.orchestrator.reject_plan()?;
        Ok(())
    }

    /// Approve the pending plan: execute, merge, persist, refresh
    ///
    /// The merge lands in the in-memory map first; if the session has a
    /// stored record the blob is persisted, and if a preview is live it is
    /// regenerated after the configured delay.
    ///
    /// # Errors
    /// Orchestrator failures leave the map untouched; a persistence
    /// failure after the merge surfaces as [`SessionError::Store`] with
    /// the merge retained in memory.
    pub async fn approve(&mut self) -> Result<ExecutionOutcome, SessionError> {
        let outcome = self.orchestrator.approve_and_execute(&mut self.files).await?;

        if self.record.is_some() {
            self.save().await?;
        }

        if self.preview.is_running() {
            tokio::time::sleep(self.refresh_delay).await;
            self.refresh_preview()?;
        }

        Ok(outcome)
    }

    /// Start (or restart) the live preview; the document is available via
    /// [`Self::preview`]
    ///
    /// # Errors
    /// Fatal flattening conditions ([`SessionError::Preview`]).
    pub fn start_preview(&mut self) -> Result<(), SessionError> {
        self.preview.render(&self.files, &self.name)?;
        Ok(())
    }

    /// Regenerate the live preview from the current files
    ///
    /// A no-op when no preview is running.
    ///
    /// # Errors
    /// Fatal flattening conditions; the previous document stays installed.
    pub fn refresh_preview(&mut self) -> Result<(), SessionError> {
        if !self.preview.is_running() {
            return Ok(());
        }
        self.preview.render(&self.files, &self.name)?;
        Ok(())
    }

    /// Stop the live preview, releasing its resource handle
    pub fn stop_preview(&mut self) {
        self.preview.stop();
    }

    /// Full reset: template files, planning phase, preview stopped,
    /// detached from any stored record
    pub fn new_project(&mut self) {
        self.orchestrator.new_project();
        self.files = starter_files();
        self.preview.stop();
        self.record = None;
    }

    /// Current file map
    #[inline]
    #[must_use]
    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> ProjectPhase {
        self.orchestrator.phase()
    }

    /// Pending plan, if any
    #[inline]
    #[must_use]
    pub fn pending_plan(&self) -> Option<&PlanInstructions> {
        self.orchestrator.plan()
    }

    /// Stored record, if the session has been saved
    #[inline]
    #[must_use]
    pub fn record(&self) -> Option<&ProjectRecord> {
        self.record.as_ref()
    }

    /// Live preview document, if running
    #[inline]
    #[must_use]
    pub fn preview(&self) -> Option<&PreviewDocument> {
        self.preview.live()
    }

    /// Project display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
