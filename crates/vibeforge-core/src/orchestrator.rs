//! Plan/execute orchestrator
//!
//! The two-phase state machine coordinating: user prompt → AI-generated
//! instructions → user edit/approval → AI-generated file contents → merge
//! into the file map. One orchestrator serves both product flavors (fresh
//! project and file-aware session) behind a configuration switch; the two
//! LLM operations stay behind [`CompletionClient`], decoupled from any
//! rendering concern.
//!
//! Calls are structurally single-flight: every transition needs `&mut
//! self`, and operations in the wrong phase are typed errors.

use crate::error::{Field, OrchestratorError};
use crate::phase::ProjectPhase;
use crate::plan::PlanInstructions;
use crate::prompts::{execution_prompt, planning_prompt};
use crate::response::parse_execution_response;
use std::sync::Arc;
use vibeforge_llm::{CompletionClient, CompletionRequest};
use vibeforge_project::{FileMap, ProjectPath};

/// Orchestrator configuration
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Model override for planning calls
    pub plan_model: Option<String>,
    /// Model override for execution calls
    pub execute_model: Option<String>,
    /// Embed the current file map into planning prompts
    pub file_aware_planning: bool,
}

impl OrchestratorConfig {
    /// File-aware configuration with default models
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_aware_planning: true,
            ..Self::default()
        }
    }

    /// With a planning-model override
    #[inline]
    #[must_use]
    pub fn with_plan_model(mut self, model: impl Into<String>) -> Self {
        self.plan_model = Some(model.into());
        self
    }

    /// With an execution-model override
    #[inline]
    #[must_use]
    pub fn with_execute_model(mut self, model: impl Into<String>) -> Self {
        self.execute_model = Some(model.into());
        self
    }

    /// With file-aware planning on or off
    #[inline]
    #[must_use]
    pub fn with_file_aware_planning(mut self, enabled: bool) -> Self {
        self.file_aware_planning = enabled;
        self
    }
}

/// Result of one completed execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Paths whose content was replaced or created
    pub updated_paths: Vec<ProjectPath>,
    /// Model's summary of the changes
    pub summary: String,
}

/// The plan/execute state machine for one project session
pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
    config: OrchestratorConfig,
    phase: ProjectPhase,
    plan: Option<PlanInstructions>,
    last_summary: Option<String>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("phase", &self.phase)
            .field("has_plan", &self.plan.is_some())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Orchestrator in the `Planning` phase
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>, config: OrchestratorConfig) -> Self {
        Self {
            client,
            config,
            phase: ProjectPhase::Planning,
            plan: None,
            last_summary: None,
        }
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> ProjectPhase {
        self.phase
    }

    /// Plan awaiting approval, if any
    #[inline]
    #[must_use]
    pub fn plan(&self) -> Option<&PlanInstructions> {
        self.plan.as_ref()
    }

    /// Summary of the last completed execution, if any
    #[inline]
    #[must_use]
    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    /// Submit a prompt and run the planning call
    ///
    /// Validation failures keep the phase at `Planning` and issue no call.
    /// An upstream failure rolls back to `Planning` with no partial state.
    ///
    /// # Errors
    /// [`OrchestratorError::Validation`], [`OrchestratorError::Upstream`],
    /// or [`OrchestratorError::InvalidTransition`] outside `Planning`.
    pub async fn submit_plan(
        &mut self,
        project_name: &str,
        user_prompt: &str,
        files: &FileMap,
    ) -> Result<&PlanInstructions, OrchestratorError> {
        if !self.phase.accepts_submission() {
            return Err(OrchestratorError::InvalidTransition {
                action: "submit a plan",
                phase: self.phase,
            });
        }
        if project_name.trim().is_empty() {
            return Err(OrchestratorError::Validation {
                field: Field::ProjectName,
            });
        }
        if user_prompt.trim().is_empty() {
            return Err(OrchestratorError::Validation {
                field: Field::Prompt,
            });
        }

        let context = self.config.file_aware_planning.then_some(files);
        let prompt = planning_prompt(project_name, user_prompt, context);
        let mut request = CompletionRequest::new(prompt);
        if let Some(model) = &self.config.plan_model {
            request = request.with_model(model.clone());
        }

        self.phase = ProjectPhase::PlanPending;
        tracing::info!(project = project_name, "requesting plan");

        match self.client.complete(request).await {
            Ok(text) => {
                let plan = PlanInstructions::from_text(text);
                tracing::info!(
                    files = plan.files_to_modify.len(),
                    "plan generated, awaiting approval"
                );
                self.phase = ProjectPhase::AwaitingApproval;
                Ok(self.plan.insert(plan))
            }
            Err(err) => {
                tracing::warn!(error = %err, "planning call failed, rolling back");
                self.phase = ProjectPhase::Planning;
                Err(OrchestratorError::Upstream(err))
            }
        }
    }

    /// Replace the plan text in place while awaiting approval
    ///
    /// # Errors
    /// [`OrchestratorError::InvalidTransition`] outside `AwaitingApproval`.
    pub fn edit_instructions(&mut self, text: impl Into<String>) -> Result<(), OrchestratorError> {
        match (&self.phase, self.plan.as_mut()) {
            (ProjectPhase::AwaitingApproval, Some(plan)) => {
                plan.edit(text);
                Ok(())
            }
            _ => Err(OrchestratorError::InvalidTransition {
                action: "edit instructions",
                phase: self.phase,
            }),
        }
    }

    /// Reject the plan, returning to `Planning`
    ///
    /// # Errors
    /// [`OrchestratorError::InvalidTransition`] outside `AwaitingApproval`.
    pub fn reject_plan(&mut self) -> Result<(), OrchestratorError> {
        if !self.phase.awaits_approval() {
            return Err(OrchestratorError::InvalidTransition {
                action: "reject the plan",
                phase: self.phase,
            });
        }
        tracing::info!("plan rejected");
        self.plan = None;
        self.phase = ProjectPhase::Planning;
        Ok(())
    }

    /// Approve the (possibly edited) plan and run the execution call
    ///
    /// On success the returned files are merged into `files` as whole-value
    /// overwrites and the phase moves to `Completed`. Upstream and parse
    /// failures both return the machine to `AwaitingApproval` with the
    /// instructions intact, so the user can resubmit without retyping;
    /// nothing is merged on any failure.
    ///
    /// # Errors
    /// [`OrchestratorError::Upstream`], [`OrchestratorError::ResponseParse`],
    /// or [`OrchestratorError::InvalidTransition`] outside `AwaitingApproval`.
    pub async fn approve_and_execute(
        &mut self,
        files: &mut FileMap,
    ) -> Result<ExecutionOutcome, OrchestratorError> {
        let instructions = match (&self.phase, self.plan.as_ref()) {
            (ProjectPhase::AwaitingApproval, Some(plan)) => plan.instructions.clone(),
            _ => {
                return Err(OrchestratorError::InvalidTransition {
                    action: "approve the plan",
                    phase: self.phase,
                })
            }
        };

        let prompt = execution_prompt(&instructions, files);
        let mut request = CompletionRequest::new(prompt);
        if let Some(model) = &self.config.execute_model {
            request = request.with_model(model.clone());
        }

        self.phase = ProjectPhase::Executing;
        tracing::info!("executing approved instructions");

        let text = match self.client.complete(request).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "execution call failed, returning to approval");
                self.phase = ProjectPhase::AwaitingApproval;
                return Err(OrchestratorError::Upstream(err));
            }
        };

        let response = match parse_execution_response(&text) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "execution response unparseable, returning to approval");
                self.phase = ProjectPhase::AwaitingApproval;
                return Err(OrchestratorError::ResponseParse(err));
            }
        };

        let updated_paths: Vec<ProjectPath> = response.updated_files.keys().cloned().collect();
        files.merge(response.updated_files);
        tracing::info!(files = updated_paths.len(), "merged execution result");

        self.plan = None;
        self.last_summary = Some(response.execution_summary.clone());
        self.phase = ProjectPhase::Completed;

        Ok(ExecutionOutcome {
            updated_paths,
            summary: response.execution_summary,
        })
    }

    /// Explicit "new project" reset: back to `Planning`, all cycle state
    /// discarded
    pub fn new_project(&mut self) {
        tracing::info!("resetting to planning");
        self.plan = None;
        self.last_summary = None;
        self.phase = ProjectPhase::Planning;
    }
}
