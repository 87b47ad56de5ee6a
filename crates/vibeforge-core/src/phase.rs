//! Project phase state machine states
//!
//! The two-phase generation cycle progresses monotonically:
//! `Planning → PlanPending → AwaitingApproval → Executing → Completed`,
//! with rejection returning to `Planning` and "new project" resetting
//! everything. The transient in-flight states are modeled explicitly so
//! re-entry is a typed error rather than a race.

use serde::{Deserialize, Serialize};

/// Where one project session stands in the generation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectPhase {
    /// Waiting for a name and prompt
    Planning,
    /// Planning call in flight
    PlanPending,
    /// Plan generated; user may edit, approve, or reject
    AwaitingApproval,
    /// Execution call in flight
    Executing,
    /// Files merged; cycle finished
    Completed,
}

impl ProjectPhase {
    /// Whether a new plan can be submitted from this phase
    #[inline]
    #[must_use]
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Planning)
    }

    /// Whether an external call is currently outstanding
    #[inline]
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::PlanPending | Self::Executing)
    }

    /// Whether plan editing/approval affordances are active
    #[inline]
    #[must_use]
    pub fn awaits_approval(&self) -> bool {
        matches!(self, Self::AwaitingApproval)
    }
}

impl Default for ProjectPhase {
    fn default() -> Self {
        Self::Planning
    }
}

impl std::fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Planning => "planning",
            Self::PlanPending => "plan-pending",
            Self::AwaitingApproval => "awaiting-approval",
            Self::Executing => "executing",
            Self::Completed => "completed",
        };
        write!(f, "{label}")
    }
}
