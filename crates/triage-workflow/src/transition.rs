//! The workflow transition table and its queries.
//!
//! Which role may move a document between which states is plain data. The
//! table below is the whole policy; there is no implicit admin override.

use serde::Serialize;

use crate::error::WorkflowError;
use crate::role::Role;
use crate::state::WorkflowState;

use Role::{Editor, Reviewer};
use WorkflowState::{Archived, Assessing, Deleted, New, Read, Review};

/// A legal state change and the roles that may perform it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowStateTransition {
    pub from: WorkflowState,
    pub to: WorkflowState,
    pub roles: &'static [Role],
}

impl WorkflowStateTransition {
    /// True if any of `roles` is one of this transition's roles.
    pub fn permits(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }
}

const fn edge(
    from: WorkflowState,
    to: WorkflowState,
    roles: &'static [Role],
) -> WorkflowStateTransition {
    WorkflowStateTransition { from, to, roles }
}

/// Every legal transition, in the order they are offered to users.
pub static WORKFLOW_TRANSITIONS: [WorkflowStateTransition; 8] = [
    edge(New, Read, &[Editor]),
    edge(Read, Assessing, &[Editor]),
    edge(Assessing, Review, &[Editor]),
    edge(Review, Assessing, &[Reviewer]),
    edge(Review, Archived, &[Reviewer]),
    edge(Review, Deleted, &[Reviewer]),
    edge(Read, Deleted, &[Editor, Reviewer]),
    edge(Assessing, Deleted, &[Editor, Reviewer]),
];

/// Whether a principal holding `roles` may move a document from `from` to `to`.
pub fn is_transition_allowed(roles: &[Role], from: WorkflowState, to: WorkflowState) -> bool {
    WORKFLOW_TRANSITIONS
        .iter()
        .any(|t| t.from == from && t.to == to && t.permits(roles))
}

/// Like [`is_transition_allowed`], but as a `Result` for `?` chains.
pub fn require_transition(
    roles: &[Role],
    from: WorkflowState,
    to: WorkflowState,
) -> Result<(), WorkflowError> {
    if is_transition_allowed(roles, from, to) {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden { from, to })
    }
}

/// Transitions out of `from` that `roles` may perform, in table order.
pub fn allowed_transitions(
    roles: &[Role],
    from: WorkflowState,
) -> Vec<&'static WorkflowStateTransition> {
    WORKFLOW_TRANSITIONS
        .iter()
        .filter(|t| t.from == from && t.permits(roles))
        .collect()
}

/// Roles that may perform `from -> to`; empty if there is no such edge.
pub fn transition_roles(from: WorkflowState, to: WorkflowState) -> &'static [Role] {
    WORKFLOW_TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.to == to)
        .map(|t| t.roles)
        .unwrap_or(&[])
}
