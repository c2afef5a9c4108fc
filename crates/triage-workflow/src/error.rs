//! Error types for the workflow state machine.

use crate::role::Role;
use crate::state::WorkflowState;

/// Errors from parsing workflow tokens or enforcing transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("unknown workflow state '{0}'")]
    UnknownState(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("not allowed to change workflow state from {from} to {to}")]
    Forbidden {
        from: WorkflowState,
        to: WorkflowState,
    },

    #[error("not allowed to comment on a {0} document")]
    CommentForbidden(WorkflowState),

    #[error("role token '{token}' is assigned to both {first} and {second}")]
    DuplicateRoleToken {
        token: String,
        first: Role,
        second: Role,
    },
}
