//! Workflow gating for advisory documents.
//!
//! A document moves through six states (new, read, assessing, review,
//! archived, deleted). Each legal move is an entry in a static table that
//! names the roles allowed to perform it; a principal needs only one of
//! those roles. Archived and deleted are terminal.
//!
//! This crate only answers "may these roles do this?". Storing the state
//! and authenticating the principal happen elsewhere.

pub mod comment;
pub mod error;
pub mod role;
pub mod state;
pub mod transition;

pub use comment::{comment_outcome, is_commenting_allowed, CommentRule, COMMENT_RULES};
pub use error::WorkflowError;
pub use role::{Role, RoleNames};
pub use state::WorkflowState;
pub use transition::{
    allowed_transitions, is_transition_allowed, require_transition, transition_roles,
    WorkflowStateTransition, WORKFLOW_TRANSITIONS,
};
