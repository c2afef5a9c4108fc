//! Commenting permissions per workflow state.
//!
//! Comments are open while a document is read or assessed. Later stages
//! restrict them to the roles that still have business with the document.
//! Commenting on a `read` document also moves it to `assessing`, which only
//! the roles allowed to make that move may do.

use crate::error::WorkflowError;
use crate::role::Role;
use crate::state::WorkflowState;
use crate::transition::require_transition;

/// Who may comment in a given state. `None` means anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRule {
    pub state: WorkflowState,
    pub roles: Option<&'static [Role]>,
}

pub static COMMENT_RULES: [CommentRule; 6] = [
    CommentRule {
        state: WorkflowState::New,
        roles: Some(&[]),
    },
    CommentRule {
        state: WorkflowState::Read,
        roles: None,
    },
    CommentRule {
        state: WorkflowState::Assessing,
        roles: None,
    },
    CommentRule {
        state: WorkflowState::Review,
        roles: Some(&[Role::Reviewer, Role::Editor, Role::Admin]),
    },
    CommentRule {
        state: WorkflowState::Archived,
        roles: Some(&[Role::Editor, Role::Admin]),
    },
    CommentRule {
        state: WorkflowState::Deleted,
        roles: Some(&[Role::Admin]),
    },
];

/// Whether a principal holding `roles` may comment on a document in `state`.
pub fn is_commenting_allowed(roles: &[Role], state: WorkflowState) -> bool {
    match COMMENT_RULES.iter().find(|r| r.state == state) {
        Some(CommentRule { roles: None, .. }) => true,
        Some(CommentRule {
            roles: Some(allowed),
            ..
        }) => roles.iter().any(|r| allowed.contains(r)),
        None => false,
    }
}

/// Check a new comment and report the state change it causes.
///
/// A comment on a `read` document moves it to `assessing`, so the commenter
/// must also hold a role that may perform `read -> assessing`. Returns the
/// new state, or `None` when the document stays where it is.
pub fn comment_outcome(
    roles: &[Role],
    state: WorkflowState,
) -> Result<Option<WorkflowState>, WorkflowError> {
    if !is_commenting_allowed(roles, state) {
        return Err(WorkflowError::CommentForbidden(state));
    }
    if state != WorkflowState::Read {
        return Ok(None);
    }
    require_transition(roles, WorkflowState::Read, WorkflowState::Assessing)?;
    Ok(Some(WorkflowState::Assessing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_states_allow_anyone() {
        assert!(is_commenting_allowed(&[], WorkflowState::Read));
        assert!(is_commenting_allowed(&[Role::Auditor], WorkflowState::Assessing));
    }

    #[test]
    fn new_documents_are_closed() {
        assert!(!is_commenting_allowed(&Role::ALL, WorkflowState::New));
        assert_eq!(
            comment_outcome(&Role::ALL, WorkflowState::New),
            Err(WorkflowError::CommentForbidden(WorkflowState::New))
        );
    }

    #[test]
    fn restricted_states() {
        assert!(is_commenting_allowed(&[Role::Editor], WorkflowState::Review));
        assert!(!is_commenting_allowed(&[Role::Auditor], WorkflowState::Review));
        assert!(is_commenting_allowed(&[Role::Admin], WorkflowState::Archived));
        assert!(!is_commenting_allowed(&[Role::Reviewer], WorkflowState::Archived));
        assert!(is_commenting_allowed(&[Role::Admin], WorkflowState::Deleted));
        assert!(!is_commenting_allowed(&[Role::Editor], WorkflowState::Deleted));
    }

    #[test]
    fn every_state_has_a_rule() {
        for state in WorkflowState::ALL {
            assert!(COMMENT_RULES.iter().any(|r| r.state == state));
        }
    }

    #[test]
    fn editor_comment_moves_read_to_assessing() {
        assert_eq!(
            comment_outcome(&[Role::Editor], WorkflowState::Read),
            Ok(Some(WorkflowState::Assessing))
        );
    }

    #[test]
    fn comment_on_read_needs_the_assessing_move() {
        for role in [Role::Reviewer, Role::Auditor, Role::Importer, Role::Admin] {
            assert_eq!(
                comment_outcome(&[role], WorkflowState::Read),
                Err(WorkflowError::Forbidden {
                    from: WorkflowState::Read,
                    to: WorkflowState::Assessing,
                }),
                "{role}"
            );
        }
        assert!(comment_outcome(&[], WorkflowState::Read).is_err());
    }

    #[test]
    fn other_comments_do_not_move() {
        assert_eq!(
            comment_outcome(&[Role::Editor], WorkflowState::Assessing),
            Ok(None)
        );
        assert_eq!(
            comment_outcome(&[Role::Auditor], WorkflowState::Assessing),
            Ok(None)
        );
        assert_eq!(
            comment_outcome(&[Role::Reviewer], WorkflowState::Review),
            Ok(None)
        );
    }
}
