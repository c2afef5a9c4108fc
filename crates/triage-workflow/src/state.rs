//! Workflow states of an advisory document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// The lifecycle stage of a document under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    /// Imported, nobody has looked at it yet.
    New,
    /// Opened by an editor.
    Read,
    /// Being assessed (comments, SSVC scoring).
    Assessing,
    /// Handed to a reviewer.
    Review,
    /// Review finished. Terminal.
    Archived,
    /// Discarded. Terminal.
    Deleted,
}

impl WorkflowState {
    pub const ALL: [WorkflowState; 6] = [
        WorkflowState::New,
        WorkflowState::Read,
        WorkflowState::Assessing,
        WorkflowState::Review,
        WorkflowState::Archived,
        WorkflowState::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::New => "new",
            WorkflowState::Read => "read",
            WorkflowState::Assessing => "assessing",
            WorkflowState::Review => "review",
            WorkflowState::Archived => "archived",
            WorkflowState::Deleted => "deleted",
        }
    }

    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Archived | WorkflowState::Deleted)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowState {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| WorkflowError::UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        for state in WorkflowState::ALL {
            assert_eq!(state.to_string().parse::<WorkflowState>(), Ok(state));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "Review".parse::<WorkflowState>(),
            Err(WorkflowError::UnknownState("Review".into()))
        );
        assert!("".parse::<WorkflowState>().is_err());
    }

    #[test]
    fn terminal_states() {
        let terminal: Vec<_> = WorkflowState::ALL
            .into_iter()
            .filter(WorkflowState::is_terminal)
            .collect();
        assert_eq!(terminal, vec![WorkflowState::Archived, WorkflowState::Deleted]);
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&WorkflowState::Assessing).unwrap();
        assert_eq!(json, "\"assessing\"");
        let back: WorkflowState = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(back, WorkflowState::Archived);
    }
}
