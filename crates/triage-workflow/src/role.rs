//! Roles and their deployment-specific tokens.
//!
//! The identity provider hands us role names as plain strings. Which string
//! means "editor" differs between deployments, so tokens are translated
//! through a [`RoleNames`] table instead of being hard-coded.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Importer,
    Editor,
    Reviewer,
    Auditor,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Importer,
        Role::Editor,
        Role::Reviewer,
        Role::Auditor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Importer => "importer",
            Role::Editor => "editor",
            Role::Reviewer => "reviewer",
            Role::Auditor => "auditor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role tokens as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleNames {
    pub admin: String,
    pub importer: String,
    pub editor: String,
    pub reviewer: String,
    pub auditor: String,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            admin: Role::Admin.as_str().to_string(),
            importer: Role::Importer.as_str().to_string(),
            editor: Role::Editor.as_str().to_string(),
            reviewer: Role::Reviewer.as_str().to_string(),
            auditor: Role::Auditor.as_str().to_string(),
        }
    }
}

impl RoleNames {
    /// The token this deployment uses for a role.
    pub fn token(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::Importer => &self.importer,
            Role::Editor => &self.editor,
            Role::Reviewer => &self.reviewer,
            Role::Auditor => &self.auditor,
        }
    }

    /// Translate a single token.
    pub fn role(&self, token: &str) -> Result<Role, WorkflowError> {
        Role::ALL
            .into_iter()
            .find(|&role| self.token(role) == token)
            .ok_or_else(|| WorkflowError::UnknownRole(token.to_string()))
    }

    /// Translate the tokens a principal holds.
    ///
    /// Unknown tokens are dropped; they can never grant anything. The result
    /// keeps first-seen order and has no duplicates.
    pub fn parse_roles<I, S>(&self, tokens: I) -> Vec<Role>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = Vec::new();
        for token in tokens {
            match self.role(token.as_ref()) {
                Ok(role) if !roles.contains(&role) => roles.push(role),
                Ok(_) => {}
                Err(_) => debug!(token = token.as_ref(), "ignoring unknown role token"),
            }
        }
        roles
    }

    /// Check that no token is shared by two roles.
    ///
    /// [`RoleNames::role`] picks the first match, so a shared token would
    /// silently drop the other role.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        for (i, &first) in Role::ALL.iter().enumerate() {
            if let Some(&second) = Role::ALL[i + 1..]
                .iter()
                .find(|&&other| self.token(other) == self.token(first))
            {
                return Err(WorkflowError::DuplicateRoleToken {
                    token: self.token(first).to_string(),
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}
