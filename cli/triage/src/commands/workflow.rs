//! CLI subcommands for workflow permission checks.

use triage_workflow::{
    allowed_transitions, comment_outcome, is_transition_allowed, Role, RoleNames, WorkflowError,
    WorkflowState,
};

fn parse_state(s: &str) -> anyhow::Result<WorkflowState> {
    Ok(s.parse::<WorkflowState>()?)
}

fn format_roles(roles: &[Role], names: &RoleNames) -> String {
    if roles.is_empty() {
        return "(none)".to_string();
    }
    roles
        .iter()
        .map(|&r| names.token(r))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `triage workflow check`: returns whether the transition is allowed.
pub fn check(names: &RoleNames, tokens: &[String], from: &str, to: &str) -> anyhow::Result<bool> {
    let roles = names.parse_roles(tokens);
    let (from, to) = (parse_state(from)?, parse_state(to)?);
    let allowed = is_transition_allowed(&roles, from, to);
    tracing::debug!(%from, %to, ?roles, allowed, "checked transition");
    if allowed {
        println!("allowed: {from} -> {to}");
    } else {
        println!(
            "denied: {from} -> {to} (roles: {})",
            format_roles(&roles, names)
        );
    }
    Ok(allowed)
}

/// Target states reachable from `from` for the given role tokens.
pub fn targets(names: &RoleNames, tokens: &[String], from: &str) -> anyhow::Result<Vec<WorkflowState>> {
    let roles = names.parse_roles(tokens);
    let from = parse_state(from)?;
    Ok(allowed_transitions(&roles, from)
        .into_iter()
        .map(|t| t.to)
        .collect())
}

/// `triage workflow list`: print the allowed target states.
pub fn list(names: &RoleNames, tokens: &[String], from: &str, json: bool) -> anyhow::Result<()> {
    let targets = targets(names, tokens, from)?;
    if json {
        println!("{}", serde_json::to_string(&targets)?);
        return Ok(());
    }
    if targets.is_empty() {
        println!("No transitions available.");
    }
    for to in targets {
        println!("{to}");
    }
    Ok(())
}

/// `triage workflow comment`: may these roles add a comment in `state`?
pub fn comment(names: &RoleNames, tokens: &[String], state: &str) -> anyhow::Result<bool> {
    let roles = names.parse_roles(tokens);
    let state = parse_state(state)?;
    match comment_outcome(&roles, state) {
        Ok(Some(next)) => println!("allowed: commenting moves {state} -> {next}"),
        Ok(None) => println!("allowed: commenting in state {state}"),
        Err(e @ (WorkflowError::CommentForbidden(_) | WorkflowError::Forbidden { .. })) => {
            tracing::debug!(%state, ?roles, "comment denied");
            println!("denied: {e}");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn check_allows_and_denies() {
        let names = RoleNames::default();
        assert!(check(&names, &tokens(&["reviewer"]), "review", "archived").unwrap());
        assert!(!check(&names, &tokens(&["editor"]), "review", "archived").unwrap());
    }

    #[test]
    fn check_rejects_unknown_state() {
        let names = RoleNames::default();
        let err = check(&names, &tokens(&["editor"]), "new", "closed").unwrap_err();
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn targets_follow_table_order() {
        let names = RoleNames::default();
        assert_eq!(
            targets(&names, &tokens(&["reviewer"]), "review").unwrap(),
            vec![
                WorkflowState::Assessing,
                WorkflowState::Archived,
                WorkflowState::Deleted
            ]
        );
        assert!(targets(&names, &tokens(&["editor"]), "review")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn comment_respects_custom_tokens() {
        let names = RoleNames {
            admin: "root".into(),
            ..RoleNames::default()
        };
        assert!(comment(&names, &tokens(&["root"]), "deleted").unwrap());
        assert!(!comment(&names, &tokens(&["admin"]), "deleted").unwrap());
    }

    #[test]
    fn comment_on_read_requires_editor() {
        let names = RoleNames::default();
        assert!(comment(&names, &tokens(&["editor"]), "read").unwrap());
        assert!(!comment(&names, &tokens(&["reviewer"]), "read").unwrap());
        assert!(!comment(&names, &tokens(&["auditor"]), "read").unwrap());
        assert!(comment(&names, &tokens(&["auditor"]), "assessing").unwrap());
    }

    #[test]
    fn role_list_uses_deployment_tokens() {
        let names = RoleNames {
            editor: "bearbeiter".into(),
            ..RoleNames::default()
        };
        assert_eq!(
            format_roles(&[Role::Editor, Role::Reviewer], &names),
            "bearbeiter, reviewer"
        );
        assert_eq!(format_roles(&[], &names), "(none)");
    }
}
