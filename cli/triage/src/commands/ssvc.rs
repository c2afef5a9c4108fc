//! CLI subcommands for SSVC decision trees and vectors.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use triage_ssvc::{decode, parse_timestamp, DecisionTree, Selection, SsvcObject, VectorBuilder};

/// Load a decision tree from a file, or the bundled sample tree.
pub fn load_tree(path: Option<&Path>) -> anyhow::Result<DecisionTree> {
    match path {
        Some(path) => {
            let data =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            DecisionTree::from_json_slice(&data)
                .with_context(|| format!("loading decision tree {}", path.display()))
        }
        None => {
            tracing::debug!("no decision tree configured, using bundled sample");
            DecisionTree::from_json_str(triage_ssvc::SAMPLE_TREE)
                .context("loading bundled decision tree")
        }
    }
}

/// Render the main decision steps, one per line, with their short keys.
pub fn format_steps(tree: &DecisionTree) -> String {
    let mut text = String::new();
    let title = &tree.document().title;
    if !title.is_empty() {
        text.push_str(&format!("{title} ({})\n", tree.document().version));
    }
    for (i, point) in tree.main_decisions().enumerate() {
        text.push_str(&format!("{:>2}. {:<4} {}", i + 1, point.key, point.label));
        if point.is_complex() {
            let children: Vec<&str> = tree
                .children_of(point)
                .into_iter()
                .map(|c| c.label.as_str())
                .collect();
            text.push_str(&format!("  [{}]", children.join(", ")));
        }
        text.push('\n');
    }
    text
}

/// `triage ssvc steps`: list the main decisions of the tree.
pub fn steps(tree_path: Option<&Path>) -> anyhow::Result<()> {
    let tree = load_tree(tree_path)?;
    print!("{}", format_steps(&tree));
    Ok(())
}

/// `triage ssvc decode <vector>`: show the outcome recorded in a vector.
pub fn decode_vector(tree_path: Option<&Path>, vector: &str, json: bool) -> anyhow::Result<()> {
    let tree = load_tree(tree_path)?;
    let obj = decode(&tree, vector);
    if json {
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        println!("{}", format_outcome(&obj));
    }
    Ok(())
}

pub fn format_outcome(obj: &SsvcObject) -> String {
    if obj.label.is_empty() {
        return "Outcome: (unresolved)".to_string();
    }
    if obj.color.is_empty() {
        format!("Outcome: {}", obj.label)
    } else {
        format!("Outcome: {} ({})", obj.label, obj.color)
    }
}

/// Build a vector from `key:option` fragments.
pub fn build_vector(
    scheme: &str,
    fragments: &[String],
    at: Option<&str>,
) -> anyhow::Result<String> {
    let selections = fragments
        .iter()
        .map(|f| {
            Selection::parse(f)
                .with_context(|| format!("invalid choice '{f}', expected KEY:OPTION"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let at: DateTime<Utc> = match at {
        Some(s) => parse_timestamp(s)?,
        None => Utc::now(),
    };

    Ok(VectorBuilder::from_selections(scheme, selections).build(at))
}

/// `triage ssvc encode`: print a vector for the given choices.
pub fn encode(scheme: &str, fragments: &[String], at: Option<&str>) -> anyhow::Result<()> {
    println!("{}", build_vector(scheme, fragments, at)?);
    Ok(())
}

/// `triage ssvc timestamp`: print the current time in vector format.
pub fn timestamp() -> anyhow::Result<()> {
    println!("{}", triage_ssvc::now_timestamp());
    Ok(())
}
