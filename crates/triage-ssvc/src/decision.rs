//! Decision point types for SSVC decision trees.
//!
//! These mirror the JSON shape of the published SSVC tree files
//! (`decision_points`, `decisions_table`, ...). A decision point is either
//! `simple`, carrying its own options, or `complex`, in which case its
//! outcome is derived from the child points it names by label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a decision point stands alone or aggregates children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    /// Chosen directly by the analyst.
    Simple,
    /// Derived from the options chosen for its children.
    Complex,
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionType::Simple => write!(f, "simple"),
            DecisionType::Complex => write!(f, "complex"),
        }
    }
}

/// Reference from a complex point to one of its children, by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub label: String,
}

/// One entry of an option's child combination table.
///
/// Carried through untouched; the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildCombinationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_key: Option<String>,
    pub child_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_option_keys: Option<Vec<String>>,
    #[serde(default)]
    pub child_option_labels: Vec<String>,
}

/// A selectable option of a decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Short key, unique within its decision point. Used in vectors.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Display color, usually only set on the final outcome point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Which child option combinations lead to this option (complex points).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_combinations: Option<Vec<Vec<ChildCombinationItem>>>,
}

/// A decision point in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPoint {
    /// Unique label; children refer to points by this value.
    pub label: String,
    /// Short key used as the left-hand side of vector fragments.
    pub key: String,
    pub decision_type: DecisionType,
    #[serde(default)]
    pub children: Vec<ChildRef>,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
}

impl DecisionPoint {
    pub fn is_complex(&self) -> bool {
        self.decision_type == DecisionType::Complex
    }

    /// Labels of the children this point delegates to.
    ///
    /// Always empty for simple points, even if the source data listed children.
    pub fn child_labels(&self) -> impl Iterator<Item = &str> {
        let children: &[ChildRef] = if self.is_complex() {
            &self.children
        } else {
            &[]
        };
        children.iter().map(|c| c.label.as_str())
    }

    /// Look up one of this point's options by key.
    pub fn option(&self, key: &str) -> Option<&DecisionOption> {
        get_option_with_key(self, key)
    }
}

/// Find a decision point by exact label.
pub fn get_decision<'a>(points: &'a [DecisionPoint], label: &str) -> Option<&'a DecisionPoint> {
    points.iter().find(|p| p.label == label)
}

/// Find an option of a decision point by exact key.
pub fn get_option_with_key<'a>(point: &'a DecisionPoint, key: &str) -> Option<&'a DecisionOption> {
    point.options.iter().find(|o| o.key == key)
}
