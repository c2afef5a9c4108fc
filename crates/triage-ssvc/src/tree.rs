//! Decision tree loading and flattening.
//!
//! A tree document lists every decision point in declaration order. Points
//! that only exist as children of a complex point are not analyst steps on
//! their own; [`DecisionTree`] separates the top-level "main decisions" from
//! the rest once, at load time.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::{get_decision, DecisionPoint};
use crate::error::SsvcError;

/// The externally supplied tree description, as found in SSVC JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeDocument {
    pub decision_points: Vec<DecisionPoint>,
    /// Outcome lookup table. Passed through untouched.
    #[serde(default)]
    pub decisions_table: serde_json::Value,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
}

/// A loaded tree with its main decisions computed.
///
/// Immutable once built. Loading a different document builds a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    document: DecisionTreeDocument,
    /// Indices into `document.decision_points`, in document order.
    main: Vec<usize>,
}

impl DecisionTree {
    /// Build a tree from an already deserialised document.
    pub fn from_document(document: DecisionTreeDocument) -> Self {
        let main = main_decision_indices(&document.decision_points);
        debug!(
            title = %document.title,
            points = document.decision_points.len(),
            main = main.len(),
            "loaded decision tree"
        );
        Self { document, main }
    }

    /// Parse a tree from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SsvcError> {
        let document: DecisionTreeDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Parse a tree from JSON bytes.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, SsvcError> {
        let document: DecisionTreeDocument = serde_json::from_slice(json)?;
        Ok(Self::from_document(document))
    }

    pub fn document(&self) -> &DecisionTreeDocument {
        &self.document
    }

    /// Every decision point, in document order.
    pub fn decision_points(&self) -> &[DecisionPoint] {
        &self.document.decision_points
    }

    pub fn decisions_table(&self) -> &serde_json::Value {
        &self.document.decisions_table
    }

    /// The top-level decision points, in document order.
    pub fn main_decisions(&self) -> impl Iterator<Item = &DecisionPoint> + '_ {
        self.main.iter().map(|&i| &self.document.decision_points[i])
    }

    /// Labels of the main decisions, in the order an analyst walks them.
    pub fn steps(&self) -> Vec<&str> {
        self.main_decisions().map(|p| p.label.as_str()).collect()
    }

    pub fn main_decision_count(&self) -> usize {
        self.main.len()
    }

    pub fn decision_point_count(&self) -> usize {
        self.document.decision_points.len()
    }

    pub fn last_main_decision(&self) -> Option<&DecisionPoint> {
        self.main
            .last()
            .map(|&i| &self.document.decision_points[i])
    }

    pub fn last_decision_point(&self) -> Option<&DecisionPoint> {
        self.document.decision_points.last()
    }

    /// Find any decision point (main or child) by label.
    pub fn decision(&self, label: &str) -> Option<&DecisionPoint> {
        get_decision(&self.document.decision_points, label)
    }

    pub fn is_main(&self, label: &str) -> bool {
        self.main_decisions().any(|p| p.label == label)
    }

    /// Resolve a complex point's children against the full point set.
    ///
    /// Children whose label is not declared anywhere are skipped.
    pub fn children_of<'a>(&'a self, point: &'a DecisionPoint) -> Vec<&'a DecisionPoint> {
        point
            .child_labels()
            .filter_map(|label| self.decision(label))
            .collect()
    }
}

/// Compute which points are main decisions.
///
/// A point is a main decision when no complex point names it as a child.
/// When a label is declared more than once only its last declaration is
/// kept, so main decision labels are unique.
fn main_decision_indices(points: &[DecisionPoint]) -> Vec<usize> {
    let children: HashSet<&str> = points.iter().flat_map(|p| p.child_labels()).collect();

    let mut last_declared: HashMap<&str, usize> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        last_declared.insert(p.label.as_str(), i);
    }

    points
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            !children.contains(p.label.as_str()) && last_declared[p.label.as_str()] == *i
        })
        .map(|(i, _)| i)
        .collect()
}
