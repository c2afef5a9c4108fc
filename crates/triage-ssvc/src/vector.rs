//! SSVC vector strings.
//!
//! A vector records the choices made while walking a tree:
//!
//! ```text
//! SSVCv2/E:A/A:Y/T:T/P:E/B:I/M:H/D:C/2024-05-06T07:08:09Z/
//! ```
//!
//! The first segment is the scheme marker, the last two are metadata (the
//! timestamp and the empty segment after the trailing `/`). Everything in
//! between is the path of `decision_key:option_key` fragments.
//!
//! Decoding only resolves the final fragment. Whether that fragment belongs
//! to the last main decision or to the last raw decision point is inferred
//! from the path length alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::DecisionPoint;
use crate::timestamp::encode_timestamp;
use crate::tree::DecisionTree;

/// Scheme marker written by current SSVC tooling.
pub const DEFAULT_SCHEME: &str = "SSVCv2";

/// A decoded vector with its outcome display fields.
///
/// `label` and `color` are empty when the outcome could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsvcObject {
    pub vector: String,
    pub label: String,
    pub color: String,
}

/// Extract the `key:option` fragments of a vector.
///
/// Vectors with fewer than three segments have an empty path.
pub fn vector_path(vector: &str) -> Vec<&str> {
    let segments: Vec<&str> = vector.split('/').collect();
    if segments.len() < 3 {
        return Vec::new();
    }
    segments[1..segments.len() - 2].to_vec()
}

/// Option key of the last path fragment, if it has one.
fn selected_option_key<'a>(path: &[&'a str]) -> Option<&'a str> {
    let last: &'a str = path.last().copied()?;
    last.split(':').nth(1)
}

/// Pick the decision point the final fragment is interpreted against.
///
/// A path as long as the main decision list ends at the last main decision;
/// one as long as the full point list ends at the last raw point. The main
/// decision interpretation wins when both lengths coincide.
fn resolving_point(tree: &DecisionTree, path_len: usize) -> Option<&DecisionPoint> {
    if path_len == tree.main_decision_count() {
        tree.last_main_decision()
    } else if path_len == tree.decision_point_count() {
        tree.last_decision_point()
    } else {
        None
    }
}

/// Decode a vector into its outcome label and color.
///
/// Never fails: anything that cannot be resolved yields empty display
/// fields, and the input vector is always echoed back unchanged.
pub fn decode(tree: &DecisionTree, vector: &str) -> SsvcObject {
    let path = vector_path(vector);
    let option = selected_option_key(&path).and_then(|key| {
        resolving_point(tree, path.len()).and_then(|point| point.option(key))
    });

    match option {
        Some(option) => SsvcObject {
            vector: vector.to_string(),
            label: option.label.clone(),
            color: option.color.clone().unwrap_or_default(),
        },
        None => {
            debug!(
                vector,
                path_len = path.len(),
                main = tree.main_decision_count(),
                points = tree.decision_point_count(),
                "vector outcome unresolved"
            );
            SsvcObject {
                vector: vector.to_string(),
                label: String::new(),
                color: String::new(),
            }
        }
    }
}

/// A single analyst choice: which option was picked for which point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub decision_key: String,
    pub option_key: String,
}

impl Selection {
    pub fn new(decision_key: impl Into<String>, option_key: impl Into<String>) -> Self {
        Self {
            decision_key: decision_key.into(),
            option_key: option_key.into(),
        }
    }

    /// Parse a `key:option` fragment.
    ///
    /// Fragments with a second `:` are rejected: [`decode`] only reads the
    /// field between the first and second `:`, so such an option could never
    /// be resolved.
    pub fn parse(fragment: &str) -> Option<Self> {
        let (decision_key, option_key) = fragment.split_once(':')?;
        if option_key.contains(':') {
            return None;
        }
        Some(Self::new(decision_key, option_key))
    }
}

/// Builds canonical vector strings in the format [`decode`] reads.
#[derive(Debug, Clone)]
pub struct VectorBuilder {
    scheme: String,
    selections: Vec<Selection>,
}

impl VectorBuilder {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            selections: Vec::new(),
        }
    }

    pub fn from_selections(scheme: impl Into<String>, selections: Vec<Selection>) -> Self {
        Self {
            scheme: scheme.into(),
            selections,
        }
    }

    /// Builder: record the option chosen for a decision point.
    pub fn choice(mut self, decision_key: impl Into<String>, option_key: impl Into<String>) -> Self {
        self.selections.push(Selection::new(decision_key, option_key));
        self
    }

    /// Builder: record a choice using the point's own short key.
    pub fn choose(self, point: &DecisionPoint, option_key: impl Into<String>) -> Self {
        let key = point.key.clone();
        self.choice(key, option_key)
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Render the vector, stamped with the given instant.
    pub fn build(&self, at: DateTime<Utc>) -> String {
        let mut vector = self.scheme.clone();
        vector.push('/');
        for s in &self.selections {
            vector.push_str(&s.decision_key);
            vector.push(':');
            vector.push_str(&s.option_key);
            vector.push('/');
        }
        vector.push_str(&encode_timestamp(at));
        vector.push('/');
        vector
    }
}
