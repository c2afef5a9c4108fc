//! SSVC decision trees for vulnerability triage.
//!
//! A stakeholder-specific decision tree is a list of decision points. Some
//! are chosen directly by the analyst ("main decisions"); complex points
//! aggregate child points that are only reachable through them. The
//! [`DecisionTree`] computes that split once when a tree document is
//! loaded.
//!
//! Choices are recorded as compact vector strings. [`decode`] turns such a
//! vector back into the outcome label and color without replaying the walk.

pub mod decision;
pub mod error;
pub mod timestamp;
pub mod tree;
pub mod vector;

pub use decision::{
    get_decision, get_option_with_key, ChildCombinationItem, ChildRef, DecisionOption,
    DecisionPoint, DecisionType,
};
pub use error::SsvcError;
pub use timestamp::{encode_timestamp, now_timestamp, parse_timestamp};
pub use tree::{DecisionTree, DecisionTreeDocument};
pub use vector::{decode, vector_path, Selection, SsvcObject, VectorBuilder, DEFAULT_SCHEME};

/// A coordinator-style sample tree (SSVC 2.0.3 shape) shipped with the crate.
pub const SAMPLE_TREE: &str = include_str!("../data/sample-coordinator.json");
