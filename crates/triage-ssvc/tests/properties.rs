//! Property-based tests for tree flattening and vector decoding.

use std::collections::HashSet;

use proptest::prelude::*;
use triage_ssvc::{
    decode, encode_timestamp, parse_timestamp, ChildRef, DecisionOption, DecisionPoint,
    DecisionTree, DecisionTreeDocument, DecisionType,
};

fn point(label: String, complex: bool, children: Vec<String>) -> DecisionPoint {
    DecisionPoint {
        key: label.to_lowercase(),
        decision_type: if complex {
            DecisionType::Complex
        } else {
            DecisionType::Simple
        },
        children: children.into_iter().map(|label| ChildRef { label }).collect(),
        options: vec![DecisionOption {
            key: "X".into(),
            label: format!("{label}-x"),
            description: String::new(),
            color: Some("#000000".into()),
            child_combinations: None,
        }],
        label,
    }
}

// Labels are drawn from a small alphabet so duplicates and cross references
// between points actually occur.
fn arb_point() -> impl Strategy<Value = DecisionPoint> {
    let label = prop::sample::select(vec!["A", "B", "C", "D", "E", "F", "G"]);
    (
        label.clone(),
        any::<bool>(),
        prop::collection::vec(label, 0..3),
    )
        .prop_map(|(l, complex, children)| {
            point(
                l.to_string(),
                complex,
                children.into_iter().map(String::from).collect(),
            )
        })
}

fn arb_tree() -> impl Strategy<Value = DecisionTree> {
    prop::collection::vec(arb_point(), 0..10).prop_map(|decision_points| {
        DecisionTree::from_document(DecisionTreeDocument {
            decision_points,
            decisions_table: serde_json::Value::Null,
            lang: "en".into(),
            title: "generated".into(),
            version: "0".into(),
        })
    })
}

proptest! {
    /// Main decision labels are unique and all come from the document.
    #[test]
    fn main_labels_unique_and_declared(tree in arb_tree()) {
        let declared: HashSet<&str> =
            tree.decision_points().iter().map(|p| p.label.as_str()).collect();
        let steps = tree.steps();
        let unique: HashSet<&str> = steps.iter().copied().collect();
        prop_assert_eq!(unique.len(), steps.len());
        prop_assert!(steps.iter().all(|s| declared.contains(s)));
    }

    /// No child of a complex point is a main decision.
    #[test]
    fn children_never_main(tree in arb_tree()) {
        let steps: HashSet<&str> = tree.steps().into_iter().collect();
        for p in tree.decision_points() {
            for child in p.child_labels() {
                prop_assert!(!steps.contains(child), "{} is both child and main", child);
            }
        }
    }

    /// Steps follow document order and re-parsing is stable.
    #[test]
    fn steps_in_document_order(tree in arb_tree()) {
        let again = DecisionTree::from_document(tree.document().clone());
        prop_assert_eq!(again.steps(), tree.steps());

        let positions: Vec<usize> = tree
            .main_decisions()
            .map(|m| {
                tree.decision_points()
                    .iter()
                    .rposition(|p| p.label == m.label)
                    .unwrap()
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Decoding arbitrary text never panics and always echoes the input.
    #[test]
    fn decode_never_panics(tree in arb_tree(), vector in ".*") {
        let obj = decode(&tree, &vector);
        prop_assert_eq!(obj.vector, vector);
    }

    /// Vectors whose path length matches neither count stay unresolved.
    #[test]
    fn mismatched_length_unresolved(tree in arb_tree(), extra in 1usize..4) {
        let len = tree.decision_point_count().max(tree.main_decision_count()) + extra;
        let path: Vec<String> = (0..len).map(|_| "k:X".to_string()).collect();
        let vector = format!("SSVCv2/{}/2024-01-01T00:00:00Z/", path.join("/"));
        let obj = decode(&tree, &vector);
        prop_assert!(obj.label.is_empty());
        prop_assert!(obj.color.is_empty());
    }

    /// Timestamps survive a round trip at second precision.
    #[test]
    fn timestamp_round_trip(secs in 0i64..4_102_444_800, nanos in 0u32..1_000_000_000) {
        let t = chrono::DateTime::from_timestamp(secs, nanos).unwrap();
        let parsed = parse_timestamp(&encode_timestamp(t)).unwrap();
        prop_assert_eq!(parsed.timestamp(), secs);
        prop_assert_eq!(parsed.timestamp_subsec_nanos(), 0);
    }
}
