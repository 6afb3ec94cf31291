//! Property tests over randomly shaped routes

use proptest::prelude::*;
use proptest::sample::Index;

use syntharena::compare::{compare_routes, ComparisonBuilder, ComparisonConfig};
use syntharena::core::{ComparisonMode, ComparisonStatus, Direction, Point};
use syntharena::layout::{LayoutConfig, PositionedTree, TreeLayout};
use syntharena::route::{build_tree, NodeIndex, RouteNode, RouteTree};

const EPS: f64 = 1e-6;

/// A valid route of 1..=40 records in shuffled order
///
/// Record `n{i}` (i > 0) hangs off a random earlier record. Keys come
/// from a small pool so some entities repeat.
fn route_records() -> impl Strategy<Value = Vec<RouteNode>> {
    prop::collection::vec((any::<Index>(), 0u8..6), 0..40).prop_flat_map(|links| {
        let mut records = vec![RouteNode::molecule("n0", None, "K-root")];
        for (i, (parent, key)) in links.iter().enumerate() {
            let id = i + 1;
            let parent_id = format!("n{}", parent.index(id));
            records.push(RouteNode::molecule(
                format!("n{}", id),
                Some(parent_id.as_str()),
                &format!("K{}", key),
            ));
        }
        Just(records).prop_shuffle()
    })
}

fn layout_config() -> impl Strategy<Value = LayoutConfig> {
    (1.0f64..300.0, 1.0f64..200.0, 0.0f64..100.0, 0.0f64..100.0, any::<bool>()).prop_map(
        |(width, height, h_spacing, v_spacing, left_right)| {
            let direction = if left_right {
                Direction::LeftRight
            } else {
                Direction::TopDown
            };
            LayoutConfig::default()
                .with_node_size(width, height)
                .with_spacing(h_spacing, v_spacing)
                .with_direction(direction)
        },
    )
}

/// Position along the sibling axis
fn along(tree: &PositionedTree, index: NodeIndex) -> f64 {
    let node = tree.node(index);
    if tree.direction == Direction::LeftRight {
        node.y
    } else {
        node.x
    }
}

fn breadth(config: &LayoutConfig) -> f64 {
    if config.direction == Direction::LeftRight {
        config.node_height
    } else {
        config.node_width
    }
}

fn with_prefix(records: &[RouteNode], prefix: &str) -> Vec<RouteNode> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.entity.key = format!("{}{}", prefix, record.entity.key).into();
            record
        })
        .collect()
}

proptest! {
    #[test]
    fn build_preserves_node_count(records in route_records()) {
        let tree = build_tree(&records).unwrap();
        prop_assert_eq!(tree.len(), records.len());
        prop_assert_eq!(tree.root().id(), "n0");
    }

    #[test]
    fn children_follow_their_parent(records in route_records()) {
        let tree: RouteTree = build_tree(&records).unwrap();
        for (index, node) in tree.iter() {
            for child in &node.children {
                prop_assert!(child.get() > index.get());
                let child_node = tree.node(*child);
                prop_assert_eq!(child_node.parent, Some(index));
                prop_assert_eq!(child_node.depth, node.depth + 1);
            }
        }
    }

    #[test]
    fn subtree_width_covers_node_and_children(
        records in route_records(),
        config in layout_config(),
    ) {
        let tree = build_tree(&records).unwrap();
        let widths = TreeLayout::new(config).subtree_widths(&tree);
        for (index, node) in tree.iter() {
            let width = widths[index.get()];
            prop_assert!(width + EPS >= breadth(&config));
            let children: f64 = node.children.iter().map(|c| widths[c.get()]).sum();
            let gaps = config.horizontal_spacing * node.children.len().saturating_sub(1) as f64;
            prop_assert!(width + EPS >= children + gaps);
        }
    }

    #[test]
    fn siblings_never_overlap(records in route_records(), config in layout_config()) {
        let tree = build_tree(&records).unwrap();
        let positioned = TreeLayout::new(config).layout_at(&tree, Point::default()).unwrap();

        // Whole sibling subtrees, not just the sibling boxes, stay apart.
        for (_, node) in tree.iter() {
            for pair in node.children.windows(2) {
                let left_half = positioned.node(pair[0]).subtree_width / 2.0;
                let right_half = positioned.node(pair[1]).subtree_width / 2.0;
                let left = along(&positioned, pair[0]) + left_half;
                let right = along(&positioned, pair[1]) - right_half;
                prop_assert!(left <= right + EPS);
            }
        }
    }

    #[test]
    fn levels_share_one_coordinate(records in route_records(), config in layout_config()) {
        let tree = build_tree(&records).unwrap();
        let positioned = TreeLayout::new(config).layout_at(&tree, Point::default()).unwrap();
        for node in &positioned.nodes {
            let across = if config.direction == Direction::LeftRight { node.x } else { node.y };
            let step = if config.direction == Direction::LeftRight {
                config.node_width + config.vertical_spacing
            } else {
                config.level_height()
            };
            prop_assert!((across - node.depth as f64 * step).abs() < EPS);
        }
    }

    #[test]
    fn layout_is_idempotent(records in route_records(), config in layout_config()) {
        let tree = build_tree(&records).unwrap();
        let layout = TreeLayout::new(config);
        let first = layout.layout_at(&tree, Point::default()).unwrap();
        let second = layout.layout_at(&tree, Point::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn identical_reference_is_all_shared(records in route_records()) {
        let prediction = build_tree(&records).unwrap();
        let reference = build_tree(&records).unwrap();
        let graph = compare_routes(ComparisonMode::Overlay, &prediction, &[reference]).unwrap();
        let overlay = graph.as_overlay().unwrap();

        prop_assert!(overlay.nodes.iter().all(|n| n.status == ComparisonStatus::Shared));
        prop_assert!(overlay.reference_only.is_empty());
        prop_assert_eq!(graph.summary.exact_match, Some(0));
    }

    #[test]
    fn overlay_draws_reference_only_nodes_outside_prediction(
        records in route_records(),
        config in layout_config(),
    ) {
        let prediction = build_tree(&records).unwrap();
        let reference = build_tree(&with_prefix(&records, "REF-")).unwrap();
        let plain = TreeLayout::new(config).layout_at(&prediction, Point::default()).unwrap();
        let graph = ComparisonBuilder::new(ComparisonConfig::default().with_layout(config))
            .build(ComparisonMode::Overlay, &prediction, &[reference])
            .unwrap();
        let overlay = graph.as_overlay().unwrap();

        // Repeated keys are drawn once.
        prop_assert_eq!(overlay.reference_only.len(), graph.summary.reference_only);
        prop_assert_eq!(overlay.nodes.len(), plain.nodes.len() + overlay.reference_only.len());
        for (entry, node) in overlay.nodes.iter().zip(&plain.nodes) {
            prop_assert_eq!(entry.node.center(), node.center());
        }
        for entity in &overlay.reference_only {
            let entry = overlay.node(entity.index);
            prop_assert_eq!(entry.status, ComparisonStatus::ReferenceOnly);
            let bounds = entry.node.bounds();
            if config.direction == Direction::LeftRight {
                prop_assert!(bounds.min_y + EPS >= plain.bounds.max_y);
            } else {
                prop_assert!(bounds.min_x + EPS >= plain.bounds.max_x);
            }
        }
    }

    #[test]
    fn disjoint_reference_is_all_prediction_only(records in route_records()) {
        let prediction = build_tree(&records).unwrap();
        let reference = build_tree(&with_prefix(&records, "REF-")).unwrap();
        let graph = compare_routes(ComparisonMode::SideBySide, &prediction, &[reference]).unwrap();
        let view = graph.as_side_by_side().unwrap();

        prop_assert!(view
            .prediction()
            .nodes
            .iter()
            .all(|n| n.status == ComparisonStatus::PredictionOnly));
        prop_assert!(view.references()[0]
            .nodes
            .iter()
            .all(|n| n.status == ComparisonStatus::ReferenceOnly));
        prop_assert_eq!(graph.summary.shared, 0);
    }
}
