//! Summary numbers for a route

use serde::Serialize;

use super::{EntityKind, RouteTree};

/// Size and shape of one route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMetrics {
    pub node_count: usize,
    pub depth: usize,
    /// Starting materials
    pub leaf_count: usize,
    /// Synthesis steps
    pub reaction_count: usize,
}

impl RouteMetrics {
    /// Reaction nodes count as steps when a route carries them; otherwise
    /// each internal molecule node is one disconnection.
    pub fn of(tree: &RouteTree) -> Self {
        let explicit_reactions = tree
            .iter()
            .filter(|(_, node)| node.record.entity.kind == EntityKind::Reaction)
            .count();
        let internal = tree.iter().filter(|(_, node)| !node.is_leaf()).count();

        Self {
            node_count: tree.len(),
            depth: tree.depth(),
            leaf_count: tree.len() - internal,
            reaction_count: if explicit_reactions > 0 {
                explicit_reactions
            } else {
                internal
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{build_tree, ChemicalEntity, RouteNode};

    #[test]
    fn test_single_node() {
        let tree = build_tree(&[RouteNode::molecule("T", None, "T")]).unwrap();
        let metrics = RouteMetrics::of(&tree);
        assert_eq!(metrics.node_count, 1);
        assert_eq!(metrics.depth, 0);
        assert_eq!(metrics.leaf_count, 1);
        assert_eq!(metrics.reaction_count, 0);
    }

    #[test]
    fn test_molecule_only_route() {
        let tree = build_tree(&[
            RouteNode::molecule("T", None, "T"),
            RouteNode::molecule("I", Some("T"), "I"),
            RouteNode::molecule("S1", Some("T"), "S1"),
            RouteNode::molecule("S2", Some("I"), "S2"),
            RouteNode::molecule("S3", Some("I"), "S3"),
        ])
        .unwrap();
        let metrics = RouteMetrics::of(&tree);
        assert_eq!(metrics.leaf_count, 3);
        assert_eq!(metrics.reaction_count, 2);
        assert_eq!(metrics.depth, 2);
    }

    #[test]
    fn test_route_with_reaction_nodes() {
        let tree = build_tree(&[
            RouteNode::molecule("T", None, "T"),
            RouteNode::new("R1", Some("T"), ChemicalEntity::reaction("R1")),
            RouteNode::molecule("S1", Some("R1"), "S1"),
            RouteNode::molecule("S2", Some("R1"), "S2"),
        ])
        .unwrap();
        let metrics = RouteMetrics::of(&tree);
        assert_eq!(metrics.reaction_count, 1);
        assert_eq!(metrics.depth, 2);
    }
}
