//! Hierarchical route tree
//!
//! An arena of nodes addressed by [`NodeIndex`]. The root always sits at
//! index 0 and nodes are stored breadth-first, so every child has a larger
//! index than its parent. Walking the arena backwards therefore visits
//! children before parents.

use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};

use super::{IdentityKey, RouteNode};

/// Position of a node inside a [`RouteTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub fn get(self) -> usize {
        self.0
    }
}

/// A route node linked into its tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub record: RouteNode,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub depth: usize,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn key(&self) -> &IdentityKey {
        &self.record.entity.key
    }
}

/// A rooted synthesis route
///
/// Only [`crate::route::TreeBuilder`] creates trees, which guarantees a
/// non-empty arena with the root at index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTree {
    nodes: Vec<TreeNode>,
}

impl RouteTree {
    /// Assemble a tree from records and child lists
    ///
    /// `children[i]` lists record positions of the children of `records[i]`,
    /// already in sibling order. Records not reachable from `root` are left
    /// out.
    pub(crate) fn from_links(
        records: &[RouteNode],
        children: &[Vec<usize>],
        root: usize,
    ) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(records.len());
        let mut queue: VecDeque<(usize, Option<NodeIndex>, usize)> = VecDeque::new();
        queue.push_back((root, None, 0));

        while let Some((record, parent, depth)) = queue.pop_front() {
            let index = NodeIndex(nodes.len());
            nodes.push(TreeNode {
                record: records[record].clone(),
                parent,
                children: Vec::with_capacity(children[record].len()),
                depth,
            });
            if let Some(parent) = parent {
                nodes[parent.0].children.push(index);
            }
            for &child in &children[record] {
                queue.push_back((child, Some(index), depth + 1));
            }
        }

        Self { nodes }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Get a node by index
    ///
    /// # Panics
    /// Panics if the index does not belong to this tree.
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.0]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by its record identifier
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|node| node.record.id == id)
            .map(NodeIndex)
    }

    pub fn children(&self, index: NodeIndex) -> impl Iterator<Item = &TreeNode> {
        self.nodes[index.0]
            .children
            .iter()
            .map(move |child| &self.nodes[child.0])
    }

    /// Breadth-first iteration with indices
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Depth-first, parent before children, siblings in order
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeIndex::ROOT];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index.0].children.iter().rev().copied());
        }
        order
    }

    /// Largest node depth; 0 for a single-node route
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Leaf nodes, i.e. starting materials
    pub fn leaves(&self) -> impl Iterator<Item = (NodeIndex, &TreeNode)> {
        self.iter().filter(|(_, node)| node.is_leaf())
    }

    /// Every distinct identity key in the tree
    pub fn identity_keys(&self) -> BTreeSet<IdentityKey> {
        self.nodes.iter().map(|node| node.key().clone()).collect()
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.nodes.iter().any(|node| node.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use crate::route::{build_tree, RouteNode};

    fn sample() -> Vec<RouteNode> {
        vec![
            RouteNode::molecule("A", None, "KA"),
            RouteNode::molecule("B", Some("A"), "KB"),
            RouteNode::molecule("C", Some("A"), "KC"),
            RouteNode::molecule("D", Some("B"), "KD"),
            RouteNode::molecule("E", Some("B"), "KC"),
        ]
    }

    #[test]
    fn test_root_at_index_zero() {
        let tree = build_tree(&sample()).unwrap();
        assert_eq!(tree.root().id(), "A");
        assert_eq!(tree.root().depth, 0);
        assert!(tree.root().parent.is_none());
    }

    #[test]
    fn test_children_after_parents() {
        let tree = build_tree(&sample()).unwrap();
        for (index, node) in tree.iter() {
            for child in &node.children {
                assert!(child.get() > index.get());
            }
        }
    }

    #[test]
    fn test_preorder() {
        let tree = build_tree(&sample()).unwrap();
        let ids: Vec<&str> = tree
            .preorder()
            .into_iter()
            .map(|i| tree.node(i).id())
            .collect();
        assert_eq!(ids, vec!["A", "B", "D", "E", "C"]);
    }

    #[test]
    fn test_depth_and_leaves() {
        let tree = build_tree(&sample()).unwrap();
        assert_eq!(tree.depth(), 2);
        let mut leaves: Vec<&str> = tree.leaves().map(|(_, n)| n.id()).collect();
        leaves.sort();
        assert_eq!(leaves, vec!["C", "D", "E"]);
    }

    #[test]
    fn test_identity_keys_collapse_duplicates() {
        let tree = build_tree(&sample()).unwrap();
        let keys = tree.identity_keys();
        assert_eq!(keys.len(), 4);
        assert!(tree.contains_key(&"KC".into()));
        assert!(!tree.contains_key(&"KZ".into()));
    }

    #[test]
    fn test_find() {
        let tree = build_tree(&sample()).unwrap();
        let d = tree.find("D").unwrap();
        assert_eq!(tree.node(d).depth, 2);
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_children_iterator() {
        let tree = build_tree(&sample()).unwrap();
        let b = tree.find("B").unwrap();
        let ids: Vec<&str> = tree.children(b).map(|n| n.id()).collect();
        assert_eq!(ids, vec!["D", "E"]);
    }
}
