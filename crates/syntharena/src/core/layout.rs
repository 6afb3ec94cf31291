//! Core layout trait for route positioning
//!
//! A layout algorithm takes a built route tree and assigns coordinates to
//! every node. Implementations must be pure: the same tree and settings
//! always yield the same output.

use anyhow::Result;

use crate::route::RouteTree;

/// Core trait for route layout algorithms
///
/// # Example
/// ```
/// use syntharena::core::LayoutAlgorithm;
/// use syntharena::layout::{LayoutConfig, TreeLayout};
/// use syntharena::route::{build_tree, RouteNode};
///
/// let tree = build_tree(&[RouteNode::molecule("A", None, "KEY-A")]).unwrap();
/// let positioned = TreeLayout::new(LayoutConfig::default()).layout(&tree).unwrap();
/// assert_eq!(positioned.nodes.len(), 1);
/// ```
pub trait LayoutAlgorithm: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Position every node of the tree
    fn layout(&self, tree: &RouteTree) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
