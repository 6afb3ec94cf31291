//! Route layout engine
//!
//! Positions every node of a [`crate::route::RouteTree`] for a top-down
//! (or left-right) tree diagram and derives edge paths for a renderer.

mod config;
mod tree_layout;

pub use config::{
    LayoutConfig, HORIZONTAL_SPACING, NODE_HEIGHT, NODE_WIDTH, VERTICAL_SPACING,
};
pub use tree_layout::{PositionedEdge, PositionedNode, PositionedTree, TreeLayout};
