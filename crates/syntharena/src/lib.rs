//! SynthArena route core
//!
//! Builds retrosynthesis route trees from flat, parent-linked node records,
//! lays them out for drawing, and compares predicted routes with reference
//! routes.
//!
//! # Quick Start
//!
//! ```rust
//! use syntharena::prelude::*;
//!
//! let records = vec![
//!     RouteNode::molecule("A", None, "TARGET"),
//!     RouteNode::molecule("B", Some("A"), "SM-1"),
//!     RouteNode::molecule("C", Some("A"), "SM-2"),
//! ];
//!
//! let positioned = syntharena::layout_route(&records, LayoutConfig::default()).unwrap();
//! let a = positioned.find("A").unwrap();
//! let b = positioned.find("B").unwrap();
//! let c = positioned.find("C").unwrap();
//! assert_eq!(a.x, (b.x + c.x) / 2.0);
//! ```
//!
//! # Comparing routes
//!
//! ```rust
//! use syntharena::prelude::*;
//!
//! let prediction = build_tree(&[RouteNode::molecule("p", None, "TARGET")]).unwrap();
//! let reference = build_tree(&[RouteNode::molecule("r", None, "TARGET")]).unwrap();
//!
//! let graph = compare_routes(ComparisonMode::Overlay, &prediction, &[reference]).unwrap();
//! let overlay = graph.as_overlay().unwrap();
//! assert_eq!(overlay.status("p"), Some(ComparisonStatus::Shared));
//! ```

pub mod compare;
pub mod core;
pub mod layout;
pub mod route;
pub mod util;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compare::{
        compare_routes, ComparisonBuilder, ComparisonConfig, ComparisonGraph, ComparisonNode,
        ComparisonSummary,
    };
    pub use crate::core::{
        ComparisonMode, ComparisonStatus, Direction, LayoutAlgorithm, NodeSource, Point,
        RouteError,
    };
    pub use crate::layout::{LayoutConfig, PositionedNode, PositionedTree, TreeLayout};
    pub use crate::route::{
        build_tree, build_tree_lenient, ChemicalEntity, IdentityKey, RouteNode, RouteTree,
        TreeBuilder,
    };
}

use crate::compare::{ComparisonBuilder, ComparisonConfig, ComparisonGraph};
use crate::layout::{LayoutConfig, PositionedTree, TreeLayout};
use crate::route::{build_tree, RouteNode, RouteTree};

/// Build and lay out one route from its flat records
///
/// # Example
/// ```rust
/// use syntharena::layout::LayoutConfig;
/// use syntharena::route::RouteNode;
///
/// let records = vec![RouteNode::molecule("A", None, "K")];
/// let positioned = syntharena::layout_route(&records, LayoutConfig::default()).unwrap();
/// assert_eq!(positioned.nodes.len(), 1);
/// ```
pub fn layout_route(
    records: &[RouteNode],
    config: LayoutConfig,
) -> Result<PositionedTree, RouteError> {
    let tree = build_tree(records)?;
    TreeLayout::new(config).layout_at(&tree, Point::default())
}

/// Build a prediction and its references from flat records and compare them
pub fn compare_records(
    mode: ComparisonMode,
    prediction: &[RouteNode],
    references: &[Vec<RouteNode>],
    config: ComparisonConfig,
) -> Result<ComparisonGraph, RouteError> {
    let prediction = build_tree(prediction)?;
    let references = references
        .iter()
        .map(|records| build_tree(records))
        .collect::<Result<Vec<RouteTree>, _>>()?;
    ComparisonBuilder::new(config).build(mode, &prediction, &references)
}
