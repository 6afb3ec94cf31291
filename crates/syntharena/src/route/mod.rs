//! Synthesis routes
//!
//! Flat route node records, the builder that links them into a rooted
//! [`RouteTree`], and route-level summaries (metrics, stock checks).

mod builder;
mod metrics;
mod node;
mod stock;
mod tree;

pub use builder::{build_tree, build_tree_lenient, BuildOutcome, BuildPolicy, TreeBuilder};
pub use metrics::RouteMetrics;
pub use node::{ChemicalEntity, EntityKind, IdentityKey, RouteNode};
pub use stock::{Stock, StockCheck};
pub use tree::{NodeIndex, RouteTree, TreeNode};
