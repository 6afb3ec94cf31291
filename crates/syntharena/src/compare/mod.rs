//! Route comparison
//!
//! Compares a predicted route with one or more reference routes by
//! chemical identity key and produces positioned, status-tagged graphs for
//! the side-by-side and diff overlay display modes.

mod builder;
mod overlay;
mod side_by_side;
mod summary;

pub use builder::{
    compare_routes, ComparisonBuilder, ComparisonConfig, ComparisonGraph, ComparisonNode,
    ComparisonView, PANEL_GAP,
};
pub use overlay::{OverlayView, ReferenceOnlyEntity};
pub use side_by_side::{Panel, PanelRole, SideBySideView};
pub use summary::{ComparisonSummary, KeySets};
