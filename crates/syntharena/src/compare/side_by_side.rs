//! Side-by-side panels: one independent layout per route
//!
//! Every panel uses the same geometry and the same origin along the depth
//! axis, so nodes at equal depth line up across panels. Panels are stacked
//! along the sibling axis, prediction first, separated by the configured
//! gap: left to right for top-down routes, top to bottom for left-right
//! ones.

use serde::Serialize;

use super::{ComparisonNode, KeySets};
use crate::core::{Bounds, ComparisonStatus};
use crate::layout::{PositionedEdge, PositionedTree};
use crate::route::IdentityKey;

/// Which route a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PanelRole {
    Prediction,
    Reference { index: usize },
}

/// One route laid out inside its panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub role: PanelRole,
    pub nodes: Vec<ComparisonNode>,
    pub edges: Vec<PositionedEdge>,
    pub bounds: Bounds,
}

impl Panel {
    fn new(
        role: PanelRole,
        layout: PositionedTree,
        status: impl Fn(&IdentityKey) -> ComparisonStatus,
    ) -> Self {
        let nodes = layout
            .nodes
            .into_iter()
            .map(|node| ComparisonNode {
                status: status(&node.key),
                node,
            })
            .collect();

        Self {
            role,
            nodes,
            edges: layout.edges,
            bounds: layout.bounds,
        }
    }

    pub fn find(&self, id: &str) -> Option<&ComparisonNode> {
        self.nodes.iter().find(|entry| entry.node.id == id)
    }
}

/// Parallel panels for the side-by-side display mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideBySideView {
    pub panels: Vec<Panel>,
    pub bounds: Bounds,
}

impl SideBySideView {
    /// Arrange already laid out trees into panels
    ///
    /// `layouts[0]` is the prediction, the rest are references in order.
    pub(crate) fn build(layouts: Vec<PositionedTree>, keys: &KeySets, panel_gap: f64) -> Self {
        let mut panels = Vec::with_capacity(layouts.len());
        let mut next_start = 0.0;

        for (position, mut layout) in layouts.into_iter().enumerate() {
            if layout.direction.is_horizontal() {
                layout.translate_y(next_start - layout.bounds.min_y);
                next_start = layout.bounds.max_y + panel_gap;
            } else {
                layout.translate_x(next_start - layout.bounds.min_x);
                next_start = layout.bounds.max_x + panel_gap;
            }

            let panel = if position == 0 {
                Panel::new(PanelRole::Prediction, layout, |key| keys.prediction_status(key))
            } else {
                Panel::new(
                    PanelRole::Reference {
                        index: position - 1,
                    },
                    layout,
                    |key| keys.reference_status(key),
                )
            };
            panels.push(panel);
        }

        let bounds = panels
            .iter()
            .map(|panel| panel.bounds)
            .reduce(Bounds::union)
            .unwrap_or(Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            });

        Self { panels, bounds }
    }

    pub fn prediction(&self) -> &Panel {
        &self.panels[0]
    }

    pub fn references(&self) -> &[Panel] {
        &self.panels[1..]
    }
}
