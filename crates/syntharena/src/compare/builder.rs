//! Comparison graph builder

use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, Level};

use super::{ComparisonSummary, KeySets, OverlayView, SideBySideView};
use crate::core::{ComparisonMode, ComparisonStatus, Point, RouteError};
use crate::layout::{LayoutConfig, PositionedNode, TreeLayout};
use crate::route::RouteTree;

/// Default horizontal gap between side-by-side panels
pub const PANEL_GAP: f64 = 120.0;

/// Geometry for comparison views
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub layout: LayoutConfig,
    pub panel_gap: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            panel_gap: PANEL_GAP,
        }
    }
}

impl ComparisonConfig {
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_panel_gap(mut self, gap: f64) -> Self {
        self.panel_gap = gap;
        self
    }

    /// Check the panel gap, then the layout geometry
    pub fn validate(&self) -> Result<(), RouteError> {
        if !self.panel_gap.is_finite() {
            return Err(RouteError::invalid_config(format!(
                "panel_gap must be finite, got {}",
                self.panel_gap
            )));
        }
        if self.panel_gap < 0.0 {
            return Err(RouteError::invalid_config(format!(
                "panel_gap must not be negative, got {}",
                self.panel_gap
            )));
        }
        self.layout.validate()
    }
}

/// A positioned node tagged with its comparison status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonNode {
    #[serde(flatten)]
    pub node: PositionedNode,
    pub status: ComparisonStatus,
}

/// Mode-specific part of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ComparisonView {
    SideBySide(SideBySideView),
    Overlay(OverlayView),
}

/// Everything a renderer needs to draw one comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonGraph {
    pub summary: ComparisonSummary,
    #[serde(flatten)]
    pub view: ComparisonView,
}

impl ComparisonGraph {
    pub fn mode(&self) -> ComparisonMode {
        match self.view {
            ComparisonView::SideBySide(_) => ComparisonMode::SideBySide,
            ComparisonView::Overlay(_) => ComparisonMode::Overlay,
        }
    }

    pub fn as_overlay(&self) -> Option<&OverlayView> {
        match &self.view {
            ComparisonView::Overlay(view) => Some(view),
            ComparisonView::SideBySide(_) => None,
        }
    }

    pub fn as_side_by_side(&self) -> Option<&SideBySideView> {
        match &self.view {
            ComparisonView::SideBySide(view) => Some(view),
            ComparisonView::Overlay(_) => None,
        }
    }
}

/// Builds comparison graphs between a prediction and its reference routes
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonBuilder {
    config: ComparisonConfig,
}

impl ComparisonBuilder {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compare `prediction` against every route in `references`
    ///
    /// A prediction node is shared when its identity key appears in any
    /// reference.
    pub fn build(
        &self,
        mode: ComparisonMode,
        prediction: &RouteTree,
        references: &[RouteTree],
    ) -> Result<ComparisonGraph, RouteError> {
        let compare_span = span!(
            Level::INFO,
            "compare_routes",
            %mode,
            prediction_nodes = prediction.len(),
            reference_count = references.len()
        );
        let _enter = compare_span.enter();

        self.config.validate()?;
        if references.is_empty() {
            return Err(RouteError::NoReferences);
        }

        let keys = KeySets::new(prediction, references);
        let summary = ComparisonSummary::new(&keys, references);
        debug!(
            shared = summary.shared,
            prediction_only = summary.prediction_only,
            reference_only = summary.reference_only,
            "Compared identity keys"
        );

        let layout = TreeLayout::new(self.config.layout);
        let view = match mode {
            ComparisonMode::Overlay => {
                let positioned = layout.layout_at(prediction, Point::default())?;
                ComparisonView::Overlay(OverlayView::build(
                    &layout,
                    positioned,
                    prediction,
                    references,
                    &keys,
                )?)
            }
            ComparisonMode::SideBySide => {
                let layouts = std::iter::once(prediction)
                    .chain(references)
                    .map(|tree| layout.layout_at(tree, Point::default()))
                    .collect::<Result<Vec<_>, _>>()?;
                ComparisonView::SideBySide(SideBySideView::build(
                    layouts,
                    &keys,
                    self.config.panel_gap,
                ))
            }
        };

        info!(exact_match = ?summary.exact_match, "Comparison completed");
        Ok(ComparisonGraph { summary, view })
    }
}

/// Compare a prediction with its references using default geometry
pub fn compare_routes(
    mode: ComparisonMode,
    prediction: &RouteTree,
    references: &[RouteTree],
) -> Result<ComparisonGraph, RouteError> {
    ComparisonBuilder::default().build(mode, prediction, references)
}
