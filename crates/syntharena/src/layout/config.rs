//! Layout geometry configuration

use serde::{Deserialize, Serialize};

use crate::core::{Direction, RouteError};

/// Width of a node box
pub const NODE_WIDTH: f64 = 200.0;
/// Height of a node box
pub const NODE_HEIGHT: f64 = 120.0;
/// Gap between neighbouring sibling subtrees
pub const HORIZONTAL_SPACING: f64 = 40.0;
/// Gap between consecutive depth levels
pub const VERTICAL_SPACING: f64 = 80.0;

/// Immutable geometry for one layout call
///
/// Passed by value into every layout; nothing reads layout settings from
/// global state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub direction: Direction,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            horizontal_spacing: HORIZONTAL_SPACING,
            vertical_spacing: VERTICAL_SPACING,
            direction: Direction::TopDown,
        }
    }
}

impl LayoutConfig {
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    pub fn with_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Distance between the centres of two consecutive levels
    pub fn level_height(&self) -> f64 {
        self.node_height + self.vertical_spacing
    }

    /// Reject geometry that cannot produce a sane layout
    pub fn validate(&self) -> Result<(), RouteError> {
        let fields = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(RouteError::invalid_config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
            if value < 0.0 {
                return Err(RouteError::invalid_config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        if self.node_width == 0.0 || self.node_height == 0.0 {
            return Err(RouteError::invalid_config("node size must be positive"));
        }
        Ok(())
    }
}
