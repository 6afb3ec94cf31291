//! Core type definitions for route processing
//!
//! Geometry primitives, layout direction, and the comparison status and
//! mode enums shared by the layout and comparison modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in layout space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Swap the axes
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Axis-aligned bounding box of a laid out graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a single box centred on `center`
    pub fn around(center: Point, width: f64, height: f64) -> Self {
        Self {
            min_x: center.x - width / 2.0,
            min_y: center.y - height / 2.0,
            max_x: center.x + width / 2.0,
            max_y: center.y + height / 2.0,
        }
    }

    /// Smallest bounds covering both
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shift by a horizontal offset
    pub fn offset_x(self, dx: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            ..self
        }
    }

    /// Shift by a vertical offset
    pub fn offset_y(self, dy: f64) -> Self {
        Self {
            min_y: self.min_y + dy,
            max_y: self.max_y + dy,
            ..self
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Which way a route tree grows from its root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Root at the top, starting materials below
    #[default]
    TopDown,
    /// Root on the left, starting materials to the right
    LeftRight,
}

impl Direction {
    /// True when depth runs along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "td" | "tb" | "top-down" => Ok(Direction::TopDown),
            "lr" | "left-right" => Ok(Direction::LeftRight),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Per-node outcome of comparing a prediction with its references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonStatus {
    /// Identity key present in the prediction and in at least one reference
    Shared,
    /// Identity key present only in the prediction
    PredictionOnly,
    /// Identity key present only in the reference(s)
    ReferenceOnly,
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonStatus::Shared => write!(f, "shared"),
            ComparisonStatus::PredictionOnly => write!(f, "prediction-only"),
            ComparisonStatus::ReferenceOnly => write!(f, "reference-only"),
        }
    }
}

/// Display mode for a route comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Independent layouts in parallel panels
    SideBySide,
    /// One layout of the prediction annotated with comparison status
    #[default]
    Overlay,
}

impl ComparisonMode {
    /// Get all valid mode names
    pub fn variants() -> &'static [&'static str] {
        &["side-by-side", "overlay"]
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::SideBySide => write!(f, "side-by-side"),
            ComparisonMode::Overlay => write!(f, "overlay"),
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "side-by-side" | "sidebyside" | "side_by_side" => Ok(ComparisonMode::SideBySide),
            "overlay" | "diff" => Ok(ComparisonMode::Overlay),
            _ => Err(format!("Unknown comparison mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union_and_size() {
        let a = Bounds::around(Point::new(0.0, 0.0), 10.0, 4.0);
        let b = Bounds::around(Point::new(20.0, 10.0), 10.0, 4.0);
        let u = a.union(b);
        assert_eq!(u.min_x, -5.0);
        assert_eq!(u.max_x, 25.0);
        assert_eq!(u.width(), 30.0);
        assert_eq!(u.height(), 14.0);
    }

    #[test]
    fn test_bounds_offset() {
        let b = Bounds::around(Point::new(0.0, 0.0), 10.0, 10.0).offset_x(100.0);
        assert_eq!(b.min_x, 95.0);
        assert_eq!(b.max_x, 105.0);
        assert_eq!(b.min_y, -5.0);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("TD".parse::<Direction>().unwrap(), Direction::TopDown);
        assert_eq!("left-right".parse::<Direction>().unwrap(), Direction::LeftRight);
        assert!("diagonal".parse::<Direction>().is_err());
        assert_eq!(Direction::default(), Direction::TopDown);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ComparisonStatus::Shared.to_string(), "shared");
        assert_eq!(ComparisonStatus::PredictionOnly.to_string(), "prediction-only");
        assert_eq!(ComparisonStatus::ReferenceOnly.to_string(), "reference-only");
    }

    #[test]
    fn test_mode_round_trip_names() {
        for name in ComparisonMode::variants() {
            let mode: ComparisonMode = name.parse().unwrap();
            assert_eq!(&mode.to_string(), name);
        }
        assert!("stacked".parse::<ComparisonMode>().is_err());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComparisonStatus::PredictionOnly).unwrap();
        assert_eq!(json, "\"prediction-only\"");
    }
}
