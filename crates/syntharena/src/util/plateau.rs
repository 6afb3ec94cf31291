//! Trailing-plateau filter for top-k accuracy curves
//!
//! Accuracy-at-k curves with confidence intervals usually stop moving well
//! before the largest k. Charting the flat tail adds nothing, so it is cut
//! back to the point where the plateau starts.

use serde::{Deserialize, Serialize};

/// One point of an accuracy curve with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub k: u32,
    pub value: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl CurvePoint {
    pub fn new(k: u32, value: f64, ci_low: f64, ci_high: f64) -> Self {
        Self {
            k,
            value,
            ci_low,
            ci_high,
        }
    }

    fn same_as(&self, other: &CurvePoint, tolerance: f64) -> bool {
        (self.value - other.value).abs() <= tolerance
            && (self.ci_low - other.ci_low).abs() <= tolerance
            && (self.ci_high - other.ci_high).abs() <= tolerance
    }
}

/// Drop the flat tail of a curve, keeping the first point of the plateau
///
/// Points are sorted by `k` first. A trailing point is part of the
/// plateau while its value and interval match its predecessor within
/// `tolerance`.
pub fn filter_plateau(points: &[CurvePoint], tolerance: f64) -> Vec<CurvePoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.k);

    let mut keep = sorted.len();
    while keep > 1 && sorted[keep - 1].same_as(&sorted[keep - 2], tolerance) {
        keep -= 1;
    }
    sorted.truncate(keep);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(k: u32, value: f64) -> CurvePoint {
        CurvePoint::new(k, value, value - 0.05, value + 0.05)
    }

    #[test]
    fn test_empty() {
        assert!(filter_plateau(&[], 1e-9).is_empty());
    }

    #[test]
    fn test_trailing_plateau_is_cut() {
        let curve = vec![
            point(1, 0.4),
            point(2, 0.5),
            point(3, 0.55),
            point(5, 0.55),
            point(10, 0.55),
        ];
        let filtered = filter_plateau(&curve, 1e-9);
        let ks: Vec<u32> = filtered.iter().map(|p| p.k).collect();
        assert_eq!(ks, vec![1, 2, 3]);
    }

    #[test]
    fn test_interior_plateau_is_kept() {
        let curve = vec![point(1, 0.4), point(2, 0.4), point(3, 0.6)];
        assert_eq!(filter_plateau(&curve, 1e-9).len(), 3);
    }

    #[test]
    fn test_interval_change_breaks_plateau() {
        let curve = vec![
            point(1, 0.5),
            CurvePoint::new(2, 0.5, 0.40, 0.60),
        ];
        assert_eq!(filter_plateau(&curve, 1e-9).len(), 2);
    }

    #[test]
    fn test_unsorted_input() {
        let curve = vec![point(10, 0.7), point(1, 0.3), point(5, 0.7)];
        let filtered = filter_plateau(&curve, 1e-9);
        let ks: Vec<u32> = filtered.iter().map(|p| p.k).collect();
        assert_eq!(ks, vec![1, 5]);
    }

    #[test]
    fn test_flat_curve_keeps_first_point() {
        let curve = vec![point(1, 0.2), point(2, 0.2), point(3, 0.2)];
        let filtered = filter_plateau(&curve, 1e-9);
        assert_eq!(filtered, vec![point(1, 0.2)]);
    }

    #[test]
    fn test_tolerance() {
        let curve = vec![point(1, 0.5), point(2, 0.5004)];
        assert_eq!(filter_plateau(&curve, 1e-3).len(), 1);
        assert_eq!(filter_plateau(&curve, 1e-6).len(), 2);
    }
}
