//! Key-level comparison of a prediction against its references

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::ComparisonStatus;
use crate::route::{IdentityKey, RouteTree};

/// Distinct identity keys of the prediction and of all references combined
///
/// Presence is boolean per tree: a key used by several nodes counts once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySets {
    pub prediction: BTreeSet<IdentityKey>,
    pub references: BTreeSet<IdentityKey>,
}

impl KeySets {
    pub fn new(prediction: &RouteTree, references: &[RouteTree]) -> Self {
        Self {
            prediction: prediction.identity_keys(),
            references: references
                .iter()
                .flat_map(|tree| tree.identity_keys())
                .collect(),
        }
    }

    /// Status of a prediction node's key (any reference counts)
    pub fn prediction_status(&self, key: &IdentityKey) -> ComparisonStatus {
        if self.references.contains(key) {
            ComparisonStatus::Shared
        } else {
            ComparisonStatus::PredictionOnly
        }
    }

    /// Status of a reference node's key
    pub fn reference_status(&self, key: &IdentityKey) -> ComparisonStatus {
        if self.prediction.contains(key) {
            ComparisonStatus::Shared
        } else {
            ComparisonStatus::ReferenceOnly
        }
    }
}

/// Counts of distinct keys per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub shared: usize,
    pub prediction_only: usize,
    pub reference_only: usize,
    /// First reference whose key set equals the prediction's
    pub exact_match: Option<usize>,
}

impl ComparisonSummary {
    pub fn new(keys: &KeySets, references: &[RouteTree]) -> Self {
        let shared = keys.prediction.intersection(&keys.references).count();
        let exact_match = references
            .iter()
            .position(|reference| reference.identity_keys() == keys.prediction);

        Self {
            shared,
            prediction_only: keys.prediction.len() - shared,
            reference_only: keys.references.len() - shared,
            exact_match,
        }
    }

    /// True when the prediction has no key missing from the references
    pub fn fully_shared(&self) -> bool {
        self.prediction_only == 0
    }
}
