//! Data-access seam for flat route node records
//!
//! The relational store that holds routes lives outside this crate. It is
//! modelled as a [`NodeSource`] that hands back the flat, parent-linked
//! records of one route at a time.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::route::RouteNode;

/// Core trait for route node stores
///
/// Each route is identified by an opaque string. The returned records are
/// in storage order; the tree builder decides sibling order from them.
pub trait NodeSource: Send + Sync {
    /// Fetch the flat node records of one route
    fn route_nodes(&self, route_id: &str) -> Result<Vec<RouteNode>>;

    /// Identifiers of every route this source can supply
    fn route_ids(&self) -> Vec<String>;

    /// Get the number of routes
    fn route_count(&self) -> usize {
        self.route_ids().len()
    }
}

/// Route store held in memory, loadable from JSON
///
/// The JSON shape is `{ "routes": { "<route id>": [RouteNode, ...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryNodeSource {
    routes: BTreeMap<String, Vec<RouteNode>>,
}

impl InMemoryNodeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the records of one route
    pub fn insert_route(&mut self, route_id: impl Into<String>, nodes: Vec<RouteNode>) {
        let route_id = route_id.into();
        debug!(route_id = %route_id, node_count = nodes.len(), "Stored route records");
        self.routes.insert(route_id, nodes);
    }

    /// Remove every stored route
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Parse a store from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse route store JSON")
    }

    /// Load a store from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route store '{}'", path.display()))?;
        Self::from_json(&content)
    }

    /// Serialize the store to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl NodeSource for InMemoryNodeSource {
    fn route_nodes(&self, route_id: &str) -> Result<Vec<RouteNode>> {
        self.routes
            .get(route_id)
            .cloned()
            .ok_or_else(|| anyhow!("Route '{}' not found", route_id))
    }

    fn route_ids(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    fn route_count(&self) -> usize {
        self.routes.len()
    }
}
