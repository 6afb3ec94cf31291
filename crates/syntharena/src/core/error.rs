//! Core error types for route processing
//!
//! Every failure here is fatal to the single build, layout or comparison
//! call that raised it. Nothing is retried and no partial result is returned.

use thiserror::Error;

/// Errors raised while building, laying out or comparing routes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Empty input: a route needs at least one node")]
    EmptyInput,

    #[error("Root not found: no node has a null parent identifier")]
    RootNotFound,

    #[error("Multiple roots: {} nodes have a null parent identifier ({})", ids.len(), ids.join(", "))]
    MultipleRoots { ids: Vec<String> },

    #[error("Duplicate node identifier: {id}")]
    DuplicateNode { id: String },

    #[error("Construction failure: root '{root_id}' could not be resolved after linking")]
    ConstructionFailure { root_id: String },

    #[error("Orphaned nodes: {} node(s) unreachable from the root ({})", ids.len(), ids.join(", "))]
    OrphanedNodes { ids: Vec<String> },

    #[error("Invalid layout configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Comparison needs at least one reference route")]
    NoReferences,
}

impl RouteError {
    /// Create a multiple roots error
    pub fn multiple_roots(ids: Vec<String>) -> Self {
        Self::MultipleRoots { ids }
    }

    /// Create a duplicate node error
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    /// Create a construction failure error
    pub fn construction_failure(root_id: impl Into<String>) -> Self {
        Self::ConstructionFailure {
            root_id: root_id.into(),
        }
    }

    /// Create an orphaned nodes error
    pub fn orphaned_nodes(ids: Vec<String>) -> Self {
        Self::OrphanedNodes { ids }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for errors caused by the shape of the node collection
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::RootNotFound
                | Self::MultipleRoots { .. }
                | Self::DuplicateNode { .. }
                | Self::ConstructionFailure { .. }
                | Self::OrphanedNodes { .. }
        )
    }
}
