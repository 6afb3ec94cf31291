//! Tree builder: flat parent-linked records to a rooted route tree
//!
//! Linking runs in two passes (identifier lookup, then child attachment)
//! followed by a reachability walk from the root. Records that cannot be
//! reached, whether through a dangling parent identifier or a cycle, are
//! reported as orphans instead of being dropped.

use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, span, trace, warn, Level};

use super::{RouteNode, RouteTree};
use crate::core::RouteError;

/// What to do with records unreachable from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPolicy {
    /// Fail with [`RouteError::OrphanedNodes`]
    #[default]
    Strict,
    /// Build from the reachable records and report the rest
    Lenient,
}

/// A built tree plus the identifiers of records left out of it
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub tree: RouteTree,
    /// Orphaned record identifiers in input order
    pub orphans: Vec<String>,
}

impl BuildOutcome {
    pub fn is_complete(&self) -> bool {
        self.orphans.is_empty()
    }
}

/// Builds [`RouteTree`]s from flat records
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    policy: BuildPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BuildPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    /// Build the route tree rooted at the single null-parent record
    pub fn build(&self, records: &[RouteNode]) -> Result<BuildOutcome, RouteError> {
        let build_span = span!(
            Level::INFO,
            "build_route_tree",
            record_count = records.len(),
            policy = ?self.policy
        );
        let _enter = build_span.enter();

        if records.is_empty() {
            debug!("Empty record collection");
            return Err(RouteError::EmptyInput);
        }

        // Pass 1: identifier lookup with an empty child list per record.
        let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if lookup.insert(record.id.as_str(), position).is_some() {
                return Err(RouteError::duplicate_node(&record.id));
            }
        }
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];

        let roots: Vec<&RouteNode> = records.iter().filter(|r| r.is_root()).collect();
        let root_id = match roots.as_slice() {
            [] => return Err(RouteError::RootNotFound),
            [root] => root.id.as_str(),
            many => {
                return Err(RouteError::multiple_roots(
                    many.iter().map(|r| r.id.clone()).collect(),
                ))
            }
        };

        // Pass 2: attach every record to its parent.
        let mut dangling: Vec<usize> = Vec::new();
        for (position, record) in records.iter().enumerate() {
            let Some(parent_id) = record.parent_id.as_deref() else {
                continue;
            };
            match lookup.get(parent_id) {
                Some(&parent) => children[parent].push(position),
                None => {
                    trace!(id = %record.id, parent_id, "Parent identifier does not resolve");
                    dangling.push(position);
                }
            }
        }

        for siblings in &mut children {
            sort_siblings(siblings, records);
        }

        let root = *lookup
            .get(root_id)
            .ok_or_else(|| RouteError::construction_failure(root_id))?;

        let reached = reachable_from(root, &children);
        let orphans: Vec<String> = records
            .iter()
            .zip(&reached)
            .filter(|(_, seen)| !**seen)
            .map(|(record, _)| record.id.clone())
            .collect();

        if !orphans.is_empty() {
            warn!(
                orphan_count = orphans.len(),
                dangling_count = dangling.len(),
                "Route has records unreachable from the root"
            );
            if self.policy == BuildPolicy::Strict {
                return Err(RouteError::orphaned_nodes(orphans));
            }
        }

        let tree = RouteTree::from_links(records, &children, root);
        info!(
            node_count = tree.len(),
            depth = tree.depth(),
            orphan_count = orphans.len(),
            "Route tree built"
        );

        Ok(BuildOutcome { tree, orphans })
    }
}

/// Order siblings by explicit `order`, unordered records last, then by input position
fn sort_siblings(siblings: &mut [usize], records: &[RouteNode]) {
    siblings.sort_by_key(|&position| {
        let order = records[position].order;
        (order.is_none(), order, position)
    });
}

fn reachable_from(root: usize, children: &[Vec<usize>]) -> Vec<bool> {
    let mut seen = vec![false; children.len()];
    let mut queue = VecDeque::from([root]);
    seen[root] = true;
    while let Some(current) = queue.pop_front() {
        for &child in &children[current] {
            if !seen[child] {
                seen[child] = true;
                queue.push_back(child);
            }
        }
    }
    seen
}

/// Build a route tree, failing on any orphaned record
///
/// # Example
/// ```rust
/// use syntharena::route::{build_tree, RouteNode};
///
/// let tree = build_tree(&[
///     RouteNode::molecule("A", None, "KA"),
///     RouteNode::molecule("B", Some("A"), "KB"),
///     RouteNode::molecule("C", Some("A"), "KC"),
/// ])
/// .unwrap();
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.root().id(), "A");
/// ```
pub fn build_tree(records: &[RouteNode]) -> Result<RouteTree, RouteError> {
    TreeBuilder::new().build(records).map(|outcome| outcome.tree)
}

/// Build a route tree from the reachable records and list the orphans
pub fn build_tree_lenient(records: &[RouteNode]) -> Result<BuildOutcome, RouteError> {
    TreeBuilder::with_policy(BuildPolicy::Lenient).build(records)
}
