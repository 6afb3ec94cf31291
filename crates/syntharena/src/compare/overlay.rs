//! Diff overlay: one combined layout of the prediction and what it misses
//!
//! Prediction nodes keep exactly the positions a plain layout of the
//! prediction gives them. Entities that only the references contain are
//! laid out as extra subtrees in a band past the prediction's far side
//! along the sibling axis. Each such subtree hangs from the prediction node
//! it is attached to in its reference, one level below it.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::{ComparisonNode, KeySets};
use crate::core::{Bounds, ComparisonStatus, Point, RouteError};
use crate::layout::{PositionedEdge, PositionedNode, PositionedTree, TreeLayout};
use crate::route::{IdentityKey, NodeIndex, RouteNode, RouteTree};

/// Reference entity with no counterpart in the prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceOnlyEntity {
    pub key: IdentityKey,
    pub label: String,
    /// Index of the reference route it was first seen in
    pub reference: usize,
    /// Node identifier inside that reference route
    pub node_id: String,
    /// Where the entity is drawn in [`OverlayView::nodes`]
    pub index: NodeIndex,
    /// Prediction node matching the nearest shared ancestor, if any
    pub anchor: Option<NodeIndex>,
}

/// Single combined layout for the overlay display mode
///
/// `nodes` starts with the prediction in its own order; reference-only
/// nodes follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub nodes: Vec<ComparisonNode>,
    pub edges: Vec<PositionedEdge>,
    pub bounds: Bounds,
    pub reference_only: Vec<ReferenceOnlyEntity>,
}

impl OverlayView {
    pub(crate) fn build(
        layout: &TreeLayout,
        positioned: PositionedTree,
        prediction: &RouteTree,
        references: &[RouteTree],
        keys: &KeySets,
    ) -> Result<Self, RouteError> {
        let grafts = collect_grafts(prediction, references, keys);
        let records: Vec<RouteNode> = grafts.iter().map(|graft| graft.record.clone()).collect();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); grafts.len()];
        for (position, graft) in grafts.iter().enumerate() {
            if let Attach::Entity(parent) = graft.attach {
                children[parent].push(position);
            }
        }

        let horizontal = layout.config().direction.is_horizontal();
        let spacing = layout.config().horizontal_spacing;
        let level = layout.level_step();
        let root_across = across(positioned.root(), horizontal);
        let mut cursor = if horizontal {
            positioned.bounds.max_y
        } else {
            positioned.bounds.max_x
        } + spacing;

        let mut bounds = positioned.bounds;
        let mut edges = positioned.edges;
        let mut nodes: Vec<ComparisonNode> = positioned
            .nodes
            .into_iter()
            .map(|node| {
                let status = keys.prediction_status(&node.key);
                ComparisonNode { node, status }
            })
            .collect();
        let mut placed: Vec<Option<NodeIndex>> = vec![None; grafts.len()];

        for (root, graft) in grafts.iter().enumerate() {
            let (parent, base_depth) = match graft.attach {
                Attach::Entity(_) => continue,
                Attach::Prediction(index) => (Some(index), nodes[index.get()].node.depth + 1),
                Attach::Detached => (None, 0),
            };

            let subtree = RouteTree::from_links(&records, &children, root);
            let width = layout.subtree_widths(&subtree)[0];
            let along = cursor + width / 2.0;
            let depth_at = root_across + base_depth as f64 * level;
            let origin = if horizontal {
                Point::new(depth_at, along)
            } else {
                Point::new(along, depth_at)
            };
            cursor += width + spacing;

            let offset = nodes.len();
            let shift = move |index: NodeIndex| NodeIndex(offset + index.get());
            for (position, graft_index) in breadth_first(&children, root).into_iter().enumerate() {
                placed[graft_index] = Some(NodeIndex(offset + position));
            }

            let grafted = layout.layout_at(&subtree, origin)?;
            for mut node in grafted.nodes {
                node.index = shift(node.index);
                node.depth += base_depth;
                node.parent = node.parent.map(shift).or(parent);
                node.children = node.children.into_iter().map(shift).collect();
                bounds = bounds.union(node.bounds());
                nodes.push(ComparisonNode {
                    node,
                    status: ComparisonStatus::ReferenceOnly,
                });
            }
            edges.extend(grafted.edges.into_iter().map(|edge| PositionedEdge {
                from: shift(edge.from),
                to: shift(edge.to),
                path: edge.path,
            }));

            if let Some(parent) = parent {
                let to = NodeIndex(offset);
                let path = layout.edge_path(&nodes[parent.get()].node, &nodes[offset].node);
                nodes[parent.get()].node.children.push(to);
                edges.push(PositionedEdge {
                    from: parent,
                    to,
                    path,
                });
            }
        }

        let reference_only: Vec<ReferenceOnlyEntity> = grafts
            .into_iter()
            .zip(placed)
            .filter_map(|(graft, index)| {
                let index = index?;
                Some(ReferenceOnlyEntity {
                    label: graft.record.entity.display_label().to_string(),
                    key: graft.key,
                    reference: graft.reference,
                    node_id: graft.record.id,
                    index,
                    anchor: graft.anchor,
                })
            })
            .collect();

        debug!(
            reference_only = reference_only.len(),
            nodes = nodes.len(),
            "Overlay laid out"
        );

        Ok(Self {
            nodes,
            edges,
            bounds,
            reference_only,
        })
    }

    pub fn find(&self, id: &str) -> Option<&ComparisonNode> {
        self.nodes.iter().find(|entry| entry.node.id == id)
    }

    pub fn status(&self, id: &str) -> Option<ComparisonStatus> {
        self.find(id).map(|entry| entry.status)
    }

    pub fn node(&self, index: NodeIndex) -> &ComparisonNode {
        &self.nodes[index.get()]
    }
}

/// Where a reference-only node hangs in the overlay
#[derive(Debug, Clone, Copy)]
enum Attach {
    /// Under a prediction node
    Prediction(NodeIndex),
    /// Under an earlier reference-only entity
    Entity(usize),
    /// A reference root whose key the prediction lacks
    Detached,
}

struct Graft {
    record: RouteNode,
    key: IdentityKey,
    reference: usize,
    attach: Attach,
    anchor: Option<NodeIndex>,
}

/// Reference-only entities, one per key, in reference then breadth-first order
fn collect_grafts(prediction: &RouteTree, references: &[RouteTree], keys: &KeySets) -> Vec<Graft> {
    // First prediction node (breadth-first) carrying each key.
    let mut first_by_key: HashMap<&IdentityKey, NodeIndex> = HashMap::new();
    for (index, node) in prediction.iter() {
        first_by_key.entry(node.key()).or_insert(index);
    }

    let mut entity_by_key: HashMap<&IdentityKey, usize> = HashMap::new();
    let mut grafts = Vec::new();

    for (reference_index, reference) in references.iter().enumerate() {
        for (index, node) in reference.iter() {
            let key = node.key();
            if keys.prediction.contains(key) || entity_by_key.contains_key(key) {
                continue;
            }

            // Parents come first in breadth-first order, so a parent key is
            // either in the prediction or already an entity.
            let attach = node
                .parent
                .and_then(|parent| {
                    let parent_key = reference.node(parent).key();
                    first_by_key
                        .get(parent_key)
                        .map(|&found| Attach::Prediction(found))
                        .or_else(|| entity_by_key.get(parent_key).map(|&e| Attach::Entity(e)))
                })
                .unwrap_or(Attach::Detached);

            let mut ancestor = node.parent;
            let mut anchor = None;
            while let Some(current) = ancestor {
                let candidate = reference.node(current);
                if let Some(&found) = first_by_key.get(candidate.key()) {
                    anchor = Some(found);
                    break;
                }
                ancestor = candidate.parent;
            }

            trace!(
                key = %key,
                reference = reference_index,
                node = index.get(),
                anchored = anchor.is_some(),
                "Reference-only entity"
            );

            entity_by_key.insert(key, grafts.len());
            grafts.push(Graft {
                record: node.record.clone(),
                key: key.clone(),
                reference: reference_index,
                attach,
                anchor,
            });
        }
    }

    grafts
}

/// Graft positions in the order `RouteTree::from_links` stores them
fn breadth_first(children: &[Vec<usize>], root: usize) -> Vec<usize> {
    let mut order = vec![root];
    let mut next = 0;
    while next < order.len() {
        let current = order[next];
        order.extend(children[current].iter().copied());
        next += 1;
    }
    order
}

/// Coordinate along the depth axis
fn across(node: &PositionedNode, horizontal: bool) -> f64 {
    if horizontal {
        node.x
    } else {
        node.y
    }
}
