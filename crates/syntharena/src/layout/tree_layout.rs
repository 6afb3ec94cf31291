//! Route tree layout
//!
//! Classic subtree-width layout in two sweeps over the arena:
//!
//! 1. Bottom-up: a leaf is one node wide; an internal node is as wide as
//!    its children side by side (plus sibling spacing), and never narrower
//!    than itself.
//! 2. Top-down: the root's span is centred on the origin. Each node's
//!    children share its span left to right, each taking its subtree width
//!    plus spacing, with the block of children centred in the span. A node
//!    sits at the centre of its own span.
//!
//! Spacing names follow the top-down orientation. In a left-right layout
//! `horizontal_spacing` still separates siblings and `vertical_spacing`
//! still separates levels; the axes are swapped when coordinates are
//! emitted.

use serde::Serialize;
use tracing::{debug, info, span, trace, Level};

use super::LayoutConfig;
use crate::core::{Bounds, Direction, LayoutAlgorithm, Point, RouteError};
use crate::route::{IdentityKey, NodeIndex, RouteTree};

/// A route node with its assigned position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub index: NodeIndex,
    pub id: String,
    pub key: IdentityKey,
    pub label: String,
    pub depth: usize,
    /// Centre of the node box
    pub x: f64,
    /// Centre of the node box
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Extent of the node's subtree along the sibling axis
    pub subtree_width: f64,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
}

impl PositionedNode {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.center(), self.width, self.height)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A parent-to-child connector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEdge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    /// Orthogonal polyline from the parent's box to the child's box
    pub path: Vec<Point>,
}

/// Layout output, indexed like the source tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedTree {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
    pub bounds: Bounds,
    pub direction: Direction,
}

impl PositionedTree {
    pub fn root(&self) -> &PositionedNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: NodeIndex) -> &PositionedNode {
        &self.nodes[index.get()]
    }

    pub fn find(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Shift every coordinate horizontally
    pub fn translate_x(&mut self, dx: f64) {
        for node in &mut self.nodes {
            node.x += dx;
        }
        for edge in &mut self.edges {
            for point in &mut edge.path {
                point.x += dx;
            }
        }
        self.bounds = self.bounds.offset_x(dx);
    }

    /// Shift every coordinate vertically
    pub fn translate_y(&mut self, dy: f64) {
        for node in &mut self.nodes {
            node.y += dy;
        }
        for edge in &mut self.edges {
            for point in &mut edge.path {
                point.y += dy;
            }
        }
        self.bounds = self.bounds.offset_y(dy);
    }
}

/// Subtree-width layout for route trees
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeLayout {
    config: LayoutConfig,
}

impl TreeLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Subtree extent of every node along the sibling axis
    pub fn subtree_widths(&self, tree: &RouteTree) -> Vec<f64> {
        let breadth = self.node_breadth();
        let spacing = self.config.horizontal_spacing;
        let mut widths = vec![breadth; tree.len()];

        // Children always have larger indices, so a reverse sweep is post-order.
        for index in (0..tree.len()).rev() {
            let node = tree.node(NodeIndex(index));
            if node.is_leaf() {
                continue;
            }
            let span = children_span(&node.children, &widths, spacing);
            widths[index] = span.max(breadth);
        }
        widths
    }

    /// Lay the tree out with its root at `origin`
    pub fn layout_at(&self, tree: &RouteTree, origin: Point) -> Result<PositionedTree, RouteError> {
        let layout_span = span!(
            Level::INFO,
            "layout_route",
            node_count = tree.len(),
            direction = %self.config.direction
        );
        let _enter = layout_span.enter();

        self.config.validate()?;
        trace!("Starting route layout");

        let widths = self.subtree_widths(tree);
        debug!(root_width = widths[0], "Computed subtree widths");

        let spacing = self.config.horizontal_spacing;
        let level = self.level_step();
        let horizontal = self.config.direction.is_horizontal();
        let (sibling_origin, depth_origin) = if horizontal {
            (origin.y, origin.x)
        } else {
            (origin.x, origin.y)
        };

        // Centre of each node along the sibling axis.
        let mut offsets = vec![0.0; tree.len()];
        offsets[0] = sibling_origin;
        for (index, node) in tree.iter() {
            if node.is_leaf() {
                continue;
            }
            let own = offsets[index.get()];
            let span_width = widths[index.get()];
            let block = children_span(&node.children, &widths, spacing);
            let mut cursor = own - span_width / 2.0 + (span_width - block) / 2.0;
            for child in &node.children {
                let child_width = widths[child.get()];
                offsets[child.get()] = cursor + child_width / 2.0;
                cursor += child_width + spacing;
            }
        }

        let nodes: Vec<PositionedNode> = tree
            .iter()
            .map(|(index, node)| {
                let along = offsets[index.get()];
                let across = depth_origin + node.depth as f64 * level;
                let (x, y) = if horizontal {
                    (across, along)
                } else {
                    (along, across)
                };
                PositionedNode {
                    index,
                    id: node.record.id.clone(),
                    key: node.key().clone(),
                    label: node.record.entity.display_label().to_string(),
                    depth: node.depth,
                    x,
                    y,
                    width: self.config.node_width,
                    height: self.config.node_height,
                    subtree_width: widths[index.get()],
                    parent: node.parent,
                    children: node.children.clone(),
                }
            })
            .collect();

        let edges: Vec<PositionedEdge> = nodes
            .iter()
            .filter_map(|child| {
                child.parent.map(|parent| PositionedEdge {
                    from: parent,
                    to: child.index,
                    path: self.edge_path(&nodes[parent.get()], child),
                })
            })
            .collect();

        let bounds = nodes
            .iter()
            .map(PositionedNode::bounds)
            .reduce(Bounds::union)
            .ok_or_else(|| RouteError::construction_failure("<empty tree>"))?;

        info!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            width = bounds.width(),
            height = bounds.height(),
            "Route layout completed"
        );

        Ok(PositionedTree {
            nodes,
            edges,
            bounds,
            direction: self.config.direction,
        })
    }

    /// Node extent along the sibling axis
    fn node_breadth(&self) -> f64 {
        if self.config.direction.is_horizontal() {
            self.config.node_height
        } else {
            self.config.node_width
        }
    }

    /// Distance between consecutive levels along the depth axis
    pub(crate) fn level_step(&self) -> f64 {
        if self.config.direction.is_horizontal() {
            self.config.node_width + self.config.vertical_spacing
        } else {
            self.config.level_height()
        }
    }

    /// Elbow connector leaving the parent's far side and entering the child's near side
    pub(crate) fn edge_path(&self, parent: &PositionedNode, child: &PositionedNode) -> Vec<Point> {
        let horizontal = self.config.direction.is_horizontal();
        // Work in top-down coordinates and transpose at the end.
        let (p, c, half_depth) = if horizontal {
            (
                parent.center().transposed(),
                child.center().transposed(),
                parent.width / 2.0,
            )
        } else {
            (parent.center(), child.center(), parent.height / 2.0)
        };

        let start = Point::new(p.x, p.y + half_depth);
        let end = Point::new(c.x, c.y - half_depth);
        let path = if p.x == c.x {
            vec![start, end]
        } else {
            let mid = (start.y + end.y) / 2.0;
            vec![start, Point::new(p.x, mid), Point::new(c.x, mid), end]
        };

        if horizontal {
            path.into_iter().map(Point::transposed).collect()
        } else {
            path
        }
    }
}

/// Width of a row of child subtrees placed side by side
fn children_span(children: &[NodeIndex], widths: &[f64], spacing: f64) -> f64 {
    let total: f64 = children.iter().map(|child| widths[child.get()]).sum();
    total + spacing * children.len().saturating_sub(1) as f64
}

impl LayoutAlgorithm for TreeLayout {
    type Output = PositionedTree;

    fn layout(&self, tree: &RouteTree) -> anyhow::Result<Self::Output> {
        Ok(self.layout_at(tree, Point::default())?)
    }

    fn name(&self) -> &'static str {
        "subtree-width"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
