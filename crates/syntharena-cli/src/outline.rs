//! Terminal outline of a route tree
//!
//! Draws the tree with box-drawing connectors, one node per line. Colours
//! are applied with crossterm when requested.

use crossterm::style::{Color, Stylize};
use syntharena::route::{NodeIndex, RouteTree, StockCheck};

/// Stock availability of one leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Availability {
    InStock,
    Missing,
}

/// Render `tree` as an indented outline
///
/// With a stock check every leaf gets a `✓`/`✗` marker. The result ends
/// with a newline.
pub fn render_outline(tree: &RouteTree, stock: Option<&StockCheck>, color: bool) -> String {
    let mut out = String::new();
    let root = NodeIndex::ROOT;
    out.push_str(&node_line(tree, root, stock, color));
    out.push('\n');

    let children = &tree.node(root).children;
    for (i, &child) in children.iter().enumerate() {
        write_subtree(tree, child, "", i + 1 == children.len(), stock, color, &mut out);
    }
    out
}

fn write_subtree(
    tree: &RouteTree,
    index: NodeIndex,
    prefix: &str,
    last: bool,
    stock: Option<&StockCheck>,
    color: bool,
    out: &mut String,
) {
    let connector = if last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(&paint(connector, Color::DarkGrey, color));
    out.push_str(&node_line(tree, index, stock, color));
    out.push('\n');

    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
    let children = &tree.node(index).children;
    for (i, &child) in children.iter().enumerate() {
        write_subtree(
            tree,
            child,
            &child_prefix,
            i + 1 == children.len(),
            stock,
            color,
            out,
        );
    }
}

fn availability(stock: Option<&StockCheck>, index: NodeIndex) -> Option<Availability> {
    let check = stock?;
    if check.in_stock.contains(&index) {
        Some(Availability::InStock)
    } else if check.missing.contains(&index) {
        Some(Availability::Missing)
    } else {
        None
    }
}

fn node_line(
    tree: &RouteTree,
    index: NodeIndex,
    stock: Option<&StockCheck>,
    color: bool,
) -> String {
    let node = tree.node(index);
    let label = node.record.entity.display_label();
    let label = if index == NodeIndex::ROOT && color {
        format!("{}", label.bold())
    } else {
        label.to_string()
    };

    let mut line = format!("{} {}", label, paint(&format!("[{}]", node.id()), Color::DarkGrey, color));
    match availability(stock, index) {
        Some(Availability::InStock) => {
            line.push(' ');
            line.push_str(&paint("✓", Color::Green, color));
        }
        Some(Availability::Missing) => {
            line.push(' ');
            line.push_str(&paint("✗", Color::Red, color));
        }
        None => {}
    }
    line
}

fn paint(text: &str, fg: Color, color: bool) -> String {
    if color {
        format!("{}", text.with(fg))
    } else {
        text.to_string()
    }
}
