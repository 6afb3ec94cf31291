//! Starting-material stocks
//!
//! A stock is a named library of purchasable molecules. A route is solved
//! against a stock when every leaf is in it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::{IdentityKey, NodeIndex, RouteTree};

/// Named set of identity keys available as starting materials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub name: String,
    keys: HashSet<IdentityKey>,
}

impl Stock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: HashSet::new(),
        }
    }

    pub fn from_keys<I, K>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<IdentityKey>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<IdentityKey>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Split the route's leaves into in-stock and missing
    pub fn check(&self, tree: &RouteTree) -> StockCheck {
        let (in_stock, missing): (Vec<NodeIndex>, Vec<NodeIndex>) = tree
            .leaves()
            .map(|(index, _)| index)
            .partition(|&index| self.contains(tree.node(index).key()));

        debug!(
            stock = %self.name,
            in_stock = in_stock.len(),
            missing = missing.len(),
            "Checked route leaves against stock"
        );

        StockCheck { in_stock, missing }
    }
}

/// Leaves of a route sorted by stock availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockCheck {
    pub in_stock: Vec<NodeIndex>,
    pub missing: Vec<NodeIndex>,
}

impl StockCheck {
    pub fn is_solved(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{build_tree, RouteNode};

    fn route() -> RouteTree {
        build_tree(&[
            RouteNode::molecule("T", None, "TARGET"),
            RouteNode::molecule("A", Some("T"), "SM-A"),
            RouteNode::molecule("B", Some("T"), "SM-B"),
        ])
        .unwrap()
    }

    #[test]
    fn test_solved_route() {
        let stock = Stock::from_keys("emolecules", ["SM-A", "SM-B", "OTHER"]);
        let check = stock.check(&route());
        assert!(check.is_solved());
        assert_eq!(check.in_stock.len(), 2);
    }

    #[test]
    fn test_unsolved_route_reports_missing() {
        let stock = Stock::from_keys("tiny", ["SM-A"]);
        let tree = route();
        let check = stock.check(&tree);
        assert!(!check.is_solved());
        assert_eq!(check.missing.len(), 1);
        assert_eq!(tree.node(check.missing[0]).id(), "B");
    }

    #[test]
    fn test_target_is_not_checked_when_it_has_children() {
        let stock = Stock::from_keys("s", ["SM-A", "SM-B"]);
        assert!(!stock.contains(&"TARGET".into()));
        assert!(stock.check(&route()).is_solved());
    }

    #[test]
    fn test_insert() {
        let mut stock = Stock::new("s");
        assert!(stock.is_empty());
        assert!(stock.insert("K"));
        assert!(!stock.insert(" K "));
        assert_eq!(stock.len(), 1);
    }
}
