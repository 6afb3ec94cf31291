//! Flat route node records
//!
//! These are the rows handed over by the data layer: an identifier, a
//! nullable parent identifier and the chemical entity the node stands for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identity of a chemical entity
///
/// Equality across routes is decided by this key alone, never by node
/// identifiers. Canonicalisation (InChIKey, canonical SMILES, a hash of
/// either) happens upstream; construction only trims whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for IdentityKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<IdentityKey> for String {
    fn from(value: IdentityKey) -> Self {
        value.0
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a route node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Molecule,
    Reaction,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Molecule => write!(f, "molecule"),
            EntityKind::Reaction => write!(f, "reaction"),
        }
    }
}

/// Chemical payload embedded in a route node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalEntity {
    pub key: IdentityKey,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChemicalEntity {
    /// A molecule known only by its identity key
    pub fn molecule(key: impl Into<IdentityKey>) -> Self {
        Self {
            key: key.into(),
            kind: EntityKind::Molecule,
            smiles: None,
            label: None,
        }
    }

    /// A reaction step known only by its identity key
    pub fn reaction(key: impl Into<IdentityKey>) -> Self {
        Self {
            kind: EntityKind::Reaction,
            ..Self::molecule(key)
        }
    }

    pub fn with_smiles(mut self, smiles: impl Into<String>) -> Self {
        self.smiles = Some(smiles.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text a renderer should print inside the node box
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.smiles.as_deref())
            .unwrap_or(self.key.as_str())
    }
}

/// One flat route record as stored by the data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub entity: ChemicalEntity,
    /// Explicit position among siblings; lower sorts first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl RouteNode {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, entity: ChemicalEntity) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            entity,
            order: None,
        }
    }

    /// Shorthand for a molecule node
    pub fn molecule(id: impl Into<String>, parent_id: Option<&str>, key: &str) -> Self {
        Self::new(id, parent_id, ChemicalEntity::molecule(key))
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// True for the target node of a route
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn key(&self) -> &IdentityKey {
        &self.entity.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_trims() {
        let key = IdentityKey::new("  BSYNRYMUTXBXSQ-UHFFFAOYSA-N \n");
        assert_eq!(key.as_str(), "BSYNRYMUTXBXSQ-UHFFFAOYSA-N");
        assert_eq!(key, IdentityKey::from("BSYNRYMUTXBXSQ-UHFFFAOYSA-N"));
    }

    #[test]
    fn test_identity_key_deserialize_trims() {
        let key: IdentityKey = serde_json::from_str("\" CCO \"").unwrap();
        assert_eq!(key.as_str(), "CCO");
    }

    #[test]
    fn test_display_label_fallbacks() {
        let bare = ChemicalEntity::molecule("KEY");
        assert_eq!(bare.display_label(), "KEY");

        let with_smiles = bare.clone().with_smiles("CCO");
        assert_eq!(with_smiles.display_label(), "CCO");

        let labelled = with_smiles.with_label("ethanol");
        assert_eq!(labelled.display_label(), "ethanol");
    }

    #[test]
    fn test_reaction_entity() {
        let rxn = ChemicalEntity::reaction("RXN-1");
        assert_eq!(rxn.kind, EntityKind::Reaction);
        assert_eq!(rxn.kind.to_string(), "reaction");
    }

    #[test]
    fn test_route_node_root() {
        assert!(RouteNode::molecule("A", None, "K").is_root());
        assert!(!RouteNode::molecule("B", Some("A"), "K").is_root());
    }

    #[test]
    fn test_route_node_defaults_from_json() {
        let node: RouteNode =
            serde_json::from_str(r#"{ "id": "x", "entity": { "key": "K" } }"#).unwrap();
        assert!(node.is_root());
        assert_eq!(node.order, None);
        assert_eq!(node.entity.kind, EntityKind::Molecule);
    }
}
