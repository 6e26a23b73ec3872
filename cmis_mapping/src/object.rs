// src/object.rs
//! Objects that accessors and evaluators are applied to

use cmis_model::{AssociationRef, NodeRef};
use std::fmt;

/// A repository object seen through CMIS
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CmisObject {
    /// Document, folder or policy backed by a node
    Node(NodeRef),
    /// Relationship backed by a peer association
    Relationship(AssociationRef),
    /// Anything else; evaluators answer with their default
    Other,
}

impl CmisObject {
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            CmisObject::Node(node) => Some(node),
            CmisObject::Relationship(_) | CmisObject::Other => None,
        }
    }
}

impl From<NodeRef> for CmisObject {
    fn from(node: NodeRef) -> Self {
        CmisObject::Node(node)
    }
}

impl From<AssociationRef> for CmisObject {
    fn from(assoc: AssociationRef) -> Self {
        CmisObject::Relationship(assoc)
    }
}

impl fmt::Display for CmisObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmisObject::Node(node) => write!(f, "{}", node),
            CmisObject::Relationship(assoc) => write!(f, "{}", assoc),
            CmisObject::Other => write!(f, "<other>"),
        }
    }
}
