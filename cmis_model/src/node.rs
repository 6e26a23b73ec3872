// src/node.rs
//! References to repository nodes and associations

use crate::error::ModelError;
use crate::qname::QName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const URI_FILLER: &str = "://";

/// Store reference of the form `protocol://identifier`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRef {
    pub protocol: String,
    pub identifier: String,
}

impl StoreRef {
    pub const PROTOCOL_WORKSPACE: &'static str = "workspace";
    /// Protocol of the store holding frozen versions
    pub const PROTOCOL_VERSION: &'static str = "versionStore";

    pub fn new(protocol: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            identifier: identifier.into(),
        }
    }

    /// `workspace://SpacesStore`
    pub fn spaces_store() -> Self {
        Self::new(Self::PROTOCOL_WORKSPACE, "SpacesStore")
    }
}

impl fmt::Display for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.protocol, URI_FILLER, self.identifier)
    }
}

/// Node reference of the form `protocol://identifier/id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRef {
    pub store: StoreRef,
    pub id: String,
}

impl NodeRef {
    pub fn new(store: StoreRef, id: impl Into<String>) -> Self {
        Self {
            store,
            id: id.into(),
        }
    }

    /// Node in the default workspace store
    pub fn workspace(id: impl Into<String>) -> Self {
        Self::new(StoreRef::spaces_store(), id)
    }

    pub fn is_in_version_store(&self) -> bool {
        self.store.protocol == StoreRef::PROTOCOL_VERSION
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.id)
    }
}

impl FromStr for NodeRef {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ModelError::MalformedNodeRef {
            value: value.to_string(),
        };

        let (protocol, rest) = value.split_once(URI_FILLER).ok_or_else(malformed)?;
        let (identifier, id) = rest.split_once('/').ok_or_else(malformed)?;
        if protocol.is_empty() || identifier.is_empty() || id.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(StoreRef::new(protocol, identifier), id))
    }
}

impl TryFrom<String> for NodeRef {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeRef> for String {
    fn from(node: NodeRef) -> Self {
        node.to_string()
    }
}

/// Peer (non-child) association between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociationRef {
    pub id: u64,
    pub source: NodeRef,
    pub type_qname: QName,
    pub target: NodeRef,
}

impl AssociationRef {
    pub fn new(id: u64, source: NodeRef, type_qname: QName, target: NodeRef) -> Self {
        Self {
            id,
            source,
            type_qname,
            target,
        }
    }
}

impl fmt::Display for AssociationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.id, self.source, self.type_qname, self.target
        )
    }
}

/// Parent/child association
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildAssociationRef {
    pub parent: NodeRef,
    pub child: NodeRef,
    pub type_qname: QName,
    pub is_primary: bool,
}

/// Content property value: where the bytes live and how to read them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentData {
    pub content_url: String,
    pub mimetype: String,
    pub size: u64,
    #[serde(default)]
    pub encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ref_parse_and_display() {
        let node: NodeRef = "workspace://SpacesStore/abc-123".parse().unwrap();
        assert_eq!(node.store, StoreRef::spaces_store());
        assert_eq!(node.id, "abc-123");
        assert_eq!(node.to_string(), "workspace://SpacesStore/abc-123");
    }

    #[test]
    fn test_node_ref_rejects_malformed() {
        assert!("SpacesStore/abc".parse::<NodeRef>().is_err());
        assert!("workspace://SpacesStore".parse::<NodeRef>().is_err());
        assert!("workspace://SpacesStore/".parse::<NodeRef>().is_err());
    }

    #[test]
    fn test_version_store_detection() {
        let frozen = NodeRef::new(StoreRef::new(StoreRef::PROTOCOL_VERSION, "version2Store"), "v1");
        assert!(frozen.is_in_version_store());
        assert!(!NodeRef::workspace("n1").is_in_version_store());
    }
}
