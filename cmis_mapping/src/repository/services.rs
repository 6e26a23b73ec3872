// src/repository/services.rs
//! Contracts of the repository services the mapping core consumes

use crate::errors::MappingResult;
use cmis_model::{AssociationRef, ChildAssociationRef, NodeRef, PropertyValue, QName};
use serde::{Deserialize, Serialize};

/// Well-known permission names
pub mod permissions {
    pub const READ: &str = "Read";
    pub const WRITE: &str = "Write";
    pub const ALL: &str = "All";

    pub const READ_PROPERTIES: &str = "ReadProperties";
    pub const WRITE_PROPERTIES: &str = "WriteProperties";
    pub const READ_CHILDREN: &str = "ReadChildren";
    pub const CREATE_CHILDREN: &str = "CreateChildren";
    pub const LINK_CHILDREN: &str = "LinkChildren";
    pub const CREATE_ASSOCIATIONS: &str = "CreateAssociations";
    pub const DELETE_NODE: &str = "DeleteNode";
    pub const READ_CONTENT: &str = "ReadContent";
    pub const WRITE_CONTENT: &str = "WriteContent";
    pub const CHECK_OUT: &str = "CheckOut";
    pub const CANCEL_CHECK_OUT: &str = "CancelCheckOut";
    pub const CHECK_IN: &str = "CheckIn";
    pub const READ_PERMISSIONS: &str = "ReadPermissions";
    pub const CHANGE_PERMISSIONS: &str = "ChangePermissions";
}

/// Outcome of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Allowed,
    Denied,
    Undetermined,
}

/// Kind of lock held on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockType {
    /// No one may modify the node, including the lock owner
    ReadOnly,
    /// Only the lock owner may modify the node
    Write,
    /// Only the lock owner may modify the node or add children
    Node,
}

/// One entry of a version history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub label: String,
    /// Frozen copy in the version store
    pub frozen: NodeRef,
    #[serde(default)]
    pub is_major: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

pub trait NodeService: Send + Sync {
    fn exists(&self, node: &NodeRef) -> bool;

    fn node_type(&self, node: &NodeRef) -> Option<QName>;

    fn property(&self, node: &NodeRef, name: &QName) -> Option<PropertyValue>;

    fn set_property(&self, node: &NodeRef, name: &QName, value: PropertyValue)
        -> MappingResult<()>;

    fn has_aspect(&self, node: &NodeRef, aspect: &QName) -> bool;

    fn aspects(&self, node: &NodeRef) -> Vec<QName>;

    /// Every parent association, primary first
    fn parent_assocs(&self, node: &NodeRef) -> Vec<ChildAssociationRef>;

    fn primary_parent(&self, node: &NodeRef) -> Option<ChildAssociationRef> {
        self.parent_assocs(node)
            .into_iter()
            .find(|assoc| assoc.is_primary)
    }

    /// Peer associations of type `assoc_type` whose source is `node`
    fn target_assocs(&self, node: &NodeRef, assoc_type: &QName) -> Vec<AssociationRef>;
}

pub trait PermissionService: Send + Sync {
    fn has_permission(&self, node: &NodeRef, permission: &str) -> AccessStatus;
}

pub trait LockService: Send + Sync {
    fn lock_type(&self, node: &NodeRef) -> Option<LockType>;
}

pub trait VersionService: Send + Sync {
    /// Live node a frozen version belongs to
    fn series_of(&self, frozen: &NodeRef) -> Option<NodeRef>;

    /// Version history of a live node, newest first
    fn history(&self, series: &NodeRef) -> Vec<VersionRecord>;
}
