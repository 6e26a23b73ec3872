// src/repository/mod.rs
//! Repository collaborators: service contracts, the bundle handed to the
//! mapping core, and an in-memory implementation

pub mod memory;
pub mod services;

pub use memory::{MemoryRepository, RepositoryFixture};
pub use services::{
    permissions, AccessStatus, LockService, LockType, NodeService, PermissionService,
    VersionRecord, VersionService,
};

use cmis_model::{DictionaryService, NamespacePrefixResolver, NodeRef};
use std::sync::Arc;

/// Services consumed by accessors and evaluators, plus the canonical root
#[derive(Clone)]
pub struct ServiceRegistry {
    pub nodes: Arc<dyn NodeService>,
    pub permissions: Arc<dyn PermissionService>,
    pub locks: Arc<dyn LockService>,
    pub versions: Arc<dyn VersionService>,
    pub dictionary: Arc<dyn DictionaryService>,
    pub namespaces: Arc<dyn NamespacePrefixResolver>,
    root: NodeRef,
}

impl ServiceRegistry {
    pub fn new(
        nodes: Arc<dyn NodeService>,
        permissions: Arc<dyn PermissionService>,
        locks: Arc<dyn LockService>,
        versions: Arc<dyn VersionService>,
        dictionary: Arc<dyn DictionaryService>,
        namespaces: Arc<dyn NamespacePrefixResolver>,
        root: NodeRef,
    ) -> Self {
        Self {
            nodes,
            permissions,
            locks,
            versions,
            dictionary,
            namespaces,
            root,
        }
    }

    /// Bundle whose every service is backed by one in-memory repository
    pub fn from_memory(repository: Arc<MemoryRepository>) -> Self {
        Self {
            nodes: repository.clone(),
            permissions: repository.clone(),
            locks: repository.clone(),
            versions: repository.clone(),
            dictionary: repository.dictionary(),
            namespaces: repository.namespaces(),
            root: repository.root().clone(),
        }
    }

    /// Canonical root folder
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn is_root(&self, node: &NodeRef) -> bool {
        &self.root == node
    }

    /// Live node of a frozen version, or `None` for a current node
    pub fn frozen_series(&self, node: &NodeRef) -> Option<NodeRef> {
        if node.is_in_version_store() {
            self.versions.series_of(node)
        } else {
            None
        }
    }

    pub fn is_frozen_version(&self, node: &NodeRef) -> bool {
        node.is_in_version_store() || self.versions.series_of(node).is_some()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
