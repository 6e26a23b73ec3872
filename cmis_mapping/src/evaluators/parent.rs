// src/evaluators/parent.rs
//! Evaluators that look at where a node is filed

use super::{require_node, ActionEvaluator};
use crate::object::CmisObject;
use crate::repository::ServiceRegistry;
use cmis_model::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentTypeMode {
    /// Filed in at least one folder besides its primary parent
    MultiFiled,
    /// The root folder is one of its parents
    RootParent,
    /// The root folder is its primary parent
    PrimaryRootParent,
}

#[derive(Debug, Clone)]
pub struct ParentTypeEvaluator {
    action: Action,
    services: ServiceRegistry,
    mode: ParentTypeMode,
    expected: bool,
    default: bool,
}

impl ParentTypeEvaluator {
    pub fn new(
        action: Action,
        services: ServiceRegistry,
        mode: ParentTypeMode,
        expected: bool,
        default: bool,
    ) -> Self {
        Self {
            action,
            services,
            mode,
            expected,
            default,
        }
    }
}

impl ActionEvaluator for ParentTypeEvaluator {
    fn action(&self) -> Action {
        self.action
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        let node = match object {
            CmisObject::Node(node) => node,
            CmisObject::Relationship(_) | CmisObject::Other => return self.default,
        };
        if !require_node(self.services.nodes.as_ref(), node, self.action) {
            return false;
        }

        let parents = self.services.nodes.parent_assocs(node);
        let root = self.services.root();
        let satisfied = match self.mode {
            ParentTypeMode::MultiFiled => parents.iter().any(|assoc| !assoc.is_primary),
            _ if self.services.is_root(node) => false,
            ParentTypeMode::RootParent => parents.iter().any(|assoc| &assoc.parent == root),
            ParentTypeMode::PrimaryRootParent => parents
                .iter()
                .any(|assoc| assoc.is_primary && &assoc.parent == root),
        };
        satisfied == self.expected
    }

    fn name(&self) -> String {
        format!("ParentType[{}: {:?} expected={}]", self.action, self.mode, self.expected)
    }
}

/// Evaluates the wrapped evaluator against the primary parent
#[derive(Debug)]
pub struct ParentEvaluator {
    services: ServiceRegistry,
    inner: Box<dyn ActionEvaluator>,
}

impl ParentEvaluator {
    pub fn new(services: ServiceRegistry, inner: Box<dyn ActionEvaluator>) -> Self {
        Self { services, inner }
    }
}

impl ActionEvaluator for ParentEvaluator {
    fn action(&self) -> Action {
        self.inner.action()
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        match object {
            CmisObject::Node(node) if self.services.is_root(node) => false,
            CmisObject::Node(node) => match self.services.nodes.primary_parent(node) {
                Some(assoc) => self.inner.is_allowed(&CmisObject::Node(assoc.parent)),
                None => false,
            },
            CmisObject::Relationship(_) | CmisObject::Other => false,
        }
    }

    fn name(&self) -> String {
        format!("Parent[{}]", self.inner.name())
    }
}

/// Fixed answer for the root folder, delegation otherwise
#[derive(Debug)]
pub struct RootSpecialEvaluator {
    services: ServiceRegistry,
    root_value: bool,
    inner: Box<dyn ActionEvaluator>,
}

impl RootSpecialEvaluator {
    pub fn new(services: ServiceRegistry, root_value: bool, inner: Box<dyn ActionEvaluator>) -> Self {
        Self {
            services,
            root_value,
            inner,
        }
    }
}

impl ActionEvaluator for RootSpecialEvaluator {
    fn action(&self) -> Action {
        self.inner.action()
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        match object {
            CmisObject::Node(node) if self.services.is_root(node) => self.root_value,
            CmisObject::Node(_) | CmisObject::Relationship(_) | CmisObject::Other => {
                self.inner.is_allowed(object)
            }
        }
    }

    fn name(&self) -> String {
        format!("RootSpecial[root={}, {}]", self.root_value, self.inner.name())
    }
}
