// src/evaluators/mod.rs
//! Action evaluators
//!
//! An evaluator answers whether one [`Action`] is allowed on one
//! [`CmisObject`]. Evaluators never fail: objects they cannot judge get the
//! configured default, and a node that must exist but does not gets `false`.

pub mod basic;
pub mod composite;
pub mod parent;
pub mod type_attribute;
pub mod version;

pub use basic::{AspectEvaluator, FixedEvaluator, LockEvaluator, PermissionEvaluator, PropertyDescriptor, PropertyValueEvaluator};
pub use composite::CompositeEvaluator;
pub use parent::{ParentEvaluator, ParentTypeEvaluator, ParentTypeMode, RootSpecialEvaluator};
pub use type_attribute::{AttributeSelector, AttributeValue, TypeAttribute, TypeAttributeEvaluator};
pub use version::CurrentVersionEvaluator;

use crate::object::CmisObject;
use cmis_model::logging::codes;
use cmis_model::{log_warning, Action, NodeRef};

pub trait ActionEvaluator: Send + Sync {
    fn action(&self) -> Action;

    fn is_allowed(&self, object: &CmisObject) -> bool;

    /// Short description used in registration logs
    fn name(&self) -> String;
}

impl std::fmt::Debug for dyn ActionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether `node` exists, warning when it does not
pub(crate) fn require_node(
    nodes: &dyn crate::repository::NodeService,
    node: &NodeRef,
    action: Action,
) -> bool {
    if nodes.exists(node) {
        return true;
    }
    log_warning!(codes::evaluator::MISSING_NODE, "Evaluated action on missing node",
        "node" => node, "action" => action);
    false
}

/// Combine verdicts the way aspect and property evaluators do: any-one
/// stops on the first satisfied check, all-must stops on the first failure.
/// Running out of checks yields `all_must_concur` itself.
pub(crate) fn concur<I>(checks: I, all_must_concur: bool) -> bool
where
    I: IntoIterator<Item = bool>,
{
    for satisfied in checks {
        if satisfied && !all_must_concur {
            return true;
        }
        if !satisfied && all_must_concur {
            return false;
        }
    }
    all_must_concur
}
