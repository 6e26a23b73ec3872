// src/evaluators/basic.rs
//! Evaluators that look at one node: fixed answers, permissions, aspects,
//! locks and property values

use super::{concur, require_node, ActionEvaluator};
use crate::object::CmisObject;
use crate::repository::{AccessStatus, LockType, ServiceRegistry};
use cmis_model::{Action, PropertyValue, QName};

// ============================================================================
// FIXED
// ============================================================================

#[derive(Debug, Clone)]
pub struct FixedEvaluator {
    action: Action,
    allowed: bool,
}

impl FixedEvaluator {
    pub fn new(action: Action, allowed: bool) -> Self {
        Self { action, allowed }
    }
}

impl ActionEvaluator for FixedEvaluator {
    fn action(&self) -> Action {
        self.action
    }

    fn is_allowed(&self, _object: &CmisObject) -> bool {
        self.allowed
    }

    fn name(&self) -> String {
        format!("Fixed[{}={}]", self.action, self.allowed)
    }
}

// ============================================================================
// PERMISSIONS
// ============================================================================

/// Allowed unless any required permission is denied
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    action: Action,
    services: ServiceRegistry,
    permissions: Vec<String>,
    default: bool,
}

impl PermissionEvaluator {
    pub fn new(action: Action, services: ServiceRegistry, permissions: &[&str]) -> Self {
        Self {
            action,
            services,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            default: false,
        }
    }

    /// Answer for objects that are not nodes
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

impl ActionEvaluator for PermissionEvaluator {
    fn action(&self) -> Action {
        self.action
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        match object {
            CmisObject::Node(node) => !self.permissions.iter().any(|permission| {
                self.services.permissions.has_permission(node, permission) == AccessStatus::Denied
            }),
            CmisObject::Relationship(_) | CmisObject::Other => self.default,
        }
    }

    fn name(&self) -> String {
        format!("Permission[{}: {}]", self.action, self.permissions.join(","))
    }
}

// ============================================================================
// ASPECTS
// ============================================================================

#[derive(Debug, Clone)]
pub struct AspectEvaluator {
    action: Action,
    services: ServiceRegistry,
    aspects: Vec<QName>,
    expected: bool,
    all_must_concur: bool,
    default: bool,
}

impl AspectEvaluator {
    /// `expected` is whether the aspects should be present
    pub fn new(
        action: Action,
        services: ServiceRegistry,
        aspects: Vec<QName>,
        expected: bool,
        all_must_concur: bool,
        default: bool,
    ) -> Self {
        Self {
            action,
            services,
            aspects,
            expected,
            all_must_concur,
            default,
        }
    }
}

impl ActionEvaluator for AspectEvaluator {
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
        let checks = self
            .aspects
            .iter()
            .map(|aspect| self.services.nodes.has_aspect(node, aspect) ^ !self.expected);
        concur(checks, self.all_must_concur)
    }

    fn name(&self) -> String {
        let aspects: Vec<String> = self.aspects.iter().map(|a| a.to_string()).collect();
        format!(
            "Aspect[{}: {} expected={} all={}]",
            self.action,
            aspects.join(","),
            self.expected,
            self.all_must_concur
        )
    }
}

// ============================================================================
// LOCKS
// ============================================================================

#[derive(Debug, Clone)]
pub struct LockEvaluator {
    action: Action,
    services: ServiceRegistry,
    lock_type: LockType,
    expected: bool,
    default: bool,
}

impl LockEvaluator {
    pub fn new(
        action: Action,
        services: ServiceRegistry,
        lock_type: LockType,
        expected: bool,
        default: bool,
    ) -> Self {
        Self {
            action,
            services,
            lock_type,
            expected,
            default,
        }
    }
}

impl ActionEvaluator for LockEvaluator {
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
        let matches = self.services.locks.lock_type(node) == Some(self.lock_type);
        matches == self.expected
    }

    fn name(&self) -> String {
        format!(
            "Lock[{}: {:?} expected={}]",
            self.action, self.lock_type, self.expected
        )
    }
}

// ============================================================================
// PROPERTY VALUES
// ============================================================================

/// Expected value of one native property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub property: QName,
    pub value: Option<PropertyValue>,
    /// When false the property only has to be set
    pub allow_null: bool,
}

impl PropertyDescriptor {
    pub fn new(property: QName, value: Option<PropertyValue>, allow_null: bool) -> Self {
        Self {
            property,
            value,
            allow_null,
        }
    }

    fn is_satisfied(&self, actual: Option<PropertyValue>) -> bool {
        if self.allow_null {
            actual == self.value
        } else {
            actual.is_some()
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyValueEvaluator {
    action: Action,
    services: ServiceRegistry,
    descriptors: Vec<PropertyDescriptor>,
    all_must_concur: bool,
    default: bool,
}

impl PropertyValueEvaluator {
    pub fn new(
        action: Action,
        services: ServiceRegistry,
        descriptors: Vec<PropertyDescriptor>,
        all_must_concur: bool,
        default: bool,
    ) -> Self {
        Self {
            action,
            services,
            descriptors,
            all_must_concur,
            default,
        }
    }
}

impl ActionEvaluator for PropertyValueEvaluator {
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
        let checks = self.descriptors.iter().map(|descriptor| {
            descriptor.is_satisfied(self.services.nodes.property(node, &descriptor.property))
        });
        concur(checks, self.all_must_concur)
    }

    fn name(&self) -> String {
        let properties: Vec<String> = self.descriptors.iter().map(|d| d.property.to_string()).collect();
        format!("PropertyValue[{}: {}]", self.action, properties.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::permissions;
    use crate::testing;
    use cmis_model::models::content_model;

    #[test]
    fn test_fixed_ignores_object() {
        let evaluator = FixedEvaluator::new(Action::CanApplyPolicy, false);
        assert!(!evaluator.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!evaluator.is_allowed(&CmisObject::Other));
    }

    #[test]
    fn test_permission_denied_by_any_required_permission() {
        let services = testing::services();
        let delete = PermissionEvaluator::new(
            Action::CanDeleteObject,
            services.clone(),
            &[permissions::DELETE_NODE],
        );
        assert!(delete.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!delete.is_allowed(&CmisObject::Node(testing::plain())));

        let both = PermissionEvaluator::new(
            Action::CanDeleteContentStream,
            services,
            &[permissions::WRITE_PROPERTIES, permissions::DELETE_NODE],
        );
        assert!(!both.is_allowed(&CmisObject::Node(testing::plain())));
        assert!(!both.is_allowed(&CmisObject::Other));
        assert!(both.with_default(true).is_allowed(&CmisObject::Other));
    }

    #[test]
    fn test_aspect_with_empty_list_returns_concurrence_flag() {
        let services = testing::services();
        let node = CmisObject::Node(testing::report());
        let all = AspectEvaluator::new(Action::CanCheckOut, services.clone(), vec![], true, true, false);
        assert!(all.is_allowed(&node));
        let any = AspectEvaluator::new(Action::CanCheckOut, services, vec![], true, false, true);
        assert!(!any.is_allowed(&node));
    }

    #[test]
    fn test_aspect_expectations() {
        let services = testing::services();
        let absent_working_copy = AspectEvaluator::new(
            Action::CanCheckOut,
            services.clone(),
            vec![content_model::ASPECT_WORKING_COPY],
            false,
            true,
            false,
        );
        assert!(absent_working_copy.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!absent_working_copy.is_allowed(&CmisObject::Node(testing::working_copy())));
        assert!(!absent_working_copy.is_allowed(&CmisObject::Node(testing::missing())));

        let any_present = AspectEvaluator::new(
            Action::CanCheckIn,
            services,
            vec![content_model::ASPECT_WORKING_COPY, content_model::ASPECT_VERSIONABLE],
            true,
            false,
            false,
        );
        assert!(any_present.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!any_present.is_allowed(&CmisObject::Node(testing::plain())));
        assert!(!any_present.is_allowed(&CmisObject::Other));
    }

    #[test]
    fn test_lock_evaluator() {
        let services = testing::services();
        let not_locked = LockEvaluator::new(Action::CanCheckOut, services.clone(), LockType::ReadOnly, false, true);
        assert!(not_locked.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!not_locked.is_allowed(&CmisObject::Node(testing::locked())));
        assert!(!not_locked.is_allowed(&CmisObject::Node(testing::missing())));
        assert!(not_locked.is_allowed(&CmisObject::Other));

        let locked = LockEvaluator::new(Action::CanCheckOut, services, LockType::ReadOnly, true, false);
        assert!(locked.is_allowed(&CmisObject::Node(testing::locked())));
    }

    #[test]
    fn test_property_value_descriptors() {
        let services = testing::services();
        let owner_set = PropertyDescriptor::new(content_model::PROP_WORKING_COPY_OWNER, None, false);
        let evaluator = PropertyValueEvaluator::new(
            Action::CanCheckIn,
            services.clone(),
            vec![owner_set],
            true,
            false,
        );
        assert!(evaluator.is_allowed(&CmisObject::Node(testing::working_copy())));
        assert!(!evaluator.is_allowed(&CmisObject::Node(testing::report())));

        // allow-null descriptors compare values, absent equals absent
        let no_owner = PropertyDescriptor::new(content_model::PROP_WORKING_COPY_OWNER, None, true);
        let named = PropertyDescriptor::new(
            content_model::PROP_NAME,
            Some(PropertyValue::string("q1.txt")),
            true,
        );
        let evaluator = PropertyValueEvaluator::new(
            Action::CanUpdateProperties,
            services,
            vec![no_owner, named],
            true,
            false,
        );
        assert!(evaluator.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!evaluator.is_allowed(&CmisObject::Node(testing::plain())));
    }
}
