// src/evaluators/version.rs

use super::ActionEvaluator;
use crate::object::CmisObject;
use crate::repository::ServiceRegistry;
use cmis_model::Action;

/// Fixed answer for frozen versions, delegation for current objects
#[derive(Debug)]
pub struct CurrentVersionEvaluator {
    services: ServiceRegistry,
    frozen_value: bool,
    inner: Box<dyn ActionEvaluator>,
}

impl CurrentVersionEvaluator {
    pub fn new(services: ServiceRegistry, frozen_value: bool, inner: Box<dyn ActionEvaluator>) -> Self {
        Self {
            services,
            frozen_value,
            inner,
        }
    }
}

impl ActionEvaluator for CurrentVersionEvaluator {
    fn action(&self) -> Action {
        self.inner.action()
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        match object {
            CmisObject::Node(node) if self.services.is_frozen_version(node) => self.frozen_value,
            CmisObject::Node(_) | CmisObject::Relationship(_) | CmisObject::Other => {
                self.inner.is_allowed(object)
            }
        }
    }

    fn name(&self) -> String {
        format!("CurrentVersion[frozen={}, {}]", self.frozen_value, self.inner.name())
    }
}
