// src/evaluators/composite.rs
//! OR/AND over ordered conditions with short-circuit

use super::ActionEvaluator;
use crate::object::CmisObject;
use cmis_model::Action;

#[derive(Debug)]
pub struct CompositeEvaluator {
    action: Action,
    conditions: Vec<Box<dyn ActionEvaluator>>,
    /// OR when set, AND otherwise
    any: bool,
    default: bool,
}

impl CompositeEvaluator {
    /// Allowed as soon as one condition allows
    pub fn any(action: Action, default: bool) -> Self {
        Self {
            action,
            conditions: Vec::new(),
            any: true,
            default,
        }
    }

    /// Denied as soon as one condition denies
    pub fn all(action: Action, default: bool) -> Self {
        Self {
            action,
            conditions: Vec::new(),
            any: false,
            default,
        }
    }

    pub fn with(mut self, condition: Box<dyn ActionEvaluator>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl ActionEvaluator for CompositeEvaluator {
    fn action(&self) -> Action {
        self.action
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        let mut result = self.default;
        for condition in &self.conditions {
            result = condition.is_allowed(object);
            if result == self.any {
                break;
            }
        }
        result
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.conditions.iter().map(|c| c.name()).collect();
        format!(
            "Composite[{} {}: {}]",
            self.action,
            if self.any { "OR" } else { "AND" },
            names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fixed answer that counts how often it is asked
    struct Counting {
        allowed: bool,
        calls: Arc<AtomicUsize>,
    }

    impl ActionEvaluator for Counting {
        fn action(&self) -> Action {
            Action::CanCheckOut
        }

        fn is_allowed(&self, _object: &CmisObject) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.allowed
        }

        fn name(&self) -> String {
            format!("Counting[{}]", self.allowed)
        }
    }

    fn composite(mut composite: CompositeEvaluator, verdicts: &[bool]) -> (CompositeEvaluator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        for allowed in verdicts {
            composite = composite.with(Box::new(Counting {
                allowed: *allowed,
                calls: Arc::clone(&calls),
            }));
        }
        (composite, calls)
    }

    #[test]
    fn test_and_stops_on_first_denial() {
        let (evaluator, calls) = composite(CompositeEvaluator::all(Action::CanCheckOut, true), &[true, false, true]);
        assert!(!evaluator.is_allowed(&CmisObject::Other));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_or_stops_on_first_approval() {
        let (evaluator, calls) = composite(CompositeEvaluator::any(Action::CanCheckOut, false), &[false, true, false]);
        assert!(evaluator.is_allowed(&CmisObject::Other));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_exhausted_conditions_return_last_verdict() {
        let (evaluator, calls) = composite(CompositeEvaluator::any(Action::CanCheckOut, true), &[false, false]);
        assert!(!evaluator.is_allowed(&CmisObject::Other));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_composite_returns_default() {
        assert!(CompositeEvaluator::all(Action::CanCheckOut, true).is_allowed(&CmisObject::Other));
        assert!(!CompositeEvaluator::any(Action::CanCheckOut, false).is_allowed(&CmisObject::Other));
    }
}
