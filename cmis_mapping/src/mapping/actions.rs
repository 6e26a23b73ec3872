// src/mapping/actions.rs
//! Built-in allowable-action evaluators for each base scope

use crate::errors::MappingResult;
use crate::evaluators::{
    ActionEvaluator, AspectEvaluator, CompositeEvaluator, CurrentVersionEvaluator,
    FixedEvaluator, LockEvaluator, ParentEvaluator, PermissionEvaluator, RootSpecialEvaluator,
};
use crate::registry::{ActionRegistry, ActionRegistryBuilder};
use crate::repository::permissions::*;
use crate::repository::{LockType, ServiceRegistry};
use cmis_model::models::content_model;
use cmis_model::{Action, Scope};

/// Shorthands over one service bundle
struct Evaluators<'a> {
    services: &'a ServiceRegistry,
}

impl Evaluators<'_> {
    fn fixed(&self, action: Action, allowed: bool) -> Box<dyn ActionEvaluator> {
        Box::new(FixedEvaluator::new(action, allowed))
    }

    fn permission(&self, action: Action, permissions: &[&str]) -> Box<dyn ActionEvaluator> {
        Box::new(PermissionEvaluator::new(action, self.services.clone(), permissions))
    }

    /// Denied on frozen versions
    fn current(&self, inner: Box<dyn ActionEvaluator>) -> Box<dyn ActionEvaluator> {
        Box::new(CurrentVersionEvaluator::new(self.services.clone(), false, inner))
    }

    fn parent(&self, inner: Box<dyn ActionEvaluator>) -> Box<dyn ActionEvaluator> {
        Box::new(ParentEvaluator::new(self.services.clone(), inner))
    }

    /// Denied on the root folder
    fn not_root(&self, inner: Box<dyn ActionEvaluator>) -> Box<dyn ActionEvaluator> {
        Box::new(RootSpecialEvaluator::new(self.services.clone(), false, inner))
    }

    fn check_out(&self) -> Box<dyn ActionEvaluator> {
        let action = Action::CanCheckOut;
        Box::new(
            CompositeEvaluator::all(action, false)
                .with(Box::new(AspectEvaluator::new(
                    action,
                    self.services.clone(),
                    vec![content_model::ASPECT_WORKING_COPY],
                    false,
                    true,
                    false,
                )))
                .with(Box::new(LockEvaluator::new(
                    action,
                    self.services.clone(),
                    LockType::ReadOnly,
                    false,
                    false,
                )))
                .with(self.permission(action, &[CHECK_OUT])),
        )
    }
}

fn document_evaluators(e: &Evaluators<'_>) -> Vec<Box<dyn ActionEvaluator>> {
    use Action::*;
    vec![
        e.current(e.permission(CanDeleteObject, &[DELETE_NODE])),
        e.current(e.permission(CanUpdateProperties, &[WRITE_PROPERTIES])),
        e.permission(CanGetProperties, &[READ_PROPERTIES]),
        e.fixed(CanGetObjectRelationships, true),
        e.parent(e.permission(CanGetObjectParents, &[READ_PERMISSIONS])),
        e.current(e.permission(CanMoveObject, &[DELETE_NODE])),
        e.current(e.permission(CanDeleteContentStream, &[WRITE_PROPERTIES, WRITE_CONTENT])),
        e.current(e.check_out()),
        e.current(e.permission(CanCancelCheckOut, &[CANCEL_CHECK_OUT])),
        e.permission(CanCheckIn, &[CHECK_IN]),
        e.current(e.permission(CanSetContentStream, &[WRITE_CONTENT])),
        e.fixed(CanGetAllVersions, true),
        e.current(e.parent(e.permission(CanAddObjectToFolder, &[LINK_CHILDREN]))),
        e.current(e.parent(e.fixed(CanRemoveObjectFromFolder, true))),
        e.permission(CanGetContentStream, &[READ_CONTENT]),
        e.fixed(CanApplyPolicy, false),
        e.fixed(CanGetAppliedPolicies, true),
        e.fixed(CanRemovePolicy, false),
        e.current(e.fixed(CanCreateRelationship, true)),
        e.fixed(CanGetRenditions, true),
        e.permission(CanGetAcl, &[READ_PERMISSIONS]),
        e.current(e.permission(CanApplyAcl, &[CHANGE_PERMISSIONS])),
    ]
}

fn folder_evaluators(e: &Evaluators<'_>) -> Vec<Box<dyn ActionEvaluator>> {
    use Action::*;
    vec![
        e.not_root(e.permission(CanDeleteObject, &[DELETE_NODE])),
        e.permission(CanUpdateProperties, &[WRITE_PROPERTIES]),
        e.permission(CanGetFolderTree, &[READ_CHILDREN]),
        e.permission(CanGetProperties, &[READ_PROPERTIES]),
        e.fixed(CanGetObjectRelationships, true),
        e.parent(e.permission(CanGetObjectParents, &[READ_PERMISSIONS])),
        e.not_root(e.parent(e.permission(CanGetFolderParent, &[READ_PERMISSIONS]))),
        e.permission(CanGetDescendants, &[READ_CHILDREN]),
        e.not_root(e.permission(CanMoveObject, &[DELETE_NODE])),
        e.fixed(CanApplyPolicy, false),
        e.fixed(CanGetAppliedPolicies, true),
        e.fixed(CanRemovePolicy, false),
        e.permission(CanGetChildren, &[READ_CHILDREN]),
        e.permission(CanCreateDocument, &[CREATE_CHILDREN]),
        e.permission(CanCreateFolder, &[CREATE_CHILDREN]),
        e.permission(CanCreateRelationship, &[CREATE_ASSOCIATIONS]),
        e.not_root(e.permission(CanDeleteTree, &[DELETE_NODE])),
        e.permission(CanGetAcl, &[READ_PERMISSIONS]),
        e.permission(CanApplyAcl, &[CHANGE_PERMISSIONS]),
    ]
}

fn relationship_evaluators(e: &Evaluators<'_>) -> Vec<Box<dyn ActionEvaluator>> {
    use Action::*;
    vec![
        e.fixed(CanDeleteObject, true),
        e.fixed(CanUpdateProperties, false),
        e.fixed(CanGetProperties, true),
        e.fixed(CanGetAcl, false),
        e.fixed(CanApplyAcl, false),
    ]
}

const POLICY_ACTIONS: [Action; 10] = [
    Action::CanDeleteObject,
    Action::CanUpdateProperties,
    Action::CanGetProperties,
    Action::CanGetObjectParents,
    Action::CanMoveObject,
    Action::CanAddObjectToFolder,
    Action::CanRemoveObjectFromFolder,
    Action::CanGetObjectRelationships,
    Action::CanGetAcl,
    Action::CanApplyAcl,
];

/// Registry holding every built-in evaluator, in canonical order per scope
pub fn builtin_registry(services: &ServiceRegistry) -> MappingResult<ActionRegistry> {
    let e = Evaluators { services };
    let policy = POLICY_ACTIONS.iter().map(|action| e.fixed(*action, false)).collect();

    let mut builder = ActionRegistryBuilder::new();
    for (scope, evaluators) in [
        (Scope::Document, document_evaluators(&e)),
        (Scope::Folder, folder_evaluators(&e)),
        (Scope::Relationship, relationship_evaluators(&e)),
        (Scope::Policy, policy),
    ] {
        for evaluator in evaluators {
            builder = builder.add(scope, evaluator);
        }
    }
    builder.build()
}
