// src/mapping/mod.rs
//! The mapping service
//!
//! [`CmisMapping`] owns the type tables, the property accessor table and the
//! action registry. Everything is built once in [`CmisMapping::new`]; after
//! that the service is read-only and may be shared across threads.

pub mod actions;
pub mod permissions;
pub mod types;

pub use permissions::PermissionFormat;
pub use types::TypeMapping;

use crate::accessors::{builtin_accessors, direct_accessor, AccessorContext, PropertyAccessor};
use crate::errors::{MappingError, MappingResult};
use crate::object::CmisObject;
use crate::query::QueryContext;
use crate::registry::ActionRegistry;
use crate::repository::ServiceRegistry;
use cmis_model::logging::codes;
use cmis_model::types::{TypeDefinition, TypeDefinitionSource};
use cmis_model::{
    log_error, log_info, log_success, Action, DictionaryService, MappingPreferences, QName,
    QNameCache, Scope, TypeId,
};
use indexmap::IndexMap;
use std::sync::Arc;

pub struct CmisMapping {
    types: Arc<TypeMapping>,
    context: Arc<AccessorContext>,
    accessors: IndexMap<String, Arc<PropertyAccessor>>,
    actions: ActionRegistry,
    query: QueryContext,
}

impl CmisMapping {
    pub fn new(services: ServiceRegistry, preferences: &MappingPreferences) -> MappingResult<Self> {
        let cache = QNameCache::from_preferences(Arc::clone(&services.namespaces), preferences)?;
        let types = Arc::new(TypeMapping::new(
            Arc::clone(&services.dictionary),
            Arc::clone(&services.namespaces),
            Arc::new(cache),
        ));
        let context = Arc::new(AccessorContext::new(services.clone(), Arc::clone(&types)));

        let actions = actions::builtin_registry(&services)?;
        log_success!(codes::success::EVALUATORS_REGISTERED, "Action evaluators registered",
            "count" => actions.len());

        let mut mapping = Self {
            types,
            accessors: IndexMap::new(),
            actions,
            query: QueryContext::from_preferences(preferences),
            context,
        };
        for accessor in builtin_accessors(&mapping.context) {
            mapping.register_accessor(accessor)?;
        }
        log_success!(codes::success::ACCESSORS_REGISTERED, "Property accessors registered",
            "count" => mapping.accessors.len());

        log_success!(codes::success::MAPPING_INITIALIZED, "CMIS mapping initialized",
            "accessors" => mapping.accessors.len(),
            "evaluators" => mapping.actions.len(),
            "sort_locale" => mapping.query.sort_locale());
        Ok(mapping)
    }

    pub fn types(&self) -> &Arc<TypeMapping> {
        &self.types
    }

    pub fn accessor_context(&self) -> &Arc<AccessorContext> {
        &self.context
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.context.services
    }

    pub fn cache(&self) -> &Arc<QNameCache> {
        self.types.cache()
    }

    pub fn query_context(&self) -> &QueryContext {
        &self.query
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.actions
    }

    // ========================================================================
    // PROPERTY ACCESSORS
    // ========================================================================

    /// Register an accessor under its property id
    pub fn register_accessor(&mut self, accessor: PropertyAccessor) -> MappingResult<()> {
        let property = accessor.property_id().to_string();
        if self.accessors.contains_key(&property) {
            log_error!(codes::registry::DUPLICATE_ACCESSOR, "Duplicate property accessor",
                "property" => &property);
            return Err(MappingError::DuplicateAccessor { property });
        }
        self.accessors.insert(property, Arc::new(accessor));
        Ok(())
    }

    /// Registered accessors in registration order
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<PropertyAccessor>> {
        self.accessors.values()
    }

    /// Accessor for an external property id
    ///
    /// Ids without a registered accessor that name a native property get a
    /// direct accessor built on the spot.
    pub fn property_accessor(&self, property_id: &str) -> MappingResult<Arc<PropertyAccessor>> {
        if let Some(accessor) = self.accessors.get(property_id) {
            return Ok(Arc::clone(accessor));
        }

        let native = self
            .types
            .resolve_property_id(property_id)
            .and_then(|qname| self.types.dictionary().property(&qname));
        match native {
            Some(definition) => {
                log_info!("Synthesized direct accessor", "property" => property_id,
                    "native" => &definition.name);
                Ok(Arc::new(direct_accessor(property_id, definition, &self.context)))
            }
            None => {
                log_error!(codes::property::UNKNOWN_PROPERTY, "Unknown property",
                    "property" => property_id);
                Err(MappingError::invalid_argument(format!(
                    "unknown property '{}'",
                    property_id
                )))
            }
        }
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    pub fn type_id(&self, scope: Scope, type_qname: &QName) -> MappingResult<TypeId> {
        self.types.type_id(scope, type_qname)
    }

    pub fn type_id_for_class(&self, class: &QName) -> Option<TypeId> {
        self.types.type_id_for_class(class)
    }

    pub fn type_id_from_external(&self, id: &str) -> MappingResult<TypeId> {
        self.types.type_id_from_external(id)
    }

    pub fn classify(&self, class: &QName) -> Option<Scope> {
        self.types.classify(class)
    }

    pub fn resolve_property_name(&self, name: &str) -> Option<QName> {
        self.types.resolve_property_name(name)
    }

    pub fn type_definition(&self, native: &QName) -> Option<TypeDefinition> {
        self.types.type_definition(native)
    }

    // ========================================================================
    // ACTIONS AND PERMISSIONS
    // ========================================================================

    /// Allowed actions of `object` evaluated in `scope`
    pub fn allowable_actions(&self, scope: Scope, object: &CmisObject) -> Vec<Action> {
        self.actions.allowable_actions(scope, object)
    }

    /// Scope an object is evaluated in: its type's scope for nodes
    pub fn scope_of(&self, object: &CmisObject) -> Option<Scope> {
        match object {
            CmisObject::Node(node) => self
                .services()
                .nodes
                .node_type(node)
                .and_then(|node_type| self.types.type_id_for_class(&node_type))
                .map(|type_id| type_id.scope()),
            CmisObject::Relationship(_) => Some(Scope::Relationship),
            CmisObject::Other => None,
        }
    }

    /// Allowed actions of `object` in its own scope; empty when it has none
    pub fn allowable_actions_for(&self, object: &CmisObject) -> Vec<Action> {
        self.scope_of(object)
            .map(|scope| self.allowable_actions(scope, object))
            .unwrap_or_default()
    }

    pub fn reported_permissions(
        &self,
        permission: &str,
        implied: &[String],
        has_full: bool,
        is_direct: bool,
        format: PermissionFormat,
    ) -> Vec<(String, bool)> {
        permissions::reported_permissions(permission, implied, has_full, is_direct, format)
    }

    pub fn set_permission(&self, permission: &str) -> String {
        permissions::set_permission(permission)
    }
}

impl std::fmt::Debug for CmisMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmisMapping")
            .field("types", &self.types)
            .field("accessors", &self.accessors.len())
            .field("actions", &self.actions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::values::Fixed;
    use crate::accessors::PropertyAccessor;
    use crate::testing;
    use assert_matches::assert_matches;
    use cmis_model::models::{content_model, property_ids};
    use cmis_model::{CmisPropertyDefinition, PropertyType, PropertyValue};

    #[test]
    fn test_registered_accessor_wins() {
        let mapping = testing::mapping();
        let name = mapping.property_accessor(property_ids::NAME).unwrap();
        assert_eq!(name.property_id(), property_ids::NAME);
        assert_eq!(mapping.accessors().count(), 29);
    }

    #[test]
    fn test_native_properties_get_direct_accessors() {
        let mapping = testing::mapping();
        for id in ["cm:name", "cm_name", "CM_NAME"] {
            let accessor = mapping.property_accessor(id).unwrap();
            assert_eq!(accessor.mapped_property(), Some(&content_model::PROP_NAME), "{}", id);
            assert_eq!(
                accessor.node_value(&testing::report()),
                Some(PropertyValue::string("q1.txt"))
            );
        }
        let score = mapping.property_accessor("acme_score").unwrap();
        assert_eq!(score.definition().property_type, PropertyType::Integer);
    }

    #[test]
    fn test_unknown_property_is_invalid() {
        let mapping = testing::mapping();
        assert_matches!(
            mapping.property_accessor("acme:nothing"),
            Err(MappingError::InvalidArgument { .. })
        );
        assert_matches!(
            mapping.property_accessor("zz_name"),
            Err(MappingError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_duplicate_accessor_rejected() {
        let mut mapping = testing::mapping();
        let duplicate = PropertyAccessor::new(
            CmisPropertyDefinition::new(property_ids::NAME, PropertyType::String),
            Box::new(Fixed),
            Arc::clone(mapping.accessor_context()),
        );
        assert_matches!(
            mapping.register_accessor(duplicate),
            Err(MappingError::DuplicateAccessor { .. })
        );
    }

    #[test]
    fn test_allowable_actions_use_object_scope() {
        let mapping = testing::mapping();
        let report = CmisObject::Node(testing::report());
        assert_eq!(mapping.scope_of(&report), Some(Scope::Document));
        assert!(mapping.allowable_actions_for(&report).contains(&Action::CanCheckOut));

        let projects = CmisObject::Node(testing::projects());
        assert_eq!(mapping.scope_of(&projects), Some(Scope::Folder));
        assert!(mapping.allowable_actions_for(&projects).contains(&Action::CanCreateFolder));

        let assoc = CmisObject::Relationship(testing::related_assoc(mapping.accessor_context()));
        assert_eq!(
            mapping.allowable_actions_for(&assoc),
            vec![Action::CanDeleteObject, Action::CanGetProperties]
        );
        assert!(mapping.allowable_actions_for(&CmisObject::Other).is_empty());
        assert!(mapping
            .allowable_actions_for(&CmisObject::Node(testing::missing()))
            .is_empty());
    }

    #[test]
    fn test_type_delegation_and_preferences() {
        let mut preferences = MappingPreferences::default();
        preferences.sort_locale = "fr_CA".to_string();
        let mapping = CmisMapping::new(testing::services(), &preferences).unwrap();
        assert_eq!(mapping.query_context().sort_locale(), "fr_CA");
        assert_eq!(
            mapping.type_id_for_class(&testing::REPORT_TYPE).unwrap().id(),
            "D:acme:report"
        );
        assert_eq!(mapping.cache().to_external_name(&content_model::PROP_NAME), "cm_name");
        assert_eq!(mapping.set_permission("cmis:write"), "Write");
    }
}
