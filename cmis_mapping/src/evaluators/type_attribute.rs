// src/evaluators/type_attribute.rs
//! Evaluators driven by an attribute of the object's type definition

use super::ActionEvaluator;
use crate::object::CmisObject;
use crate::repository::ServiceRegistry;
use cmis_model::types::{TypeDefinition, TypeDefinitionSource};
use cmis_model::{Action, QName};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Attribute value extracted from a type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Map(IndexMap<String, AttributeValue>),
}

type Extractor = fn(&TypeDefinition) -> AttributeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeAttribute {
    Id,
    ParentId,
    BaseId,
    DisplayName,
    Description,
    Creatable,
    Fileable,
    Queryable,
    FullTextIndexed,
    IncludedInSupertypeQuery,
    ControllablePolicy,
    ControllableAcl,
    Versionable,
    ContentStreamAllowed,
    AllowedSourceTypes,
    AllowedTargetTypes,
    PropertyIds,
    /// Every boolean attribute keyed by name
    Capabilities,
}

const CAPABILITIES: [(&str, TypeAttribute); 9] = [
    ("creatable", TypeAttribute::Creatable),
    ("fileable", TypeAttribute::Fileable),
    ("queryable", TypeAttribute::Queryable),
    ("fullTextIndexed", TypeAttribute::FullTextIndexed),
    ("includedInSupertypeQuery", TypeAttribute::IncludedInSupertypeQuery),
    ("controllablePolicy", TypeAttribute::ControllablePolicy),
    ("controllableACL", TypeAttribute::ControllableAcl),
    ("versionable", TypeAttribute::Versionable),
    ("contentStreamAllowed", TypeAttribute::ContentStreamAllowed),
];

fn capabilities(definition: &TypeDefinition) -> AttributeValue {
    AttributeValue::Map(
        CAPABILITIES
            .iter()
            .map(|(key, attribute)| (key.to_string(), attribute.extract(definition)))
            .collect(),
    )
}

impl TypeAttribute {
    fn extractor(&self) -> Extractor {
        match self {
            TypeAttribute::Id => |d| AttributeValue::Text(d.id().to_string()),
            TypeAttribute::ParentId => |d| AttributeValue::Text(d.parent_id.clone().unwrap_or_default()),
            TypeAttribute::BaseId => |d| AttributeValue::Text(d.base.base_type_id().to_string()),
            TypeAttribute::DisplayName => |d| AttributeValue::Text(d.display_name.clone()),
            TypeAttribute::Description => |d| AttributeValue::Text(d.description.clone()),
            TypeAttribute::Creatable => |d| AttributeValue::Flag(d.creatable),
            TypeAttribute::Fileable => |d| AttributeValue::Flag(d.fileable),
            TypeAttribute::Queryable => |d| AttributeValue::Flag(d.queryable),
            TypeAttribute::FullTextIndexed => |d| AttributeValue::Flag(d.full_text_indexed),
            TypeAttribute::IncludedInSupertypeQuery => {
                |d| AttributeValue::Flag(d.included_in_supertype_query)
            }
            TypeAttribute::ControllablePolicy => |d| AttributeValue::Flag(d.controllable_policy),
            TypeAttribute::ControllableAcl => |d| AttributeValue::Flag(d.controllable_acl),
            TypeAttribute::Versionable => |d| AttributeValue::Flag(d.versionable),
            TypeAttribute::ContentStreamAllowed => |d| AttributeValue::Flag(d.content_stream_allowed),
            TypeAttribute::AllowedSourceTypes => |d| AttributeValue::List(d.allowed_source_types.clone()),
            TypeAttribute::AllowedTargetTypes => |d| AttributeValue::List(d.allowed_target_types.clone()),
            TypeAttribute::PropertyIds => |d| AttributeValue::List(d.property_ids.clone()),
            TypeAttribute::Capabilities => capabilities,
        }
    }

    pub fn extract(&self, definition: &TypeDefinition) -> AttributeValue {
        (self.extractor())(definition)
    }
}

/// Which part of the attribute is compared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    Whole,
    /// Element of a list attribute
    Index(usize),
    /// Entry of a map attribute
    Key(String),
}

impl AttributeSelector {
    fn select(&self, value: AttributeValue) -> Option<AttributeValue> {
        match (self, value) {
            (AttributeSelector::Whole, value) => Some(value),
            (AttributeSelector::Index(i), AttributeValue::List(items)) => {
                items.into_iter().nth(*i).map(AttributeValue::Text)
            }
            (AttributeSelector::Key(key), AttributeValue::Map(mut entries)) => entries.shift_remove(key),
            _ => None,
        }
    }
}

pub type Comparator = Arc<dyn Fn(&AttributeValue) -> bool + Send + Sync>;

pub struct TypeAttributeEvaluator {
    action: Action,
    services: ServiceRegistry,
    types: Arc<dyn TypeDefinitionSource>,
    attribute: TypeAttribute,
    selector: AttributeSelector,
    comparator: Comparator,
    default: bool,
}

impl TypeAttributeEvaluator {
    pub fn new(
        action: Action,
        services: ServiceRegistry,
        types: Arc<dyn TypeDefinitionSource>,
        attribute: TypeAttribute,
        selector: AttributeSelector,
        comparator: Comparator,
        default: bool,
    ) -> Self {
        Self {
            action,
            services,
            types,
            attribute,
            selector,
            comparator,
            default,
        }
    }

    /// Compare a flag attribute against `expected`
    pub fn flag(
        action: Action,
        services: ServiceRegistry,
        types: Arc<dyn TypeDefinitionSource>,
        attribute: TypeAttribute,
        expected: bool,
        default: bool,
    ) -> Self {
        Self::new(
            action,
            services,
            types,
            attribute,
            AttributeSelector::Whole,
            Arc::new(move |value| value == &AttributeValue::Flag(expected)),
            default,
        )
    }

    fn native_type(&self, object: &CmisObject) -> Option<QName> {
        match object {
            CmisObject::Node(node) => self.services.nodes.node_type(node),
            CmisObject::Relationship(assoc) => Some(assoc.type_qname.clone()),
            CmisObject::Other => None,
        }
    }
}

impl ActionEvaluator for TypeAttributeEvaluator {
    fn action(&self) -> Action {
        self.action
    }

    fn is_allowed(&self, object: &CmisObject) -> bool {
        let Some(definition) = self
            .native_type(object)
            .and_then(|native| self.types.type_definition(&native))
        else {
            return self.default;
        };
        match self.selector.select(self.attribute.extract(&definition)) {
            Some(value) => (self.comparator)(&value),
            None => self.default,
        }
    }

    fn name(&self) -> String {
        format!("TypeAttribute[{}: {:?} {:?}]", self.action, self.attribute, self.selector)
    }
}

impl fmt::Debug for TypeAttributeEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAttributeEvaluator")
            .field("action", &self.action)
            .field("attribute", &self.attribute)
            .field("selector", &self.selector)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn evaluator(attribute: TypeAttribute, selector: AttributeSelector, comparator: Comparator) -> TypeAttributeEvaluator {
        TypeAttributeEvaluator::new(
            Action::CanCreateRelationship,
            testing::services(),
            Arc::new(testing::type_mapping()),
            attribute,
            selector,
            comparator,
            false,
        )
    }

    #[test]
    fn test_flag_attribute() {
        let versionable = TypeAttributeEvaluator::flag(
            Action::CanCheckOut,
            testing::services(),
            Arc::new(testing::type_mapping()),
            TypeAttribute::Versionable,
            true,
            false,
        );
        assert!(versionable.is_allowed(&CmisObject::Node(testing::report())));
        assert!(!versionable.is_allowed(&CmisObject::Node(testing::projects())));
        assert!(!versionable.is_allowed(&CmisObject::Other));
    }

    #[test]
    fn test_indexed_list_element() {
        let first_source = evaluator(
            TypeAttribute::AllowedSourceTypes,
            AttributeSelector::Index(0),
            Arc::new(|value| value == &AttributeValue::Text("D:cm:content".to_string())),
        );
        let ctx = testing::accessor_context();
        let assoc = testing::related_assoc(&ctx);
        assert!(first_source.is_allowed(&CmisObject::Relationship(assoc)));
        // nodes have no allowed source types, so the selection is empty
        assert!(!first_source.is_allowed(&CmisObject::Node(testing::report())));
    }

    #[test]
    fn test_keyed_map_entry() {
        let fileable = evaluator(
            TypeAttribute::Capabilities,
            AttributeSelector::Key("fileable".to_string()),
            Arc::new(|value| value == &AttributeValue::Flag(true)),
        );
        assert!(fileable.is_allowed(&CmisObject::Node(testing::projects())));

        let missing_key = evaluator(
            TypeAttribute::Capabilities,
            AttributeSelector::Key("nonsense".to_string()),
            Arc::new(|_| true),
        );
        assert!(!missing_key.is_allowed(&CmisObject::Node(testing::projects())));
    }

    #[test]
    fn test_scalar_attribute() {
        let display = evaluator(
            TypeAttribute::DisplayName,
            AttributeSelector::Whole,
            Arc::new(|value| matches!(value, AttributeValue::Text(name) if name == "Report")),
        );
        assert!(display.is_allowed(&CmisObject::Node(testing::report())));
    }
}
