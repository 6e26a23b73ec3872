// src/mapping/types.rs
//! Static tables between the CMIS type model and the native content model
//!
//! Classifies native classes into scopes, builds and parses external type
//! ids, remaps data types and resolves loosely spelled property names.

use crate::errors::{MappingError, MappingResult};
use cmis_model::logging::codes;
use cmis_model::models::{cmis_model as cmis, content_model, data_types, system_model};
use cmis_model::qname::NAMESPACE_PREFIX;
use cmis_model::types::{TypeDefinition, TypeDefinitionSource};
use cmis_model::{
    log_error, DictionaryService, ModelError, NamespacePrefixResolver, PropertyType, QName,
    QNameCache, Scope, TypeId,
};
use indexmap::IndexMap;
use std::sync::Arc;

/// Minimum length of a `<letter>:<prefix>:<local>` type id
const MIN_TYPE_ID_LENGTH: usize = 4;

/// Aspects never exposed as policies
const HIDDEN_ASPECTS: [QName; 3] = [
    content_model::ASPECT_VERSIONABLE,
    content_model::ASPECT_AUDITABLE,
    system_model::ASPECT_REFERENCEABLE,
];

/// Classes mapped before any classification test
const EXPLICIT_CLASSES: [(QName, Scope); 6] = [
    (content_model::TYPE_CONTENT, Scope::Document),
    (content_model::TYPE_FOLDER, Scope::Folder),
    (cmis::RELATIONSHIP, Scope::Relationship),
    (cmis::POLICY, Scope::Policy),
    (cmis::OBJECT, Scope::Object),
    (cmis::FILESYSTEM_OBJECT, Scope::Object),
];

pub struct TypeMapping {
    dictionary: Arc<dyn DictionaryService>,
    namespaces: Arc<dyn NamespacePrefixResolver>,
    cache: Arc<QNameCache>,
    /// Native qname -> pre-registered type id
    static_types: IndexMap<QName, TypeId>,
    /// Native class -> CMIS class
    to_cmis: IndexMap<QName, QName>,
    /// CMIS class -> native class
    to_native: IndexMap<QName, QName>,
}

impl TypeMapping {
    pub fn new(
        dictionary: Arc<dyn DictionaryService>,
        namespaces: Arc<dyn NamespacePrefixResolver>,
        cache: Arc<QNameCache>,
    ) -> Self {
        let static_types = TypeId::sentinels()
            .into_iter()
            .map(|id| (id.qname().clone(), id))
            .collect();

        let remapped = [
            (content_model::TYPE_CONTENT, cmis::DOCUMENT),
            (content_model::TYPE_FOLDER, cmis::FOLDER),
        ];

        Self {
            dictionary,
            namespaces,
            cache,
            static_types,
            to_cmis: remapped.iter().cloned().collect(),
            to_native: remapped.iter().map(|(a, c)| (c.clone(), a.clone())).collect(),
        }
    }

    pub fn dictionary(&self) -> &Arc<dyn DictionaryService> {
        &self.dictionary
    }

    pub fn namespaces(&self) -> &Arc<dyn NamespacePrefixResolver> {
        &self.namespaces
    }

    pub fn cache(&self) -> &Arc<QNameCache> {
        &self.cache
    }

    // ========================================================================
    // TYPE IDS
    // ========================================================================

    /// Type id of `type_qname` within `scope`
    pub fn type_id(&self, scope: Scope, type_qname: &QName) -> MappingResult<TypeId> {
        if let Some(type_id) = self.static_types.get(type_qname) {
            return Ok(type_id.clone());
        }

        let Some(label) = scope.label() else {
            log_error!(codes::type_mapping::INVALID_BASE_TYPE, "No type id for base scope",
                "scope" => scope, "type" => type_qname);
            return Err(MappingError::invalid_argument(
                ModelError::InvalidBaseType { scope }.to_string(),
            ));
        };

        let prefixed = type_qname.to_prefixed(self.namespaces.as_ref())?;
        Ok(TypeId::new(
            scope,
            type_qname.clone(),
            format!("{}{}{}", label, NAMESPACE_PREFIX, prefixed),
            self.cache.to_external_name(type_qname),
        ))
    }

    /// Type id of a native class, or `None` when the class is not exposed
    pub fn type_id_for_class(&self, class: &QName) -> Option<TypeId> {
        if let Some((_, scope)) = EXPLICIT_CLASSES.iter().find(|(name, _)| name == class) {
            return self.type_id(*scope, class).ok();
        }
        self.classify(class)
            .and_then(|scope| self.type_id(scope, class).ok())
    }

    /// Scope of a native class by subtype tests alone
    pub fn classify(&self, class: &QName) -> Option<Scope> {
        if self.is_valid_document(class) {
            Some(Scope::Document)
        } else if self.is_valid_folder(class) {
            Some(Scope::Folder)
        } else if self.is_valid_policy(class) {
            Some(Scope::Policy)
        } else if self.is_valid_relationship(class) {
            Some(Scope::Relationship)
        } else {
            None
        }
    }

    /// Parse an external type id
    pub fn type_id_from_external(&self, id: &str) -> MappingResult<TypeId> {
        if let Some(sentinel) = TypeId::sentinel(id) {
            return Ok(sentinel);
        }

        let mut chars = id.chars();
        let (discriminator, separator) = (chars.next(), chars.next());
        if id.chars().count() < MIN_TYPE_ID_LENGTH || separator != Some(NAMESPACE_PREFIX) {
            log_error!(codes::type_mapping::MALFORMED_TYPE_ID, "Malformed type id", "type_id" => id);
            return Err(MappingError::invalid_argument(
                ModelError::MalformedTypeId {
                    type_id: id.to_string(),
                }
                .to_string(),
            ));
        }

        let discriminator = discriminator.unwrap_or_default();
        let Some(scope) = Scope::from_label(discriminator) else {
            log_error!(codes::type_mapping::UNKNOWN_DISCRIMINATOR, "Unknown type id discriminator",
                "type_id" => id, "discriminator" => discriminator);
            return Err(MappingError::invalid_argument(
                ModelError::UnknownDiscriminator {
                    type_id: id.to_string(),
                    discriminator,
                }
                .to_string(),
            ));
        };

        let remainder = &id[discriminator.len_utf8() + 1..];
        let qname = QName::resolve_prefixed(remainder, self.namespaces.as_ref()).map_err(|e| {
            log_error!(codes::naming::UNKNOWN_PREFIX, "Cannot resolve type id", "type_id" => id,
                "error" => &e);
            MappingError::invalid_argument(format!("malformed type id '{}': {}", id, e))
        })?;

        Ok(TypeId::new(
            scope,
            qname.clone(),
            id,
            self.cache.to_external_name(&qname),
        ))
    }

    // ========================================================================
    // CLASSIFICATION
    // ========================================================================

    pub fn is_valid_document(&self, class: &QName) -> bool {
        *class == cmis::DOCUMENT || self.is_proper_sub_class(class, &content_model::TYPE_CONTENT)
    }

    pub fn is_valid_folder(&self, class: &QName) -> bool {
        *class == cmis::FOLDER || self.is_proper_sub_class(class, &content_model::TYPE_FOLDER)
    }

    pub fn is_valid_policy(&self, class: &QName) -> bool {
        if *class == cmis::POLICY || *class == cmis::ASPECTS {
            return true;
        }
        self.dictionary.aspect(class).is_some() && !HIDDEN_ASPECTS.contains(class)
    }

    /// A non-child association between documents or folders
    pub fn is_valid_relationship(&self, class: &QName) -> bool {
        if *class == cmis::RELATIONSHIP {
            return true;
        }
        match self.dictionary.association(class) {
            Some(assoc) if !assoc.is_child => {
                self.is_valid_document_or_folder(&self.cmis_type(&assoc.source_class))
                    && self.is_valid_document_or_folder(&self.cmis_type(&assoc.target_class))
            }
            _ => false,
        }
    }

    pub fn is_valid_document_or_folder(&self, class: &QName) -> bool {
        self.is_valid_document(class) || self.is_valid_folder(class)
    }

    fn is_proper_sub_class(&self, class: &QName, of: &QName) -> bool {
        class != of
            && self.dictionary.class(class).is_some()
            && self.dictionary.is_sub_class(class, of)
    }

    // ========================================================================
    // REMAPPING AND DATA TYPES
    // ========================================================================

    /// CMIS class standing in for a native class
    pub fn cmis_type(&self, class: &QName) -> QName {
        self.to_cmis.get(class).cloned().unwrap_or_else(|| class.clone())
    }

    /// Native class behind a CMIS class
    pub fn alfresco_class(&self, cmis_class: &QName) -> QName {
        self.to_native
            .get(cmis_class)
            .cloned()
            .unwrap_or_else(|| cmis_class.clone())
    }

    pub fn is_remapped_type(&self, class: &QName) -> bool {
        self.to_cmis.contains_key(class)
    }

    /// CMIS property type of a native data type
    pub fn property_type(&self, data_type: &QName) -> Option<PropertyType> {
        let mapping = [
            (data_types::BOOLEAN, PropertyType::Boolean),
            (data_types::CATEGORY, PropertyType::Id),
            (data_types::DATE, PropertyType::DateTime),
            (data_types::DATETIME, PropertyType::DateTime),
            (data_types::DOUBLE, PropertyType::Decimal),
            (data_types::FLOAT, PropertyType::Decimal),
            (data_types::INT, PropertyType::Integer),
            (data_types::LONG, PropertyType::Integer),
            (data_types::MLTEXT, PropertyType::String),
            (data_types::TEXT, PropertyType::String),
            (data_types::NODE_REF, PropertyType::Id),
            (cmis::DATATYPE_ID, PropertyType::Id),
            (cmis::DATATYPE_URI, PropertyType::Uri),
            (cmis::DATATYPE_HTML, PropertyType::Html),
        ];
        mapping
            .into_iter()
            .find(|(native, _)| native == data_type)
            .map(|(_, property_type)| property_type)
    }

    /// Native data type storing a CMIS property type
    pub fn native_data_type(&self, property_type: PropertyType) -> QName {
        match property_type {
            PropertyType::Id
            | PropertyType::String
            | PropertyType::Uri
            | PropertyType::Html => data_types::TEXT,
            PropertyType::Integer => data_types::LONG,
            PropertyType::Decimal => data_types::DOUBLE,
            PropertyType::Boolean => data_types::BOOLEAN,
            PropertyType::DateTime => data_types::DATETIME,
        }
    }

    // ========================================================================
    // PROPERTY NAMES
    // ========================================================================

    /// External id of a native property (`prefix:local`)
    pub fn cmis_property_id(&self, property: &QName) -> MappingResult<String> {
        Ok(property.to_prefixed(self.namespaces.as_ref())?)
    }

    /// Resolve a loosely spelled property name (`cm_name`, `CM_NAME`,
    /// `objectId`) to a native property
    pub fn resolve_property_name(&self, name: &str) -> Option<QName> {
        let in_cmis = QName::new(cmis::URI, name);
        if self.dictionary.property(&in_cmis).is_some() {
            return Some(in_cmis);
        }

        let Some((prefix, local)) = name.split_once('_') else {
            return self.find_property_ignoring_case(cmis::URI, name);
        };

        let exact = self
            .namespaces
            .namespace_uri(&prefix.to_lowercase())
            .map(|uri| QName::new(uri, local.to_lowercase()))
            .filter(|qname| self.dictionary.property(qname).is_some());
        if exact.is_some() {
            return exact;
        }

        let uri = self
            .namespaces
            .prefixes()
            .into_iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(prefix))
            .and_then(|candidate| self.namespaces.namespace_uri(&candidate))?;
        self.find_property_ignoring_case(&uri, local)
    }

    fn find_property_ignoring_case(&self, uri: &str, local: &str) -> Option<QName> {
        self.dictionary
            .all_properties()
            .into_iter()
            .find(|def| {
                def.name.namespace_uri() == uri && def.name.local_name().eq_ignore_ascii_case(local)
            })
            .map(|def| def.name.clone())
    }

    /// Native property behind an external id: a prefixed name, then the
    /// cache's external form, then loose name resolution
    pub fn resolve_property_id(&self, property_id: &str) -> Option<QName> {
        let known = |qname: QName| self.dictionary.property(&qname).is_some().then_some(qname);

        if property_id.contains(NAMESPACE_PREFIX) {
            if let Some(qname) = QName::resolve_prefixed(property_id, self.namespaces.as_ref())
                .ok()
                .and_then(known)
            {
                return Some(qname);
            }
        }
        known(self.cache.to_qualified_name(property_id))
            .or_else(|| self.resolve_property_name(property_id))
    }

    // ========================================================================
    // TYPE DEFINITIONS
    // ========================================================================

    fn parent_type_id(&self, class: &QName, type_id: &TypeId) -> Option<String> {
        let scope = type_id.scope();
        if *class == scope.base_type_qname() || *class == cmis::FILESYSTEM_OBJECT {
            return match (scope, class == &cmis::FILESYSTEM_OBJECT) {
                (Scope::Object, false) => None,
                _ => Some(Scope::Object.base_type_id().to_string()),
            };
        }

        let mut current = self.dictionary.class(class).and_then(|def| def.parent.clone());
        while let Some(ancestor) = current {
            if let Some(parent_id) = self.type_id_for_class(&ancestor) {
                if parent_id.scope() == scope {
                    return Some(parent_id.id().to_string());
                }
            }
            if ancestor == system_model::TYPE_BASE {
                break;
            }
            current = self.dictionary.class(&ancestor).and_then(|def| def.parent.clone());
        }
        Some(scope.base_type_id().to_string())
    }

    fn property_ids(&self, class: &QName, scope: Scope) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        let base = scope.base_type_qname();
        let inherited = self
            .dictionary
            .class_properties(&base)
            .into_iter()
            .chain(self.dictionary.class_properties(&cmis::OBJECT))
            .chain(self.dictionary.class_properties(class));
        for property in inherited {
            if let Ok(id) = self.cmis_property_id(&property.name) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    fn allowed_end_types(&self, class: &QName) -> Vec<String> {
        self.type_id_for_class(class)
            .map(|id| vec![id.id().to_string()])
            .unwrap_or_default()
    }
}

impl TypeDefinitionSource for TypeMapping {
    fn type_definition(&self, native: &QName) -> Option<TypeDefinition> {
        let type_id = self.type_id_for_class(native)?;
        let scope = type_id.scope();
        let class = self
            .dictionary
            .class(native)
            .or_else(|| self.dictionary.class(&self.cmis_type(native)));
        let association = self.dictionary.association(native);

        let display_name = class
            .and_then(|c| c.title.clone())
            .or_else(|| association.and_then(|a| a.title.clone()))
            .unwrap_or_else(|| native.local_name().to_string());
        let description = class
            .and_then(|c| c.description.clone())
            .or_else(|| association.and_then(|a| a.description.clone()))
            .unwrap_or_else(|| display_name.clone());

        let (allowed_source_types, allowed_target_types) = match association {
            Some(assoc) => (
                self.allowed_end_types(&assoc.source_class),
                self.allowed_end_types(&assoc.target_class),
            ),
            None => (Vec::new(), Vec::new()),
        };
        let is_document = scope == Scope::Document;
        let is_filed = matches!(scope, Scope::Document | Scope::Folder);

        Some(TypeDefinition {
            parent_id: self.parent_type_id(native, &type_id),
            base: scope,
            display_name,
            description,
            creatable: is_filed || scope == Scope::Relationship,
            fileable: is_filed || scope == Scope::Policy,
            queryable: scope != Scope::Relationship,
            full_text_indexed: is_document,
            included_in_supertype_query: true,
            controllable_policy: false,
            controllable_acl: is_filed,
            versionable: is_document,
            content_stream_allowed: is_document,
            allowed_source_types,
            allowed_target_types,
            property_ids: self.property_ids(native, scope),
            type_id,
        })
    }
}

impl std::fmt::Debug for TypeMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMapping")
            .field("static_types", &self.static_types.len())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use assert_matches::assert_matches;

    fn mapping() -> TypeMapping {
        testing::type_mapping()
    }

    #[test]
    fn test_document_subtype_resolves_to_document() {
        let mapping = mapping();
        let id = mapping.type_id_for_class(&testing::REPORT_TYPE).unwrap();
        assert_eq!(id.scope(), Scope::Document);
        assert_eq!(id.id(), "D:acme:report");
        assert_eq!(id.query_name(), "acme_report");
    }

    #[test]
    fn test_content_found_only_through_explicit_mapping() {
        let mapping = mapping();
        assert_eq!(mapping.classify(&content_model::TYPE_CONTENT), None);
        let id = mapping.type_id_for_class(&content_model::TYPE_CONTENT).unwrap();
        assert_eq!(id.scope(), Scope::Document);
        assert_eq!(id.id(), "D:cm:content");
        assert_eq!(
            mapping.type_id_for_class(&content_model::TYPE_FOLDER).unwrap().id(),
            "F:cm:folder"
        );
    }

    #[test]
    fn test_sentinel_qnames_yield_sentinel_ids() {
        let mapping = mapping();
        assert_eq!(mapping.type_id_for_class(&cmis::OBJECT).unwrap().id(), "cmis:object");
        assert_eq!(
            mapping.type_id_for_class(&cmis::FILESYSTEM_OBJECT).unwrap().id(),
            "cmis:filesystemobject"
        );
        assert_eq!(mapping.type_id_for_class(&cmis::DOCUMENT).unwrap().id(), "cmis:document");
        assert_eq!(mapping.type_id_for_class(&cmis::POLICY).unwrap().id(), "cmis:policy");
    }

    #[test]
    fn test_classification_order_and_misses() {
        let mapping = mapping();
        assert_eq!(mapping.classify(&testing::PROJECT_FOLDER_TYPE), Some(Scope::Folder));
        assert_eq!(mapping.classify(&content_model::ASPECT_TITLED), Some(Scope::Policy));
        assert_eq!(mapping.classify(&content_model::ASPECT_VERSIONABLE), None);
        assert_eq!(mapping.classify(&system_model::ASPECT_REFERENCEABLE), None);
        assert_eq!(mapping.classify(&testing::RELATED_ASSOC), Some(Scope::Relationship));
        // child associations and associations from aspects are not relationships
        assert_eq!(mapping.classify(&content_model::ASSOC_CONTAINS), None);
        assert_eq!(mapping.classify(&content_model::ASSOC_ORIGINAL), None);
        assert_eq!(mapping.classify(&content_model::TYPE_CMOBJECT), None);
        assert!(mapping.type_id_for_class(&QName::new("http://nowhere", "x")).is_none());
    }

    #[test]
    fn test_object_scope_without_static_mapping_is_invalid() {
        let mapping = mapping();
        assert_matches!(
            mapping.type_id(Scope::Object, &testing::REPORT_TYPE),
            Err(MappingError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_external_type_ids() {
        let mapping = mapping();
        let id = mapping.type_id_from_external("D:acme:report").unwrap();
        assert_eq!(id.scope(), Scope::Document);
        assert_eq!(id.qname(), &testing::REPORT_TYPE);

        let sentinel = mapping.type_id_from_external("CMIS:FOLDER").unwrap();
        assert_eq!(sentinel.id(), "cmis:folder");
        assert_eq!(sentinel.scope(), Scope::Folder);
    }

    #[test]
    fn test_malformed_external_type_ids() {
        let mapping = mapping();
        for bad in ["", "D:x", "Dcm:content", "X:cm:content", "D:zz:thing", "D:cm:"] {
            assert_matches!(
                mapping.type_id_from_external(bad),
                Err(MappingError::InvalidArgument { .. }),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_remapping_tables() {
        let mapping = mapping();
        assert_eq!(mapping.cmis_type(&content_model::TYPE_CONTENT), cmis::DOCUMENT);
        assert_eq!(mapping.alfresco_class(&cmis::FOLDER), content_model::TYPE_FOLDER);
        assert_eq!(mapping.cmis_type(&testing::REPORT_TYPE), testing::REPORT_TYPE);
        assert!(mapping.is_remapped_type(&content_model::TYPE_FOLDER));
        assert!(!mapping.is_remapped_type(&cmis::FOLDER));
    }

    #[test]
    fn test_data_type_tables() {
        let mapping = mapping();
        assert_eq!(mapping.property_type(&data_types::MLTEXT), Some(PropertyType::String));
        assert_eq!(mapping.property_type(&data_types::CATEGORY), Some(PropertyType::Id));
        assert_eq!(mapping.property_type(&data_types::FLOAT), Some(PropertyType::Decimal));
        assert_eq!(mapping.property_type(&cmis::DATATYPE_HTML), Some(PropertyType::Html));
        assert_eq!(mapping.property_type(&data_types::CONTENT), None);
        assert_eq!(mapping.property_type(&data_types::QNAME), None);

        assert_eq!(mapping.native_data_type(PropertyType::Id), data_types::TEXT);
        assert_eq!(mapping.native_data_type(PropertyType::Integer), data_types::LONG);
        assert_eq!(mapping.native_data_type(PropertyType::Decimal), data_types::DOUBLE);
        assert_eq!(mapping.native_data_type(PropertyType::DateTime), data_types::DATETIME);
    }

    #[test]
    fn test_property_name_resolution_ignores_case() {
        let mapping = mapping();
        for name in ["cm_name", "CM_NAME", "cm_Name"] {
            assert_eq!(
                mapping.resolve_property_name(name),
                Some(content_model::PROP_NAME),
                "{}",
                name
            );
        }
        assert_eq!(
            mapping.resolve_property_name("objectId"),
            Some(QName::new(cmis::URI, "objectId"))
        );
        assert_eq!(
            mapping.resolve_property_name("OBJECTID"),
            Some(QName::new(cmis::URI, "objectId"))
        );
        assert_eq!(
            mapping.resolve_property_name("cm_versionlabel"),
            Some(content_model::PROP_VERSION_LABEL)
        );
        assert_eq!(mapping.resolve_property_name("zz_name"), None);
        assert_eq!(mapping.resolve_property_name("nothing"), None);
    }

    #[test]
    fn test_property_id_resolution_order() {
        let mapping = mapping();
        assert_eq!(
            mapping.resolve_property_id("acme:score"),
            Some(testing::SCORE_PROPERTY)
        );
        assert_eq!(
            mapping.resolve_property_id("acme_score"),
            Some(testing::SCORE_PROPERTY)
        );
        assert_eq!(mapping.resolve_property_id("ACME_Score"), Some(testing::SCORE_PROPERTY));
        assert_eq!(mapping.resolve_property_id("acme:missing"), None);
    }

    #[test]
    fn test_type_definition_for_document_subtype() {
        let mapping = mapping();
        let definition = mapping.type_definition(&testing::REPORT_TYPE).unwrap();
        assert_eq!(definition.id(), "D:acme:report");
        assert_eq!(definition.parent_id.as_deref(), Some("D:cm:content"));
        assert_eq!(definition.base, Scope::Document);
        assert_eq!(definition.display_name, "Report");
        assert!(definition.versionable && definition.content_stream_allowed);
        assert!(definition.property_ids.contains(&"cmis:name".to_string()));
        assert!(definition.property_ids.contains(&"acme:score".to_string()));
        assert!(definition.property_ids.contains(&"cm:name".to_string()));

        let content = mapping.type_definition(&content_model::TYPE_CONTENT).unwrap();
        assert_eq!(content.parent_id.as_deref(), Some("cmis:document"));
        let document = mapping.type_definition(&cmis::DOCUMENT).unwrap();
        assert_eq!(document.parent_id.as_deref(), Some("cmis:object"));
        let object = mapping.type_definition(&cmis::OBJECT).unwrap();
        assert_eq!(object.parent_id, None);
    }

    #[test]
    fn test_type_definition_for_relationship() {
        let mapping = mapping();
        let definition = mapping.type_definition(&testing::RELATED_ASSOC).unwrap();
        assert_eq!(definition.base, Scope::Relationship);
        assert_eq!(definition.id(), "R:acme:related");
        assert_eq!(definition.parent_id.as_deref(), Some("cmis:relationship"));
        assert_eq!(definition.allowed_source_types, vec!["D:cm:content".to_string()]);
        assert!(!definition.queryable);
        assert!(mapping.type_definition(&content_model::TYPE_CMOBJECT).is_none());
    }
}
