// src/dictionary.rs
//! Native content-model dictionary: classes, aspects, properties and
//! associations, and the [`DictionaryService`] contract the mapping consumes

use crate::models::{cmis_model, content_model, data_types, property_ids, system_model};
use crate::qname::QName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Native property definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: QName,
    /// Data type, a name in the `d:` or `cmis:` namespace
    pub data_type: QName,
    /// Class or aspect declaring the property
    pub container: QName,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub title: Option<String>,
}

impl PropertyDefinition {
    pub fn new(name: QName, data_type: QName, container: QName) -> Self {
        Self {
            name,
            data_type,
            container,
            multi_valued: false,
            protected: false,
            mandatory: false,
            title: None,
        }
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }
}

/// Native type or aspect definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: QName,
    #[serde(default)]
    pub parent: Option<QName>,
    #[serde(default)]
    pub is_aspect: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Properties declared by this class (not inherited ones)
    #[serde(default)]
    pub properties: Vec<QName>,
}

impl ClassDefinition {
    pub fn new_type(name: QName, parent: Option<QName>) -> Self {
        Self {
            name,
            parent,
            is_aspect: false,
            title: None,
            description: None,
            properties: Vec::new(),
        }
    }

    pub fn new_aspect(name: QName, parent: Option<QName>) -> Self {
        Self {
            is_aspect: true,
            ..Self::new_type(name, parent)
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Native association definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDefinition {
    pub name: QName,
    /// Parent/child rather than peer association
    #[serde(default)]
    pub is_child: bool,
    pub source_class: QName,
    pub target_class: QName,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AssociationDefinition {
    pub fn peer(name: QName, source_class: QName, target_class: QName) -> Self {
        Self {
            name,
            is_child: false,
            source_class,
            target_class,
            title: None,
            description: None,
        }
    }

    pub fn child(name: QName, source_class: QName, target_class: QName) -> Self {
        Self {
            is_child: true,
            ..Self::peer(name, source_class, target_class)
        }
    }
}

// ============================================================================
// DICTIONARY CONTRACT
// ============================================================================

/// Read access to the native content model
pub trait DictionaryService: Send + Sync {
    fn property(&self, name: &QName) -> Option<&PropertyDefinition>;

    /// Type or aspect definition
    fn class(&self, name: &QName) -> Option<&ClassDefinition>;

    fn association(&self, name: &QName) -> Option<&AssociationDefinition>;

    fn all_properties(&self) -> Vec<&PropertyDefinition>;

    fn all_classes(&self) -> Vec<&ClassDefinition>;

    fn all_associations(&self) -> Vec<&AssociationDefinition>;

    fn aspect(&self, name: &QName) -> Option<&ClassDefinition> {
        self.class(name).filter(|class| class.is_aspect)
    }

    fn type_definition(&self, name: &QName) -> Option<&ClassDefinition> {
        self.class(name).filter(|class| !class.is_aspect)
    }

    /// Whether `class` is `of` or derives from it
    fn is_sub_class(&self, class: &QName, of: &QName) -> bool {
        let mut current = Some(class.clone());
        let mut depth = 0;
        while let Some(name) = current {
            if &name == of {
                return true;
            }
            depth += 1;
            if depth > MAX_CLASS_DEPTH {
                return false;
            }
            current = self.class(&name).and_then(|def| def.parent.clone());
        }
        false
    }

    /// Declared and inherited properties of `class`, nearest class first
    fn class_properties(&self, class: &QName) -> Vec<&PropertyDefinition> {
        let mut properties = Vec::new();
        let mut current = self.class(class);
        let mut depth = 0;
        while let Some(def) = current {
            properties.extend(def.properties.iter().filter_map(|name| self.property(name)));
            depth += 1;
            if depth > MAX_CLASS_DEPTH {
                break;
            }
            current = def.parent.as_ref().and_then(|parent| self.class(parent));
        }
        properties
    }
}

/// Guard against cyclic parent chains in hand-written models
const MAX_CLASS_DEPTH: usize = 64;

/// In-memory dictionary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDictionary {
    classes: IndexMap<QName, ClassDefinition>,
    properties: IndexMap<QName, PropertyDefinition>,
    associations: IndexMap<QName, AssociationDefinition>,
}

impl ModelDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary holding the system, content and CMIS models
    pub fn with_standard_model() -> Self {
        let mut dictionary = Self::new();
        standard_model(&mut dictionary);
        dictionary
    }

    pub fn add_class(&mut self, class: ClassDefinition) -> &mut Self {
        self.classes.insert(class.name.clone(), class);
        self
    }

    /// Add a property and attach it to its container class
    pub fn add_property(&mut self, property: PropertyDefinition) -> &mut Self {
        if let Some(class) = self.classes.get_mut(&property.container) {
            if !class.properties.contains(&property.name) {
                class.properties.push(property.name.clone());
            }
        }
        self.properties.insert(property.name.clone(), property);
        self
    }

    pub fn add_association(&mut self, association: AssociationDefinition) -> &mut Self {
        self.associations
            .insert(association.name.clone(), association);
        self
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl DictionaryService for ModelDictionary {
    fn property(&self, name: &QName) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    fn class(&self, name: &QName) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    fn association(&self, name: &QName) -> Option<&AssociationDefinition> {
        self.associations.get(name)
    }

    fn all_properties(&self) -> Vec<&PropertyDefinition> {
        self.properties.values().collect()
    }

    fn all_classes(&self) -> Vec<&ClassDefinition> {
        self.classes.values().collect()
    }

    fn all_associations(&self) -> Vec<&AssociationDefinition> {
        self.associations.values().collect()
    }
}

// ============================================================================
// STANDARD MODEL
// ============================================================================

fn standard_model(dictionary: &mut ModelDictionary) {
    use content_model as cm;

    // System model
    dictionary.add_class(ClassDefinition::new_type(system_model::TYPE_BASE, None).with_title("Base"));
    dictionary.add_class(ClassDefinition::new_type(
        system_model::TYPE_STORE_ROOT,
        Some(system_model::TYPE_BASE),
    ));
    dictionary.add_class(ClassDefinition::new_aspect(system_model::ASPECT_REFERENCEABLE, None));
    dictionary.add_association(AssociationDefinition::child(
        system_model::ASSOC_CHILDREN,
        system_model::TYPE_BASE,
        system_model::TYPE_BASE,
    ));

    // CMIS model
    dictionary.add_class(
        ClassDefinition::new_type(cmis_model::OBJECT, Some(system_model::TYPE_BASE))
            .with_title("Object"),
    );
    dictionary.add_class(ClassDefinition::new_type(
        cmis_model::FILESYSTEM_OBJECT,
        Some(cmis_model::OBJECT),
    ));
    dictionary.add_class(
        ClassDefinition::new_type(cmis_model::DOCUMENT, Some(cmis_model::OBJECT))
            .with_title("Document"),
    );
    dictionary.add_class(
        ClassDefinition::new_type(cmis_model::FOLDER, Some(cmis_model::OBJECT)).with_title("Folder"),
    );
    dictionary.add_class(
        ClassDefinition::new_type(cmis_model::RELATIONSHIP, Some(cmis_model::OBJECT))
            .with_title("Relationship"),
    );
    dictionary.add_class(
        ClassDefinition::new_type(cmis_model::POLICY, Some(cmis_model::OBJECT)).with_title("Policy"),
    );
    dictionary.add_class(ClassDefinition::new_aspect(cmis_model::ASPECTS, None).with_title("Aspects"));

    let cmis_properties: [(&str, QName, QName, bool); 28] = [
        (property_ids::OBJECT_ID, cmis_model::DATATYPE_ID, cmis_model::OBJECT, false),
        (property_ids::BASE_TYPE_ID, cmis_model::DATATYPE_ID, cmis_model::OBJECT, false),
        (property_ids::OBJECT_TYPE_ID, cmis_model::DATATYPE_ID, cmis_model::OBJECT, false),
        (property_ids::CREATED_BY, data_types::TEXT, cmis_model::OBJECT, false),
        (property_ids::CREATION_DATE, data_types::DATETIME, cmis_model::OBJECT, false),
        (property_ids::LAST_MODIFIED_BY, data_types::TEXT, cmis_model::OBJECT, false),
        (property_ids::LAST_MODIFICATION_DATE, data_types::DATETIME, cmis_model::OBJECT, false),
        (property_ids::CHANGE_TOKEN, data_types::TEXT, cmis_model::OBJECT, false),
        (property_ids::NAME, data_types::TEXT, cmis_model::OBJECT, false),
        (property_ids::IS_IMMUTABLE, data_types::BOOLEAN, cmis_model::DOCUMENT, false),
        (property_ids::IS_LATEST_VERSION, data_types::BOOLEAN, cmis_model::DOCUMENT, false),
        (property_ids::IS_MAJOR_VERSION, data_types::BOOLEAN, cmis_model::DOCUMENT, false),
        (property_ids::IS_LATEST_MAJOR_VERSION, data_types::BOOLEAN, cmis_model::DOCUMENT, false),
        (property_ids::VERSION_LABEL, data_types::TEXT, cmis_model::DOCUMENT, false),
        (property_ids::VERSION_SERIES_ID, cmis_model::DATATYPE_ID, cmis_model::DOCUMENT, false),
        (property_ids::IS_VERSION_SERIES_CHECKED_OUT, data_types::BOOLEAN, cmis_model::DOCUMENT, false),
        (property_ids::VERSION_SERIES_CHECKED_OUT_BY, data_types::TEXT, cmis_model::DOCUMENT, false),
        (property_ids::VERSION_SERIES_CHECKED_OUT_ID, cmis_model::DATATYPE_ID, cmis_model::DOCUMENT, false),
        (property_ids::CHECKIN_COMMENT, data_types::TEXT, cmis_model::DOCUMENT, false),
        (property_ids::CONTENT_STREAM_LENGTH, data_types::LONG, cmis_model::DOCUMENT, false),
        (property_ids::CONTENT_STREAM_MIME_TYPE, data_types::TEXT, cmis_model::DOCUMENT, false),
        (property_ids::CONTENT_STREAM_FILE_NAME, data_types::TEXT, cmis_model::DOCUMENT, false),
        (property_ids::CONTENT_STREAM_ID, cmis_model::DATATYPE_ID, cmis_model::DOCUMENT, false),
        (property_ids::PARENT_ID, cmis_model::DATATYPE_ID, cmis_model::FOLDER, false),
        (property_ids::PATH, data_types::TEXT, cmis_model::FOLDER, false),
        (property_ids::ALLOWED_CHILD_OBJECT_TYPE_IDS, cmis_model::DATATYPE_ID, cmis_model::FOLDER, true),
        (property_ids::SOURCE_ID, cmis_model::DATATYPE_ID, cmis_model::RELATIONSHIP, false),
        (property_ids::TARGET_ID, cmis_model::DATATYPE_ID, cmis_model::RELATIONSHIP, false),
    ];
    for (id, data_type, container, multi) in cmis_properties {
        let Some((_, local)) = id.split_once(':') else {
            continue;
        };
        let mut property =
            PropertyDefinition::new(QName::new(cmis_model::URI, local), data_type, container)
                .protected();
        if multi {
            property = property.multi_valued();
        }
        dictionary.add_property(property);
    }
    dictionary.add_property(
        PropertyDefinition::new(
            QName::new(cmis_model::ALFRESCO_URI, "nodeRef"),
            cmis_model::DATATYPE_ID,
            cmis_model::OBJECT,
        )
        .protected(),
    );

    // Content model
    dictionary.add_class(
        ClassDefinition::new_type(cm::TYPE_CMOBJECT, Some(system_model::TYPE_BASE))
            .with_title("Object"),
    );
    dictionary.add_class(
        ClassDefinition::new_type(cm::TYPE_CONTENT, Some(cm::TYPE_CMOBJECT)).with_title("Content"),
    );
    dictionary.add_class(
        ClassDefinition::new_type(cm::TYPE_FOLDER, Some(cm::TYPE_CMOBJECT)).with_title("Folder"),
    );
    for aspect in [
        cm::ASPECT_VERSIONABLE,
        cm::ASPECT_AUDITABLE,
        cm::ASPECT_TITLED,
        cm::ASPECT_WORKING_COPY,
        cm::ASPECT_CHECKED_OUT,
        cm::ASPECT_COPIED_FROM,
    ] {
        dictionary.add_class(ClassDefinition::new_aspect(aspect, None));
    }

    dictionary.add_property(PropertyDefinition::new(cm::PROP_NAME, data_types::TEXT, cm::TYPE_CMOBJECT));
    dictionary.add_property(PropertyDefinition::new(
        cm::PROP_CONTENT,
        data_types::CONTENT,
        cm::TYPE_CONTENT,
    ));
    dictionary.add_property(PropertyDefinition::new(cm::PROP_TITLE, data_types::MLTEXT, cm::ASPECT_TITLED));
    dictionary.add_property(PropertyDefinition::new(
        cm::PROP_DESCRIPTION,
        data_types::MLTEXT,
        cm::ASPECT_TITLED,
    ));
    for (name, data_type) in [
        (cm::PROP_CREATOR, data_types::TEXT),
        (cm::PROP_CREATED, data_types::DATETIME),
        (cm::PROP_MODIFIER, data_types::TEXT),
        (cm::PROP_MODIFIED, data_types::DATETIME),
    ] {
        dictionary.add_property(
            PropertyDefinition::new(name, data_type, cm::ASPECT_AUDITABLE).protected(),
        );
    }
    dictionary.add_property(
        PropertyDefinition::new(cm::PROP_VERSION_LABEL, data_types::TEXT, cm::ASPECT_VERSIONABLE)
            .protected(),
    );
    dictionary.add_property(
        PropertyDefinition::new(
            cm::PROP_WORKING_COPY_OWNER,
            data_types::TEXT,
            cm::ASPECT_WORKING_COPY,
        )
        .protected(),
    );

    dictionary.add_association(AssociationDefinition::child(
        cm::ASSOC_CONTAINS,
        cm::TYPE_FOLDER,
        system_model::TYPE_BASE,
    ));
    dictionary.add_association(AssociationDefinition::peer(
        cm::ASSOC_ORIGINAL,
        cm::ASPECT_COPIED_FROM,
        cm::TYPE_CMOBJECT,
    ));
    dictionary.add_association(AssociationDefinition::peer(
        cm::ASSOC_WORKING_COPY_LINK,
        cm::ASPECT_CHECKED_OUT,
        cm::ASPECT_WORKING_COPY,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_class_includes_self_and_ancestors() {
        let dictionary = ModelDictionary::with_standard_model();
        assert!(dictionary.is_sub_class(&content_model::TYPE_CONTENT, &content_model::TYPE_CONTENT));
        assert!(dictionary.is_sub_class(&content_model::TYPE_CONTENT, &system_model::TYPE_BASE));
        assert!(!dictionary.is_sub_class(&content_model::TYPE_FOLDER, &content_model::TYPE_CONTENT));
    }

    #[test]
    fn test_unknown_class_is_only_its_own_sub_class() {
        let dictionary = ModelDictionary::with_standard_model();
        let unknown = QName::new("http://example.org/x", "thing");
        assert!(dictionary.is_sub_class(&unknown, &unknown));
        assert!(!dictionary.is_sub_class(&unknown, &system_model::TYPE_BASE));
    }

    #[test]
    fn test_aspect_and_type_lookup() {
        let dictionary = ModelDictionary::with_standard_model();
        assert!(dictionary.aspect(&content_model::ASPECT_VERSIONABLE).is_some());
        assert!(dictionary.aspect(&content_model::TYPE_CONTENT).is_none());
        assert!(dictionary.type_definition(&content_model::TYPE_CONTENT).is_some());
    }

    #[test]
    fn test_class_properties_include_inherited() {
        let dictionary = ModelDictionary::with_standard_model();
        let names: Vec<_> = dictionary
            .class_properties(&content_model::TYPE_CONTENT)
            .into_iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec![content_model::PROP_CONTENT, content_model::PROP_NAME]);
    }

    #[test]
    fn test_cmis_properties_registered() {
        let dictionary = ModelDictionary::with_standard_model();
        let object_id = QName::new(cmis_model::URI, "objectId");
        let property = dictionary.property(&object_id).unwrap();
        assert_eq!(property.data_type, cmis_model::DATATYPE_ID);
        assert!(property.protected);

        let allowed = QName::new(cmis_model::URI, "allowedChildObjectTypeIds");
        assert!(dictionary.property(&allowed).unwrap().multi_valued);
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let mut dictionary = ModelDictionary::new();
        let a = QName::new("urn:test", "a");
        let b = QName::new("urn:test", "b");
        dictionary.add_class(ClassDefinition::new_type(a.clone(), Some(b.clone())));
        dictionary.add_class(ClassDefinition::new_type(b.clone(), Some(a.clone())));
        assert!(!dictionary.is_sub_class(&a, &QName::new("urn:test", "c")));
        assert!(dictionary.class_properties(&a).is_empty());
    }
}
