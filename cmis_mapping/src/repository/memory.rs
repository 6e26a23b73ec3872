// src/repository/memory.rs
//! In-memory repository implementing every service contract
//!
//! Backs the tests and the command-line front end. A repository is built
//! either programmatically or from a TOML fixture whose names use the
//! `prefix:local` form:
//!
//! ```toml
//! root = "company-home"
//!
//! [namespaces]
//! acme = "http://example.org/model/acme/1.0"
//!
//! [[classes]]
//! name = "acme:report"
//! parent = "cm:content"
//!
//! [[nodes]]
//! id = "company-home"
//! type = "cm:folder"
//!
//! [[nodes]]
//! id = "report"
//! type = "acme:report"
//! parent = "company-home"
//! aspects = ["cm:versionable"]
//! properties = { "cm:name" = "report.txt" }
//! ```

use super::services::{
    AccessStatus, LockService, LockType, NodeService, PermissionService, VersionRecord,
    VersionService,
};
use crate::errors::{MappingError, MappingResult};
use chrono::{DateTime, Utc};
use cmis_model::logging::codes;
use cmis_model::models::{content_model, data_types};
use cmis_model::{
    log_error, log_success, AssociationDefinition, AssociationRef, ChildAssociationRef,
    ClassDefinition, ContentData, DictionaryService, ModelDictionary, NamespacePrefixResolver,
    NamespaceRegistry, NodeRef, PropertyDefinition, PropertyValue, QName,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// FIXTURE FORMAT
// ============================================================================

fn default_root() -> String {
    "company-home".to_string()
}

/// Serialized repository content
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryFixture {
    /// Id of the canonical root folder; created as `cm:folder` if not listed
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub namespaces: IndexMap<String, String>,
    #[serde(default)]
    pub classes: Vec<FixtureClass>,
    #[serde(default)]
    pub properties: Vec<FixtureProperty>,
    #[serde(default)]
    pub associations: Vec<FixtureAssociation>,
    #[serde(default)]
    pub nodes: Vec<FixtureNode>,
    #[serde(default)]
    pub peer_assocs: Vec<FixturePeerAssoc>,
    #[serde(default)]
    pub versions: Vec<FixtureVersionSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureClass {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub aspect: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureProperty {
    pub name: String,
    pub data_type: String,
    pub container: String,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureAssociation {
    pub name: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub child: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub secondary_parents: Vec<String>,
    #[serde(default)]
    pub aspects: Vec<String>,
    #[serde(default)]
    pub properties: IndexMap<String, toml::Value>,
    #[serde(default)]
    pub content: Option<ContentData>,
    #[serde(default)]
    pub lock: Option<LockType>,
    /// Permissions reported as denied on this node
    #[serde(default)]
    pub denied: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturePeerAssoc {
    #[serde(default)]
    pub id: Option<u64>,
    pub source: String,
    #[serde(rename = "type")]
    pub assoc_type: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureVersionSeries {
    pub series: String,
    /// Newest first
    #[serde(default)]
    pub history: Vec<FixtureVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureVersion {
    pub label: String,
    pub frozen: String,
    #[serde(default)]
    pub major: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

// ============================================================================
// REPOSITORY
// ============================================================================

#[derive(Debug, Clone)]
struct NodeRecord {
    node_type: QName,
    aspects: Vec<QName>,
    properties: IndexMap<QName, PropertyValue>,
    /// Primary association first
    parents: Vec<ChildAssociationRef>,
    lock: Option<LockType>,
    denied: Vec<String>,
}

impl NodeRecord {
    fn new(node_type: QName) -> Self {
        Self {
            node_type,
            aspects: Vec::new(),
            properties: IndexMap::new(),
            parents: Vec::new(),
            lock: None,
            denied: Vec::new(),
        }
    }
}

pub struct MemoryRepository {
    dictionary: Arc<ModelDictionary>,
    namespaces: Arc<NamespaceRegistry>,
    root: NodeRef,
    nodes: RwLock<IndexMap<NodeRef, NodeRecord>>,
    assocs: Vec<AssociationRef>,
    histories: IndexMap<NodeRef, Vec<VersionRecord>>,
}

impl MemoryRepository {
    /// Empty repository holding only the root folder
    pub fn new(dictionary: ModelDictionary, namespaces: NamespaceRegistry, root: NodeRef) -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(root.clone(), NodeRecord::new(content_model::TYPE_FOLDER));
        Self {
            dictionary: Arc::new(dictionary),
            namespaces: Arc::new(namespaces),
            root,
            nodes: RwLock::new(nodes),
            assocs: Vec::new(),
            histories: IndexMap::new(),
        }
    }

    /// Repository over the standard model with root `workspace://SpacesStore/company-home`
    pub fn with_standard_model() -> Self {
        Self::new(
            ModelDictionary::with_standard_model(),
            NamespaceRegistry::with_standard_namespaces(),
            NodeRef::workspace(default_root()),
        )
    }

    pub fn dictionary(&self) -> Arc<ModelDictionary> {
        Arc::clone(&self.dictionary)
    }

    pub fn namespaces(&self) -> Arc<NamespaceRegistry> {
        Arc::clone(&self.namespaces)
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    // ------------------------------------------------------------------------
    // Population
    // ------------------------------------------------------------------------

    /// Add a node, optionally as the primary child of `parent`
    pub fn add_node(
        &mut self,
        node: NodeRef,
        node_type: QName,
        parent: Option<&NodeRef>,
    ) -> MappingResult<()> {
        let mut record = NodeRecord::new(node_type);
        if let Some(parent) = parent {
            self.require_node(parent)?;
            record.parents.push(ChildAssociationRef {
                parent: parent.clone(),
                child: node.clone(),
                type_qname: content_model::ASSOC_CONTAINS,
                is_primary: true,
            });
        }
        self.nodes.get_mut().insert(node, record);
        Ok(())
    }

    /// File an existing node in a further folder
    pub fn add_secondary_parent(&mut self, node: &NodeRef, parent: &NodeRef) -> MappingResult<()> {
        self.require_node(parent)?;
        let record = self.record_mut(node)?;
        record.parents.push(ChildAssociationRef {
            parent: parent.clone(),
            child: node.clone(),
            type_qname: content_model::ASSOC_CONTAINS,
            is_primary: false,
        });
        Ok(())
    }

    pub fn add_aspect(&mut self, node: &NodeRef, aspect: QName) -> MappingResult<()> {
        let record = self.record_mut(node)?;
        if !record.aspects.contains(&aspect) {
            record.aspects.push(aspect);
        }
        Ok(())
    }

    pub fn set_lock(&mut self, node: &NodeRef, lock: Option<LockType>) -> MappingResult<()> {
        self.record_mut(node)?.lock = lock;
        Ok(())
    }

    pub fn deny(&mut self, node: &NodeRef, permission: &str) -> MappingResult<()> {
        self.record_mut(node)?.denied.push(permission.to_string());
        Ok(())
    }

    /// Add a peer association; ids are assigned in creation order
    pub fn add_association(
        &mut self,
        source: &NodeRef,
        assoc_type: QName,
        target: &NodeRef,
    ) -> MappingResult<AssociationRef> {
        let id = self.assocs.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        self.add_association_with_id(id, source, assoc_type, target)
    }

    fn add_association_with_id(
        &mut self,
        id: u64,
        source: &NodeRef,
        assoc_type: QName,
        target: &NodeRef,
    ) -> MappingResult<AssociationRef> {
        self.require_node(source)?;
        self.require_node(target)?;
        let assoc = AssociationRef::new(id, source.clone(), assoc_type, target.clone());
        self.assocs.push(assoc.clone());
        Ok(assoc)
    }

    /// Append a version to the history of `series`; call newest first
    pub fn add_version(&mut self, series: &NodeRef, record: VersionRecord) -> MappingResult<()> {
        self.require_node(series)?;
        self.histories.entry(series.clone()).or_default().push(record);
        Ok(())
    }

    fn require_node(&self, node: &NodeRef) -> MappingResult<()> {
        if self.nodes.read().contains_key(node) {
            Ok(())
        } else {
            Err(missing_node(node))
        }
    }

    fn record_mut(&mut self, node: &NodeRef) -> MappingResult<&mut NodeRecord> {
        self.nodes
            .get_mut()
            .get_mut(node)
            .ok_or_else(|| missing_node(node))
    }

    // ------------------------------------------------------------------------
    // Fixture loading
    // ------------------------------------------------------------------------

    pub fn from_toml_str(source: &str) -> MappingResult<Self> {
        let fixture: RepositoryFixture = toml::from_str(source).map_err(|e| {
            log_error!(codes::repository::FIXTURE_LOAD_FAILURE, "Invalid fixture", "error" => e);
            MappingError::repository(format!("invalid fixture: {}", e))
        })?;
        Self::from_fixture(fixture)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> MappingResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            log_error!(codes::repository::FIXTURE_LOAD_FAILURE, "Cannot read fixture",
                "path" => path.display(), "error" => e);
            MappingError::repository(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn from_fixture(fixture: RepositoryFixture) -> MappingResult<Self> {
        let mut namespaces = NamespaceRegistry::with_standard_namespaces();
        for (prefix, uri) in &fixture.namespaces {
            namespaces.register(prefix, uri);
        }
        let qname = |value: &str| -> MappingResult<QName> {
            Ok(QName::resolve_prefixed(value, &namespaces)?)
        };

        let mut dictionary = ModelDictionary::with_standard_model();
        for class in &fixture.classes {
            let parent = class.parent.as_deref().map(qname).transpose()?;
            let mut definition = if class.aspect {
                ClassDefinition::new_aspect(qname(&class.name)?, parent)
            } else {
                ClassDefinition::new_type(qname(&class.name)?, parent)
            };
            definition.title = class.title.clone();
            definition.description = class.description.clone();
            dictionary.add_class(definition);
        }
        for property in &fixture.properties {
            let mut definition = PropertyDefinition::new(
                qname(&property.name)?,
                qname(&property.data_type)?,
                qname(&property.container)?,
            );
            definition.multi_valued = property.multi_valued;
            definition.protected = property.protected;
            dictionary.add_property(definition);
        }
        for association in &fixture.associations {
            let (name, source, target) = (
                qname(&association.name)?,
                qname(&association.source)?,
                qname(&association.target)?,
            );
            dictionary.add_association(if association.child {
                AssociationDefinition::child(name, source, target)
            } else {
                AssociationDefinition::peer(name, source, target)
            });
        }

        let root = parse_node_ref(&fixture.root)?;
        let mut repository = Self::new(dictionary, namespaces.clone(), root);

        // Nodes first, then links, so parents may be listed after children
        for node in &fixture.nodes {
            let node_ref = parse_node_ref(&node.id)?;
            let mut record = NodeRecord::new(qname(&node.node_type)?);
            for aspect in &node.aspects {
                record.aspects.push(qname(aspect)?);
            }
            for (name, value) in &node.properties {
                let name = qname(name)?;
                let data_type = repository
                    .dictionary
                    .property(&name)
                    .map(|def| def.data_type.clone());
                let value = fixture_value(value, data_type.as_ref(), &namespaces)?;
                record.properties.insert(name, value);
            }
            if let Some(content) = &node.content {
                record
                    .properties
                    .insert(content_model::PROP_CONTENT, PropertyValue::Content(content.clone()));
            }
            record.lock = node.lock;
            record.denied = node.denied.clone();
            repository.nodes.get_mut().insert(node_ref, record);
        }
        for node in &fixture.nodes {
            let node_ref = parse_node_ref(&node.id)?;
            if let Some(parent) = &node.parent {
                let parent = parse_node_ref(parent)?;
                repository.require_node(&parent)?;
                let record = repository.record_mut(&node_ref)?;
                record.parents.insert(
                    0,
                    ChildAssociationRef {
                        parent,
                        child: node_ref.clone(),
                        type_qname: content_model::ASSOC_CONTAINS,
                        is_primary: true,
                    },
                );
            }
            for parent in &node.secondary_parents {
                repository.add_secondary_parent(&node_ref, &parse_node_ref(parent)?)?;
            }
        }

        for assoc in &fixture.peer_assocs {
            let (source, target) = (parse_node_ref(&assoc.source)?, parse_node_ref(&assoc.target)?);
            let assoc_type = qname(&assoc.assoc_type)?;
            match assoc.id {
                Some(id) => repository.add_association_with_id(id, &source, assoc_type, &target)?,
                None => repository.add_association(&source, assoc_type, &target)?,
            };
        }

        for series in &fixture.versions {
            let series_ref = parse_node_ref(&series.series)?;
            for version in &series.history {
                repository.add_version(
                    &series_ref,
                    VersionRecord {
                        label: version.label.clone(),
                        frozen: parse_node_ref(&version.frozen)?,
                        is_major: version.major,
                        comment: version.comment.clone(),
                    },
                )?;
            }
        }

        log_success!(codes::success::FIXTURE_LOADED, "Repository fixture loaded",
            "nodes" => repository.node_count(),
            "associations" => repository.assocs.len(),
            "classes" => repository.dictionary.class_count());
        Ok(repository)
    }
}

impl std::fmt::Debug for MemoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("root", &self.root)
            .field("nodes", &self.node_count())
            .field("associations", &self.assocs.len())
            .finish()
    }
}

fn missing_node(node: &NodeRef) -> MappingError {
    MappingError::repository(format!("node '{}' does not exist", node))
}

/// Fixture ids are bare ids in the spaces store unless fully qualified
fn parse_node_ref(id: &str) -> MappingResult<NodeRef> {
    if id.contains("://") {
        Ok(id.parse()?)
    } else {
        Ok(NodeRef::workspace(id))
    }
}

/// Convert a fixture value, guided by the property's declared data type
fn fixture_value(
    value: &toml::Value,
    data_type: Option<&QName>,
    namespaces: &dyn NamespacePrefixResolver,
) -> MappingResult<PropertyValue> {
    if let toml::Value::Array(values) = value {
        return values
            .iter()
            .map(|v| fixture_value(v, data_type, namespaces))
            .collect::<MappingResult<Vec<_>>>()
            .map(PropertyValue::Multi);
    }

    let mismatch = || {
        MappingError::repository(format!(
            "fixture value {} does not fit data type {}",
            value,
            data_type.map(|d| d.to_string()).unwrap_or_default()
        ))
    };

    match data_type {
        Some(d) if *d == data_types::BOOLEAN => value.as_bool().map(PropertyValue::Boolean).ok_or_else(mismatch),
        Some(d) if *d == data_types::INT || *d == data_types::LONG => {
            value.as_integer().map(PropertyValue::Integer).ok_or_else(mismatch)
        }
        Some(d) if *d == data_types::DOUBLE || *d == data_types::FLOAT => value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .map(PropertyValue::Decimal)
            .ok_or_else(mismatch),
        Some(d) if *d == data_types::DATE || *d == data_types::DATETIME => {
            parse_datetime(value).ok_or_else(mismatch)
        }
        Some(d) if *d == data_types::NODE_REF || *d == data_types::CATEGORY => {
            let text = value.as_str().ok_or_else(mismatch)?;
            Ok(PropertyValue::NodeRef(parse_node_ref(text)?))
        }
        Some(d) if *d == data_types::QNAME => {
            let text = value.as_str().ok_or_else(mismatch)?;
            Ok(PropertyValue::QName(QName::resolve_prefixed(text, namespaces)?))
        }
        _ => match value {
            toml::Value::String(s) => Ok(PropertyValue::String(s.clone())),
            toml::Value::Integer(i) => Ok(PropertyValue::Integer(*i)),
            toml::Value::Float(f) => Ok(PropertyValue::Decimal(*f)),
            toml::Value::Boolean(b) => Ok(PropertyValue::Boolean(*b)),
            toml::Value::Datetime(_) => parse_datetime(value).ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
    }
}

fn parse_datetime(value: &toml::Value) -> Option<PropertyValue> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Datetime(dt) => dt.to_string(),
        _ => return None,
    };
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|dt| PropertyValue::DateTime(dt.with_timezone(&Utc)))
}

// ============================================================================
// SERVICE CONTRACTS
// ============================================================================

impl NodeService for MemoryRepository {
    fn exists(&self, node: &NodeRef) -> bool {
        self.nodes.read().contains_key(node)
    }

    fn node_type(&self, node: &NodeRef) -> Option<QName> {
        self.nodes.read().get(node).map(|r| r.node_type.clone())
    }

    fn property(&self, node: &NodeRef, name: &QName) -> Option<PropertyValue> {
        self.nodes
            .read()
            .get(node)
            .and_then(|r| r.properties.get(name).cloned())
    }

    fn set_property(
        &self,
        node: &NodeRef,
        name: &QName,
        value: PropertyValue,
    ) -> MappingResult<()> {
        let mut nodes = self.nodes.write();
        let record = nodes.get_mut(node).ok_or_else(|| missing_node(node))?;
        record.properties.insert(name.clone(), value);
        Ok(())
    }

    fn has_aspect(&self, node: &NodeRef, aspect: &QName) -> bool {
        self.nodes
            .read()
            .get(node)
            .map(|r| r.aspects.contains(aspect))
            .unwrap_or(false)
    }

    fn aspects(&self, node: &NodeRef) -> Vec<QName> {
        self.nodes
            .read()
            .get(node)
            .map(|r| r.aspects.clone())
            .unwrap_or_default()
    }

    fn parent_assocs(&self, node: &NodeRef) -> Vec<ChildAssociationRef> {
        self.nodes
            .read()
            .get(node)
            .map(|r| r.parents.clone())
            .unwrap_or_default()
    }

    fn target_assocs(&self, node: &NodeRef, assoc_type: &QName) -> Vec<AssociationRef> {
        self.assocs
            .iter()
            .filter(|a| &a.source == node && &a.type_qname == assoc_type)
            .cloned()
            .collect()
    }
}

impl PermissionService for MemoryRepository {
    fn has_permission(&self, node: &NodeRef, permission: &str) -> AccessStatus {
        match self.nodes.read().get(node) {
            None => AccessStatus::Denied,
            Some(record) if record.denied.iter().any(|p| p == permission) => AccessStatus::Denied,
            Some(_) => AccessStatus::Allowed,
        }
    }
}

impl LockService for MemoryRepository {
    fn lock_type(&self, node: &NodeRef) -> Option<LockType> {
        self.nodes.read().get(node).and_then(|r| r.lock)
    }
}

impl VersionService for MemoryRepository {
    fn series_of(&self, frozen: &NodeRef) -> Option<NodeRef> {
        self.histories
            .iter()
            .find(|(_, history)| history.iter().any(|v| &v.frozen == frozen))
            .map(|(series, _)| series.clone())
    }

    fn history(&self, series: &NodeRef) -> Vec<VersionRecord> {
        self.histories.get(series).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmis_model::models::system_model;

    const FIXTURE: &str = r#"
        root = "home"

        [namespaces]
        acme = "http://example.org/model/acme/1.0"

        [[classes]]
        name = "acme:report"
        parent = "cm:content"
        title = "Report"

        [[properties]]
        name = "acme:score"
        data_type = "d:int"
        container = "acme:report"

        [[nodes]]
        id = "home"
        type = "cm:folder"
        properties = { "cm:name" = "Company Home" }

        [[nodes]]
        id = "doc"
        type = "acme:report"
        parent = "sub"
        secondary_parents = ["home"]
        aspects = ["cm:versionable"]
        lock = "read_only"
        denied = ["DeleteNode"]
        properties = { "cm:name" = "q1.txt", "acme:score" = 7, "cm:created" = "2024-03-01T10:00:00Z" }
        content = { content_url = "store://q1.bin", mimetype = "text/plain", size = 12 }

        [[nodes]]
        id = "sub"
        type = "cm:folder"
        parent = "home"

        [[peer_assocs]]
        id = 9
        source = "doc"
        type = "cm:original"
        target = "sub"

        [[versions]]
        series = "doc"

        [[versions.history]]
        label = "1.1"
        frozen = "versionStore://version2Store/v2"
        comment = "second"

        [[versions.history]]
        label = "1.0"
        frozen = "versionStore://version2Store/v1"
        major = true
    "#;

    #[test]
    fn test_fixture_loading() {
        let repo = MemoryRepository::from_toml_str(FIXTURE).unwrap();
        let doc = NodeRef::workspace("doc");
        let home = NodeRef::workspace("home");

        assert_eq!(repo.root(), &home);
        assert_eq!(repo.node_count(), 3);
        assert_eq!(
            repo.node_type(&doc),
            Some(QName::new("http://example.org/model/acme/1.0", "report"))
        );
        assert_eq!(
            repo.property(&doc, &QName::new("http://example.org/model/acme/1.0", "score")),
            Some(PropertyValue::Integer(7))
        );
        assert!(matches!(
            repo.property(&doc, &content_model::PROP_CREATED),
            Some(PropertyValue::DateTime(_))
        ));
        assert_eq!(
            repo.property(&doc, &content_model::PROP_CONTENT)
                .and_then(|v| v.as_content().map(|c| c.size)),
            Some(12)
        );
        assert!(repo.has_aspect(&doc, &content_model::ASPECT_VERSIONABLE));
        assert_eq!(repo.lock_type(&doc), Some(LockType::ReadOnly));
    }

    #[test]
    fn test_parents_listed_primary_first() {
        let repo = MemoryRepository::from_toml_str(FIXTURE).unwrap();
        let doc = NodeRef::workspace("doc");
        let parents = repo.parent_assocs(&doc);
        assert_eq!(parents.len(), 2);
        assert!(parents[0].is_primary);
        assert_eq!(parents[0].parent, NodeRef::workspace("sub"));
        assert!(!parents[1].is_primary);
        assert_eq!(
            repo.primary_parent(&doc).map(|p| p.parent),
            Some(NodeRef::workspace("sub"))
        );
        assert!(repo.primary_parent(repo.root()).is_none());
    }

    #[test]
    fn test_permissions_and_versions() {
        let repo = MemoryRepository::from_toml_str(FIXTURE).unwrap();
        let doc = NodeRef::workspace("doc");
        assert_eq!(repo.has_permission(&doc, "DeleteNode"), AccessStatus::Denied);
        assert_eq!(repo.has_permission(&doc, "ReadProperties"), AccessStatus::Allowed);
        assert_eq!(
            repo.has_permission(&NodeRef::workspace("ghost"), "ReadProperties"),
            AccessStatus::Denied
        );

        let frozen: NodeRef = "versionStore://version2Store/v1".parse().unwrap();
        assert_eq!(repo.series_of(&frozen), Some(doc.clone()));
        let history = repo.history(&doc);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].label, "1.1");
        assert!(history[1].is_major);

        let assocs = repo.target_assocs(&doc, &content_model::ASSOC_ORIGINAL);
        assert_eq!(assocs.len(), 1);
        assert_eq!(assocs[0].id, 9);
    }

    #[test]
    fn test_set_property_on_missing_node_fails() {
        let repo = MemoryRepository::with_standard_model();
        let result = repo.set_property(
            &NodeRef::workspace("ghost"),
            &content_model::PROP_NAME,
            PropertyValue::string("x"),
        );
        assert!(matches!(result, Err(MappingError::Repository { .. })));
    }

    #[test]
    fn test_unknown_prefix_in_fixture_fails() {
        let result = MemoryRepository::from_toml_str(
            r#"
            [[nodes]]
            id = "n"
            type = "zz:thing"
            "#,
        );
        assert!(matches!(result, Err(MappingError::Model(_))));
    }

    #[test]
    fn test_root_created_when_not_listed() {
        let repo = MemoryRepository::from_toml_str("root = \"top\"").unwrap();
        assert_eq!(
            repo.node_type(&NodeRef::workspace("top")),
            Some(content_model::TYPE_FOLDER)
        );
        assert!(repo.dictionary().class(&system_model::TYPE_BASE).is_some());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", FIXTURE).unwrap();
        let repo = MemoryRepository::load(file.path()).unwrap();
        assert_eq!(repo.node_count(), 3);
        assert!(MemoryRepository::load("/nonexistent/fixture.toml").is_err());
    }
}
