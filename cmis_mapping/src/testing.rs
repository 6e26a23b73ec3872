// src/testing.rs
//! Shared fixtures for unit tests
//!
//! ```text
//! Company Home
//! ├── Projects (acme:project)
//! │   ├── q1.txt (acme:report, also filed in Archive)
//! │   └── Archive
//! │       └── old.txt
//! ├── plain.txt
//! ├── contract.txt (checked out) ── workingcopylink ──▶ contract (Working Copy).txt
//! └── locked.txt
//! ```

use crate::accessors::AccessorContext;
use crate::mapping::types::TypeMapping;
use crate::mapping::CmisMapping;
use crate::repository::{
    permissions, LockType, MemoryRepository, NodeService, ServiceRegistry, VersionRecord,
};
use cmis_model::models::{content_model, data_types};
use cmis_model::{
    AssociationDefinition, AssociationRef, ClassDefinition, ContentData, MappingPreferences,
    ModelDictionary, NamespaceRegistry, NodeRef, PropertyDefinition, PropertyValue, QName,
    QNameCache, StoreRef,
};
use std::sync::Arc;

pub const ACME_URI: &str = "http://example.org/model/acme/1.0";
pub const ACME_PREFIX: &str = "acme";

pub const REPORT_TYPE: QName = QName::from_static(ACME_URI, "report");
pub const PROJECT_FOLDER_TYPE: QName = QName::from_static(ACME_URI, "project");
pub const RELATED_ASSOC: QName = QName::from_static(ACME_URI, "related");
pub const SCORE_PROPERTY: QName = QName::from_static(ACME_URI, "score");

const VERSION_STORE: &str = "version2Store";

// ============================================================================
// NODES
// ============================================================================

pub fn root() -> NodeRef {
    NodeRef::workspace("company-home")
}

pub fn projects() -> NodeRef {
    NodeRef::workspace("projects")
}

pub fn archive() -> NodeRef {
    NodeRef::workspace("archive")
}

pub fn report() -> NodeRef {
    NodeRef::workspace("report")
}

pub fn old_report() -> NodeRef {
    NodeRef::workspace("old-report")
}

pub fn plain() -> NodeRef {
    NodeRef::workspace("plain")
}

pub fn checked_out() -> NodeRef {
    NodeRef::workspace("contract")
}

pub fn working_copy() -> NodeRef {
    NodeRef::workspace("contract-pwc")
}

pub fn locked() -> NodeRef {
    NodeRef::workspace("locked")
}

pub fn frozen_v1() -> NodeRef {
    NodeRef::new(StoreRef::new(StoreRef::PROTOCOL_VERSION, VERSION_STORE), "v1")
}

pub fn frozen_v2() -> NodeRef {
    NodeRef::new(StoreRef::new(StoreRef::PROTOCOL_VERSION, VERSION_STORE), "v2")
}

/// Never added to the repository
pub fn missing() -> NodeRef {
    NodeRef::workspace("does-not-exist")
}

// ============================================================================
// MODEL AND REPOSITORY
// ============================================================================

fn namespaces() -> NamespaceRegistry {
    let mut namespaces = NamespaceRegistry::with_standard_namespaces();
    namespaces.register(ACME_PREFIX, ACME_URI);
    namespaces
}

fn dictionary() -> ModelDictionary {
    let mut dictionary = ModelDictionary::with_standard_model();
    dictionary
        .add_class(
            ClassDefinition::new_type(REPORT_TYPE, Some(content_model::TYPE_CONTENT))
                .with_title("Report"),
        )
        .add_class(
            ClassDefinition::new_type(PROJECT_FOLDER_TYPE, Some(content_model::TYPE_FOLDER))
                .with_title("Project"),
        )
        .add_property(PropertyDefinition::new(
            SCORE_PROPERTY,
            data_types::INT,
            REPORT_TYPE,
        ))
        .add_association(AssociationDefinition::peer(
            RELATED_ASSOC,
            content_model::TYPE_CONTENT,
            content_model::TYPE_CONTENT,
        ));
    dictionary
}

fn text(value: &str) -> PropertyValue {
    PropertyValue::string(value)
}

fn named(repository: &MemoryRepository, node: &NodeRef, name: &str) {
    repository
        .set_property(node, &content_model::PROP_NAME, text(name))
        .unwrap();
}

/// Fresh repository holding the tree above
pub fn repository() -> Arc<MemoryRepository> {
    let mut repo = MemoryRepository::new(dictionary(), namespaces(), root());
    let content = content_model::TYPE_CONTENT;

    repo.add_node(projects(), PROJECT_FOLDER_TYPE, Some(&root())).unwrap();
    repo.add_node(archive(), content_model::TYPE_FOLDER, Some(&projects())).unwrap();
    repo.deny(&archive(), permissions::LINK_CHILDREN).unwrap();

    repo.add_node(report(), REPORT_TYPE, Some(&projects())).unwrap();
    repo.add_secondary_parent(&report(), &archive()).unwrap();
    repo.add_aspect(&report(), content_model::ASPECT_VERSIONABLE).unwrap();
    repo.add_aspect(&report(), content_model::ASPECT_TITLED).unwrap();
    repo.add_node(old_report(), content.clone(), Some(&archive())).unwrap();

    repo.add_node(plain(), content.clone(), Some(&root())).unwrap();
    repo.deny(&plain(), permissions::DELETE_NODE).unwrap();

    repo.add_node(checked_out(), content.clone(), Some(&root())).unwrap();
    repo.add_aspect(&checked_out(), content_model::ASPECT_VERSIONABLE).unwrap();
    repo.add_aspect(&checked_out(), content_model::ASPECT_CHECKED_OUT).unwrap();
    repo.add_node(working_copy(), content.clone(), Some(&root())).unwrap();
    repo.add_aspect(&working_copy(), content_model::ASPECT_WORKING_COPY).unwrap();
    repo.add_aspect(&working_copy(), content_model::ASPECT_COPIED_FROM).unwrap();
    repo.add_association(&checked_out(), content_model::ASSOC_WORKING_COPY_LINK, &working_copy())
        .unwrap();
    repo.add_association(&working_copy(), content_model::ASSOC_ORIGINAL, &checked_out())
        .unwrap();

    repo.add_node(locked(), content.clone(), Some(&root())).unwrap();
    repo.set_lock(&locked(), Some(LockType::ReadOnly)).unwrap();

    repo.add_association(&report(), RELATED_ASSOC, &plain()).unwrap();

    repo.add_node(frozen_v1(), content.clone(), None).unwrap();
    repo.add_node(frozen_v2(), content, None).unwrap();
    repo.add_version(
        &report(),
        VersionRecord {
            label: "1.1".to_string(),
            frozen: frozen_v2(),
            is_major: false,
            comment: Some("second draft".to_string()),
        },
    )
    .unwrap();
    repo.add_version(
        &report(),
        VersionRecord {
            label: "1.0".to_string(),
            frozen: frozen_v1(),
            is_major: true,
            comment: None,
        },
    )
    .unwrap();

    named(&repo, &root(), "Company Home");
    named(&repo, &projects(), "Projects");
    named(&repo, &archive(), "Archive");
    named(&repo, &report(), "q1.txt");
    named(&repo, &old_report(), "old.txt");
    named(&repo, &plain(), "plain.txt");
    named(&repo, &checked_out(), "contract.txt");
    named(&repo, &working_copy(), "contract (Working Copy).txt");
    named(&repo, &locked(), "locked.txt");
    named(&repo, &frozen_v1(), "q1.txt");
    named(&repo, &frozen_v2(), "q1.txt");

    let report = report();
    for (property, value) in [
        (content_model::PROP_CREATOR, text("alice")),
        (content_model::PROP_VERSION_LABEL, text("1.1")),
        (SCORE_PROPERTY, PropertyValue::Integer(7)),
        (
            content_model::PROP_CONTENT,
            PropertyValue::Content(ContentData {
                content_url: "store://2024/1/q1.bin".to_string(),
                mimetype: "text/plain".to_string(),
                size: 12,
                encoding: Some("UTF-8".to_string()),
            }),
        ),
    ] {
        repo.set_property(&report, &property, value).unwrap();
    }
    repo.set_property(&working_copy(), &content_model::PROP_WORKING_COPY_OWNER, text("bob"))
        .unwrap();

    Arc::new(repo)
}

pub fn services() -> ServiceRegistry {
    ServiceRegistry::from_memory(repository())
}

fn type_mapping_for(services: &ServiceRegistry) -> TypeMapping {
    let cache = QNameCache::new(services.namespaces.clone(), 64).unwrap();
    TypeMapping::new(
        services.dictionary.clone(),
        services.namespaces.clone(),
        Arc::new(cache),
    )
}

pub fn type_mapping() -> TypeMapping {
    type_mapping_for(&services())
}

pub fn accessor_context() -> AccessorContext {
    let services = services();
    let types = Arc::new(type_mapping_for(&services));
    AccessorContext::new(services, types)
}

/// Context over a fresh repository, for accessors that write
pub fn shared_accessor_context() -> Arc<AccessorContext> {
    Arc::new(accessor_context())
}

pub fn mapping() -> CmisMapping {
    CmisMapping::new(services(), &MappingPreferences::default()).unwrap()
}

/// The `acme:related` association from the report to plain.txt
pub fn related_assoc(ctx: &AccessorContext) -> AssociationRef {
    ctx.services
        .nodes
        .target_assocs(&report(), &RELATED_ASSOC)
        .into_iter()
        .next()
        .unwrap()
}
