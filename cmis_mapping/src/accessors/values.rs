// src/accessors/values.rs
//! Value strategies
//!
//! Direct strategies read a native property. The others compute their
//! value from node identity, type, version history, working-copy state,
//! locks or the folder hierarchy.

use super::{AccessorContext, ValueStrategy};
use cmis_model::config::constants::versioning::{
    ASSOCIATION_ID_PREFIX, INITIAL_LABEL, LABEL_SEPARATOR, PWC_LABEL,
};
use cmis_model::models::content_model;
use cmis_model::{AssociationRef, NodeRef, PropertyValue, QName, Scope};

use crate::repository::{LockType, VersionRecord};

// ============================================================================
// SHARED LOOKUPS
// ============================================================================

fn node_scope(ctx: &AccessorContext, node: &NodeRef) -> Option<Scope> {
    let node_type = ctx.services.nodes.node_type(node)?;
    ctx.types.type_id_for_class(&node_type).map(|id| id.scope())
}

fn is_document(ctx: &AccessorContext, node: &NodeRef) -> bool {
    node_scope(ctx, node) == Some(Scope::Document)
}

fn is_folder(ctx: &AccessorContext, node: &NodeRef) -> bool {
    node_scope(ctx, node) == Some(Scope::Folder)
}

fn is_working_copy(ctx: &AccessorContext, node: &NodeRef) -> bool {
    ctx.services
        .nodes
        .has_aspect(node, &content_model::ASPECT_WORKING_COPY)
}

/// History entry of a frozen version node
fn frozen_record(ctx: &AccessorContext, node: &NodeRef) -> Option<(NodeRef, VersionRecord)> {
    let series = ctx.services.frozen_series(node)?;
    let record = ctx
        .services
        .versions
        .history(&series)
        .into_iter()
        .find(|record| &record.frozen == node)?;
    Some((series, record))
}

/// Newest history entry of a live node
fn head_record(ctx: &AccessorContext, node: &NodeRef) -> Option<VersionRecord> {
    ctx.services.versions.history(node).into_iter().next()
}

/// Live node that anchors the version series of `node`
fn series_node(ctx: &AccessorContext, node: &NodeRef) -> NodeRef {
    if let Some(series) = ctx.services.frozen_series(node) {
        return series;
    }
    if is_working_copy(ctx, node) {
        if let Some(original) = ctx
            .services
            .nodes
            .target_assocs(node, &content_model::ASSOC_ORIGINAL)
            .into_iter()
            .next()
        {
            return original.target;
        }
    }
    node.clone()
}

/// Private working copy of a checked-out series
fn working_copy_of(ctx: &AccessorContext, series: &NodeRef) -> Option<NodeRef> {
    if !ctx
        .services
        .nodes
        .has_aspect(series, &content_model::ASPECT_CHECKED_OUT)
    {
        return None;
    }
    ctx.services
        .nodes
        .target_assocs(series, &content_model::ASSOC_WORKING_COPY_LINK)
        .into_iter()
        .next()
        .map(|assoc| assoc.target)
}

fn version_label(ctx: &AccessorContext, node: &NodeRef) -> String {
    if let Some((_, record)) = frozen_record(ctx, node) {
        return record.label;
    }
    if is_working_copy(ctx, node) {
        return PWC_LABEL.to_string();
    }
    ctx.services
        .nodes
        .property(node, &content_model::PROP_VERSION_LABEL)
        .and_then(|label| label.as_str().map(str::to_string))
        .unwrap_or_else(|| INITIAL_LABEL.to_string())
}

// ============================================================================
// DIRECT
// ============================================================================

/// Native property read and written as is
#[derive(Debug, Clone)]
pub struct Direct {
    property: QName,
}

impl Direct {
    pub fn new(property: QName) -> Self {
        Self { property }
    }
}

impl ValueStrategy for Direct {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        ctx.services.nodes.property(node, &self.property)
    }

    fn mapped_property(&self) -> Option<&QName> {
        Some(&self.property)
    }
}

/// `cm:name`, or the association reference on a relationship
#[derive(Debug, Clone)]
pub struct Name {
    property: QName,
}

impl Default for Name {
    fn default() -> Self {
        Self {
            property: content_model::PROP_NAME,
        }
    }
}

impl ValueStrategy for Name {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        ctx.services.nodes.property(node, &self.property)
    }

    fn relationship_value(&self, _ctx: &AccessorContext, assoc: &AssociationRef) -> Option<PropertyValue> {
        Some(PropertyValue::String(assoc.to_string()))
    }

    fn mapped_property(&self) -> Option<&QName> {
        Some(&self.property)
    }
}

/// No value on any object
#[derive(Debug, Clone, Default)]
pub struct Fixed;

impl ValueStrategy for Fixed {
    fn node_value(&self, _ctx: &AccessorContext, _node: &NodeRef) -> Option<PropertyValue> {
        None
    }
}

// ============================================================================
// IDENTITY AND TYPE
// ============================================================================

/// `<node-ref>`, `<series>;<label>` for frozen versions, `assoc:<id>` for relationships
#[derive(Debug, Clone, Default)]
pub struct ObjectId;

impl ValueStrategy for ObjectId {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        if let Some((series, record)) = frozen_record(ctx, node) {
            return Some(PropertyValue::Id(format!(
                "{}{}{}",
                series, LABEL_SEPARATOR, record.label
            )));
        }
        Some(PropertyValue::Id(node.to_string()))
    }

    fn relationship_value(&self, _ctx: &AccessorContext, assoc: &AssociationRef) -> Option<PropertyValue> {
        Some(PropertyValue::Id(format!("{}{}", ASSOCIATION_ID_PREFIX, assoc.id)))
    }
}

/// Plain node reference string
#[derive(Debug, Clone, Default)]
pub struct NodeRefValue;

impl ValueStrategy for NodeRefValue {
    fn node_value(&self, _ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        Some(PropertyValue::Id(node.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectTypeId;

impl ValueStrategy for ObjectTypeId {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        let node_type = ctx.services.nodes.node_type(node)?;
        let type_id = ctx.types.type_id_for_class(&node_type)?;
        Some(PropertyValue::Id(type_id.id().to_string()))
    }

    fn relationship_value(&self, ctx: &AccessorContext, assoc: &AssociationRef) -> Option<PropertyValue> {
        let type_id = ctx.types.type_id_for_class(&assoc.type_qname)?;
        Some(PropertyValue::Id(type_id.id().to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BaseTypeId;

impl ValueStrategy for BaseTypeId {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        node_scope(ctx, node).map(|scope| PropertyValue::Id(scope.base_type_id().to_string()))
    }

    fn relationship_value(&self, _ctx: &AccessorContext, _assoc: &AssociationRef) -> Option<PropertyValue> {
        Some(PropertyValue::Id(Scope::Relationship.base_type_id().to_string()))
    }
}

/// Frozen versions and read-only locked nodes
#[derive(Debug, Clone, Default)]
pub struct IsImmutable;

impl ValueStrategy for IsImmutable {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        let immutable = ctx.services.is_frozen_version(node)
            || ctx.services.locks.lock_type(node) == Some(LockType::ReadOnly);
        Some(PropertyValue::Boolean(immutable))
    }
}

// ============================================================================
// VERSIONING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    IsLatest,
    IsMajor,
    IsLatestMajor,
    Label,
    SeriesId,
    IsSeriesCheckedOut,
    CheckedOutBy,
    CheckedOutId,
    CheckinComment,
}

/// Version history and working-copy state of documents
#[derive(Debug, Clone)]
pub struct Version {
    kind: VersionKind,
}

impl Version {
    pub fn new(kind: VersionKind) -> Self {
        Self { kind }
    }

    fn is_major(ctx: &AccessorContext, node: &NodeRef) -> bool {
        if let Some((_, record)) = frozen_record(ctx, node) {
            return record.is_major;
        }
        if is_working_copy(ctx, node) {
            return false;
        }
        head_record(ctx, node).map(|record| record.is_major).unwrap_or(true)
    }

    fn is_latest(ctx: &AccessorContext, node: &NodeRef) -> bool {
        !ctx.services.is_frozen_version(node) && !is_working_copy(ctx, node)
    }
}

impl ValueStrategy for Version {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        if !is_document(ctx, node) {
            return None;
        }
        match self.kind {
            VersionKind::IsLatest => Some(PropertyValue::Boolean(Self::is_latest(ctx, node))),
            VersionKind::IsMajor => Some(PropertyValue::Boolean(Self::is_major(ctx, node))),
            VersionKind::IsLatestMajor => Some(PropertyValue::Boolean(
                Self::is_latest(ctx, node) && Self::is_major(ctx, node),
            )),
            VersionKind::Label => Some(PropertyValue::String(version_label(ctx, node))),
            VersionKind::SeriesId => Some(PropertyValue::Id(series_node(ctx, node).to_string())),
            VersionKind::IsSeriesCheckedOut => {
                let series = series_node(ctx, node);
                Some(PropertyValue::Boolean(working_copy_of(ctx, &series).is_some()))
            }
            VersionKind::CheckedOutBy => {
                let working_copy = working_copy_of(ctx, &series_node(ctx, node))?;
                ctx.services
                    .nodes
                    .property(&working_copy, &content_model::PROP_WORKING_COPY_OWNER)
            }
            VersionKind::CheckedOutId => working_copy_of(ctx, &series_node(ctx, node))
                .map(|working_copy| PropertyValue::Id(working_copy.to_string())),
            VersionKind::CheckinComment => {
                let record = match frozen_record(ctx, node) {
                    Some((_, record)) => Some(record),
                    None if is_working_copy(ctx, node) => None,
                    None => head_record(ctx, node),
                };
                record
                    .and_then(|record| record.comment)
                    .map(PropertyValue::String)
            }
        }
    }
}

// ============================================================================
// CONTENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPart {
    Length,
    MimeType,
    StreamId,
}

/// One facet of the `cm:content` property
#[derive(Debug, Clone)]
pub struct Content {
    part: ContentPart,
}

impl Content {
    pub fn new(part: ContentPart) -> Self {
        Self { part }
    }
}

impl ValueStrategy for Content {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        let value = ctx.services.nodes.property(node, &content_model::PROP_CONTENT)?;
        let content = value.as_content()?;
        Some(match self.part {
            ContentPart::Length => PropertyValue::Integer(i64::try_from(content.size).unwrap_or(i64::MAX)),
            ContentPart::MimeType => PropertyValue::String(content.mimetype.clone()),
            ContentPart::StreamId => PropertyValue::Id(content.content_url.clone()),
        })
    }
}

// ============================================================================
// HIERARCHY
// ============================================================================

/// Primary parent of a folder; the root has none
#[derive(Debug, Clone, Default)]
pub struct ParentId;

impl ValueStrategy for ParentId {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        if !is_folder(ctx, node) || ctx.services.is_root(node) {
            return None;
        }
        let parent = ctx.services.nodes.primary_parent(node)?;
        Some(PropertyValue::Id(parent.parent.to_string()))
    }
}

/// Guard against cycles in hand-built hierarchies
const MAX_PATH_DEPTH: usize = 256;

/// Slash-separated names from the root to a folder
#[derive(Debug, Clone, Default)]
pub struct Path;

impl ValueStrategy for Path {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue> {
        if !is_folder(ctx, node) {
            return None;
        }

        let mut names = Vec::new();
        let mut current = node.clone();
        while !ctx.services.is_root(&current) {
            if names.len() >= MAX_PATH_DEPTH {
                return None;
            }
            let name = ctx
                .services
                .nodes
                .property(&current, &content_model::PROP_NAME)
                .map(|name| name.to_string())
                .unwrap_or_else(|| current.id.clone());
            names.push(name);
            current = ctx.services.nodes.primary_parent(&current)?.parent;
        }

        names.reverse();
        Some(PropertyValue::String(format!("/{}", names.join("/"))))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationEnd {
    Source,
    Target,
}

/// One end of a relationship
#[derive(Debug, Clone)]
pub struct RelationshipEnd {
    end: AssociationEnd,
}

impl RelationshipEnd {
    pub fn new(end: AssociationEnd) -> Self {
        Self { end }
    }
}

impl ValueStrategy for RelationshipEnd {
    fn node_value(&self, _ctx: &AccessorContext, _node: &NodeRef) -> Option<PropertyValue> {
        None
    }

    fn relationship_value(&self, _ctx: &AccessorContext, assoc: &AssociationRef) -> Option<PropertyValue> {
        let node = match self.end {
            AssociationEnd::Source => &assoc.source,
            AssociationEnd::Target => &assoc.target,
        };
        Some(PropertyValue::Id(node.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_object_id_of_current_and_frozen_versions() {
        let ctx = testing::accessor_context();
        assert_eq!(
            ObjectId.node_value(&ctx, &testing::report()),
            Some(PropertyValue::id(testing::report().to_string()))
        );
        assert_eq!(
            ObjectId.node_value(&ctx, &testing::frozen_v1()),
            Some(PropertyValue::id(format!("{};1.0", testing::report())))
        );
        let assoc = testing::related_assoc(&ctx);
        assert_eq!(
            ObjectId.relationship_value(&ctx, &assoc),
            Some(PropertyValue::id(format!("assoc:{}", assoc.id)))
        );
    }

    #[test]
    fn test_version_values_of_checked_out_series() {
        let ctx = testing::accessor_context();
        let label = Version::new(VersionKind::Label);
        assert_eq!(
            label.node_value(&ctx, &testing::working_copy()),
            Some(PropertyValue::string("pwc"))
        );
        assert_eq!(
            label.node_value(&ctx, &testing::plain()),
            Some(PropertyValue::string("1.0"))
        );

        let series = Version::new(VersionKind::SeriesId);
        assert_eq!(
            series.node_value(&ctx, &testing::working_copy()),
            Some(PropertyValue::id(testing::checked_out().to_string()))
        );

        let owner = Version::new(VersionKind::CheckedOutBy);
        assert_eq!(
            owner.node_value(&ctx, &testing::checked_out()),
            Some(PropertyValue::string("bob"))
        );
        let checked_out = Version::new(VersionKind::IsSeriesCheckedOut);
        assert_eq!(
            checked_out.node_value(&ctx, &testing::report()),
            Some(PropertyValue::Boolean(false))
        );
        assert_eq!(
            Version::new(VersionKind::IsLatest).node_value(&ctx, &testing::working_copy()),
            Some(PropertyValue::Boolean(false))
        );
    }

    #[test]
    fn test_version_values_from_history() {
        let ctx = testing::accessor_context();
        let major = Version::new(VersionKind::IsMajor);
        assert_eq!(major.node_value(&ctx, &testing::report()), Some(PropertyValue::Boolean(false)));
        assert_eq!(major.node_value(&ctx, &testing::frozen_v1()), Some(PropertyValue::Boolean(true)));

        let comment = Version::new(VersionKind::CheckinComment);
        assert_eq!(
            comment.node_value(&ctx, &testing::report()),
            Some(PropertyValue::string("second draft"))
        );
        // folders carry no version state
        assert_eq!(major.node_value(&ctx, &testing::projects()), None);
    }

    #[test]
    fn test_immutability() {
        let ctx = testing::accessor_context();
        assert_eq!(IsImmutable.node_value(&ctx, &testing::frozen_v1()), Some(PropertyValue::Boolean(true)));
        assert_eq!(IsImmutable.node_value(&ctx, &testing::locked()), Some(PropertyValue::Boolean(true)));
        assert_eq!(IsImmutable.node_value(&ctx, &testing::report()), Some(PropertyValue::Boolean(false)));
    }

    #[test]
    fn test_hierarchy_values() {
        let ctx = testing::accessor_context();
        assert_eq!(
            Path.node_value(&ctx, &testing::archive()),
            Some(PropertyValue::string("/Projects/Archive"))
        );
        assert_eq!(Path.node_value(&ctx, &testing::root()), Some(PropertyValue::string("/")));
        assert_eq!(Path.node_value(&ctx, &testing::report()), None);

        assert_eq!(
            ParentId.node_value(&ctx, &testing::archive()),
            Some(PropertyValue::id(testing::projects().to_string()))
        );
        assert_eq!(ParentId.node_value(&ctx, &testing::root()), None);
    }

    #[test]
    fn test_content_and_relationship_values() {
        let ctx = testing::accessor_context();
        assert_eq!(
            Content::new(ContentPart::Length).node_value(&ctx, &testing::report()),
            Some(PropertyValue::Integer(12))
        );
        assert_eq!(
            Content::new(ContentPart::MimeType).node_value(&ctx, &testing::report()),
            Some(PropertyValue::string("text/plain"))
        );
        assert_eq!(Content::new(ContentPart::Length).node_value(&ctx, &testing::projects()), None);

        let assoc = testing::related_assoc(&ctx);
        assert_eq!(
            RelationshipEnd::new(AssociationEnd::Target).relationship_value(&ctx, &assoc),
            Some(PropertyValue::id(testing::plain().to_string()))
        );
        assert_eq!(
            Name::default().relationship_value(&ctx, &assoc),
            Some(PropertyValue::String(assoc.to_string()))
        );
    }
}
