// src/accessors/builtin.rs
//! Accessors registered at initialization and the direct fallback

use super::predicates::{AlwaysPresent, FieldPredicate, ObjectIdPredicate, TypeField, TypePredicate};
use super::values::{
    AssociationEnd, BaseTypeId, Content, ContentPart, Direct, Fixed, IsImmutable, Name,
    NodeRefValue, ObjectId, ObjectTypeId, ParentId, Path, RelationshipEnd, Version, VersionKind,
};
use super::{AccessorContext, Operator, PropertyAccessor, SortSpec, ValueStrategy};
use crate::query::{content_field, property_field};
use cmis_model::config::constants::query::{FIELD_EXACT_TYPE, FIELD_ID, FIELD_PARENT};
use cmis_model::models::{content_model, data_types, property_ids};
use cmis_model::{
    Cardinality, CmisPropertyDefinition, PropertyDefinition, PropertyType, QName, Updatability,
};
use std::sync::Arc;

const COMPARISONS: [Operator; 8] = [
    Operator::Equals,
    Operator::NotEquals,
    Operator::GreaterThan,
    Operator::GreaterThanOrEquals,
    Operator::LessThan,
    Operator::LessThanOrEquals,
    Operator::Exists,
    Operator::In,
];

const IDENTITY: [Operator; 4] = [
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::Exists,
];

// ============================================================================
// CONSTRUCTORS
// ============================================================================

fn computed(
    id: &str,
    property_type: PropertyType,
    value: impl ValueStrategy + 'static,
    ctx: &Arc<AccessorContext>,
) -> PropertyAccessor {
    PropertyAccessor::new(
        CmisPropertyDefinition::new(id, property_type),
        Box::new(value),
        Arc::clone(ctx),
    )
}

/// Field predicates for every comparison, LIKE on text
fn with_field(accessor: PropertyAccessor, field: &str, property_type: PropertyType) -> PropertyAccessor {
    let predicate = Arc::new(FieldPredicate::new(field, property_type));
    let accessor = accessor.with_predicates(&COMPARISONS, predicate.clone());
    if property_type.is_text() {
        accessor.with_predicate(Operator::Like, predicate)
    } else {
        accessor
    }
}

fn sort_for(field: &str, property_type: PropertyType) -> SortSpec {
    if property_type == PropertyType::String {
        SortSpec::TextField(field.to_string())
    } else {
        SortSpec::Field(field.to_string())
    }
}

/// 1:1 accessor on a native property with the given CMIS type
fn mapped(
    id: &str,
    property: QName,
    property_type: PropertyType,
    updatability: Updatability,
    ctx: &Arc<AccessorContext>,
) -> PropertyAccessor {
    let field = property_field(&property);
    let definition = CmisPropertyDefinition::new(id, property_type)
        .mapped_to(property.clone())
        .with_updatability(updatability);
    let accessor = PropertyAccessor::new(definition, Box::new(Direct::new(property)), Arc::clone(ctx));
    with_field(accessor, &field, property_type).with_sort(sort_for(&field, property_type))
}

/// Accessor synthesized for a native property without specialized behaviour
pub fn direct_accessor(
    property_id: &str,
    native: &PropertyDefinition,
    ctx: &Arc<AccessorContext>,
) -> PropertyAccessor {
    let field = property_field(&native.name);
    let known_type = ctx.types.property_type(&native.data_type);
    let property_type = known_type.unwrap_or(PropertyType::String);

    let mut definition = CmisPropertyDefinition::new(property_id, property_type)
        .mapped_to(native.name.clone())
        .with_updatability(if native.protected {
            Updatability::ReadOnly
        } else {
            Updatability::ReadWrite
        });
    if native.multi_valued {
        definition = definition.with_cardinality(Cardinality::Multi);
    }

    let sortable = known_type.is_some() && native.data_type != data_types::CONTENT;
    if !sortable {
        definition = definition.unorderable();
    }

    let accessor = PropertyAccessor::new(
        definition,
        Box::new(Direct::new(native.name.clone())),
        Arc::clone(ctx),
    );
    let accessor = with_field(accessor, &field, property_type);
    if sortable {
        accessor.with_sort(sort_for(&field, property_type))
    } else {
        accessor.with_sort(SortSpec::Unsortable)
    }
}

// ============================================================================
// BUILT-IN TABLE
// ============================================================================

/// Every accessor with specialized behaviour, in registration order
pub fn builtin_accessors(ctx: &Arc<AccessorContext>) -> Vec<PropertyAccessor> {
    let mut accessors = Vec::new();

    // Identity and type
    accessors.push(
        computed(property_ids::OBJECT_ID, PropertyType::Id, ObjectId, ctx)
            .with_predicates(&IDENTITY, Arc::new(ObjectIdPredicate))
            .with_sort(SortSpec::Field(FIELD_ID.to_string())),
    );
    accessors.push(
        computed(property_ids::NODE_REF, PropertyType::Id, NodeRefValue, ctx)
            .with_predicates(
                &[Operator::Equals, Operator::NotEquals, Operator::In],
                Arc::new(FieldPredicate::new(FIELD_ID, PropertyType::Id)),
            )
            .with_predicate(Operator::Exists, Arc::new(AlwaysPresent))
            .with_sort(SortSpec::Field(FIELD_ID.to_string())),
    );
    accessors.push(
        computed(property_ids::OBJECT_TYPE_ID, PropertyType::Id, ObjectTypeId, ctx)
            .with_predicates(
                &IDENTITY,
                Arc::new(TypePredicate::new(TypeField::Exact, Arc::clone(&ctx.types))),
            )
            .with_sort(SortSpec::Field(FIELD_EXACT_TYPE.to_string())),
    );
    accessors.push(
        computed(property_ids::BASE_TYPE_ID, PropertyType::Id, BaseTypeId, ctx).with_predicates(
            &IDENTITY,
            Arc::new(TypePredicate::new(TypeField::Base, Arc::clone(&ctx.types))),
        ),
    );

    // Audit
    for (id, property, property_type) in [
        (property_ids::CREATED_BY, content_model::PROP_CREATOR, PropertyType::String),
        (property_ids::CREATION_DATE, content_model::PROP_CREATED, PropertyType::DateTime),
        (property_ids::LAST_MODIFIED_BY, content_model::PROP_MODIFIER, PropertyType::String),
        (property_ids::LAST_MODIFICATION_DATE, content_model::PROP_MODIFIED, PropertyType::DateTime),
    ] {
        accessors.push(mapped(id, property, property_type, Updatability::ReadOnly, ctx));
    }

    let name_field = property_field(&content_model::PROP_NAME);
    let name = PropertyAccessor::new(
        CmisPropertyDefinition::new(property_ids::NAME, PropertyType::String)
            .mapped_to(content_model::PROP_NAME)
            .with_updatability(Updatability::ReadWrite),
        Box::new(Name::default()),
        Arc::clone(ctx),
    );
    accessors.push(
        with_field(name, &name_field, PropertyType::String)
            .with_sort(SortSpec::TextField(name_field.clone())),
    );

    accessors.push(computed(property_ids::CHANGE_TOKEN, PropertyType::String, Fixed, ctx));
    accessors.push(computed(property_ids::IS_IMMUTABLE, PropertyType::Boolean, IsImmutable, ctx));

    // Versioning
    for (id, property_type, kind) in [
        (property_ids::IS_LATEST_VERSION, PropertyType::Boolean, VersionKind::IsLatest),
        (property_ids::IS_MAJOR_VERSION, PropertyType::Boolean, VersionKind::IsMajor),
        (property_ids::IS_LATEST_MAJOR_VERSION, PropertyType::Boolean, VersionKind::IsLatestMajor),
        (property_ids::VERSION_LABEL, PropertyType::String, VersionKind::Label),
        (property_ids::VERSION_SERIES_ID, PropertyType::Id, VersionKind::SeriesId),
        (property_ids::IS_VERSION_SERIES_CHECKED_OUT, PropertyType::Boolean, VersionKind::IsSeriesCheckedOut),
        (property_ids::VERSION_SERIES_CHECKED_OUT_BY, PropertyType::String, VersionKind::CheckedOutBy),
        (property_ids::VERSION_SERIES_CHECKED_OUT_ID, PropertyType::Id, VersionKind::CheckedOutId),
        (property_ids::CHECKIN_COMMENT, PropertyType::String, VersionKind::CheckinComment),
    ] {
        accessors.push(computed(id, property_type, Version::new(kind), ctx));
    }

    // Content
    let size_field = content_field(&content_model::PROP_CONTENT, "size");
    accessors.push(
        with_field(
            computed(property_ids::CONTENT_STREAM_LENGTH, PropertyType::Integer, Content::new(ContentPart::Length), ctx),
            &size_field,
            PropertyType::Integer,
        )
        .with_sort(SortSpec::Field(size_field.clone())),
    );
    let mimetype_field = content_field(&content_model::PROP_CONTENT, "mimetype");
    accessors.push(
        with_field(
            computed(property_ids::CONTENT_STREAM_MIME_TYPE, PropertyType::String, Content::new(ContentPart::MimeType), ctx),
            &mimetype_field,
            PropertyType::String,
        )
        .with_sort(SortSpec::Field(mimetype_field.clone())),
    );
    accessors.push(computed(
        property_ids::CONTENT_STREAM_ID,
        PropertyType::Id,
        Content::new(ContentPart::StreamId),
        ctx,
    ));
    accessors.push(mapped(
        property_ids::CONTENT_STREAM_FILE_NAME,
        content_model::PROP_NAME,
        PropertyType::String,
        Updatability::ReadOnly,
        ctx,
    ));

    // Hierarchy
    accessors.push(computed(property_ids::PARENT_ID, PropertyType::Id, ParentId, ctx).with_predicates(
        &[Operator::Equals, Operator::NotEquals, Operator::In, Operator::Exists],
        Arc::new(FieldPredicate::new(FIELD_PARENT, PropertyType::Id)),
    ));
    accessors.push(computed(property_ids::PATH, PropertyType::String, Path, ctx));
    accessors.push(PropertyAccessor::new(
        CmisPropertyDefinition::new(property_ids::ALLOWED_CHILD_OBJECT_TYPE_IDS, PropertyType::Id)
            .with_cardinality(Cardinality::Multi),
        Box::new(Fixed),
        Arc::clone(ctx),
    ));

    // Relationships
    accessors.push(computed(
        property_ids::SOURCE_ID,
        PropertyType::Id,
        RelationshipEnd::new(AssociationEnd::Source),
        ctx,
    ));
    accessors.push(computed(
        property_ids::TARGET_ID,
        PropertyType::Id,
        RelationshipEnd::new(AssociationEnd::Target),
        ctx,
    ));

    accessors
}
