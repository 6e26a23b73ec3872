// src/accessors/predicates.rs
//! Predicate strategies
//!
//! Each strategy turns one [`Predicate`] into a [`QueryFragment`]. The
//! accessor table decides which operators a property accepts.

use super::{Predicate, PredicateStrategy};
use crate::errors::{MappingError, MappingResult};
use crate::mapping::types::TypeMapping;
use crate::query::{canonical_string, like_to_wildcard, Clause, QueryContext, QueryFragment};
use cmis_model::config::constants::query::{FIELD_ASPECT, FIELD_EXACT_TYPE, FIELD_ID, FIELD_TYPE};
use cmis_model::config::constants::versioning::{INITIAL_LABEL, LABEL_SEPARATOR, PWC_LABEL};
use cmis_model::logging::codes;
use cmis_model::models::content_model;
use cmis_model::{log_debug, log_error, PropertyType, PropertyValue};
use std::sync::Arc;

// ============================================================================
// FIELD-BACKED
// ============================================================================

/// Comparisons on one index field holding values of one type
#[derive(Debug, Clone)]
pub struct FieldPredicate {
    field: String,
    property_type: PropertyType,
}

impl FieldPredicate {
    pub fn new(field: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            field: field.into(),
            property_type,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn term(&self, property_id: &str, value: &PropertyValue) -> MappingResult<QueryFragment> {
        let value = canonical_string(property_id, self.property_type, value)?;
        Ok(QueryFragment::term(&self.field, value))
    }

    fn range(
        &self,
        property_id: &str,
        value: &PropertyValue,
        upward: bool,
        inclusive: bool,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        let value = canonical_string(property_id, self.property_type, value)?;
        Ok(if upward {
            QueryFragment::range(
                &self.field,
                value,
                query.upper_sentinel(self.property_type),
                inclusive,
                true,
            )
        } else {
            QueryFragment::range(
                &self.field,
                query.lower_sentinel(self.property_type),
                value,
                true,
                inclusive,
            )
        })
    }
}

impl PredicateStrategy for FieldPredicate {
    fn compile(
        &self,
        property_id: &str,
        predicate: &Predicate<'_>,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        let fragment = match predicate {
            Predicate::Equals(value) => self.term(property_id, value)?,
            Predicate::NotEquals(value) => QueryFragment::does_not_match(self.term(property_id, value)?),
            Predicate::GreaterThan(value) => self.range(property_id, value, true, false, query)?,
            Predicate::GreaterThanOrEquals(value) => self.range(property_id, value, true, true, query)?,
            Predicate::LessThan(value) => self.range(property_id, value, false, false, query)?,
            Predicate::LessThanOrEquals(value) => self.range(property_id, value, false, true, query)?,
            Predicate::Exists { not: false } => QueryFragment::IsNotNull {
                field: self.field.clone(),
            },
            Predicate::Exists { not: true } => QueryFragment::IsNull {
                field: self.field.clone(),
            },
            Predicate::In { values, not } => {
                let terms = values
                    .iter()
                    .map(|value| self.term(property_id, value))
                    .collect::<MappingResult<Vec<_>>>()?;
                QueryFragment::any_of(terms, *not)
            }
            Predicate::Like { pattern, not } => {
                let wildcard = QueryFragment::wildcard(&self.field, like_to_wildcard(pattern));
                if *not {
                    QueryFragment::does_not_match(wildcard)
                } else {
                    wildcard
                }
            }
        };
        log_debug!("Compiled predicate", "property" => property_id,
            "operator" => predicate.operator(), "fragment" => &fragment);
        Ok(fragment)
    }
}

// ============================================================================
// EXISTENCE
// ============================================================================

/// Existence on a value every object carries
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPresent;

impl PredicateStrategy for AlwaysPresent {
    fn compile(
        &self,
        property_id: &str,
        predicate: &Predicate<'_>,
        _query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        match predicate {
            Predicate::Exists { not: false } => Ok(QueryFragment::MatchAll),
            Predicate::Exists { not: true } => Ok(QueryFragment::MatchNone),
            other => Err(MappingError::operator_not_supported(property_id, other.operator())),
        }
    }
}

// ============================================================================
// OBJECT IDENTITY
// ============================================================================

/// Equality on `<node-ref>[;<version-label>]`
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdPredicate;

impl ObjectIdPredicate {
    fn equals(&self, property_id: &str, value: &PropertyValue) -> MappingResult<QueryFragment> {
        let id = canonical_string(property_id, PropertyType::Id, value)?;
        let Some((node, label)) = id.split_once(LABEL_SEPARATOR) else {
            return Ok(QueryFragment::term(FIELD_ID, id));
        };

        if label.eq_ignore_ascii_case(PWC_LABEL) {
            return Ok(QueryFragment::MatchNone);
        }

        Ok(QueryFragment::Boolean(vec![
            Clause::must(QueryFragment::term(FIELD_ID, node)),
            Clause::must(Self::label_clause(label)),
        ]))
    }

    fn label_clause(label: &str) -> QueryFragment {
        let term = QueryFragment::term(crate::query::property_field(&content_model::PROP_VERSION_LABEL), label);
        if label != INITIAL_LABEL {
            return term;
        }
        // Content that was never versioned counts as its first version
        QueryFragment::Boolean(vec![
            Clause::should(term),
            Clause::should(QueryFragment::does_not_match(QueryFragment::term(
                FIELD_ASPECT,
                content_model::ASPECT_VERSIONABLE.to_string(),
            ))),
        ])
    }
}

impl PredicateStrategy for ObjectIdPredicate {
    fn compile(
        &self,
        property_id: &str,
        predicate: &Predicate<'_>,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        match predicate {
            Predicate::Equals(value) => self.equals(property_id, value),
            Predicate::NotEquals(value) => Ok(QueryFragment::does_not_match(self.equals(property_id, value)?)),
            Predicate::In { values, not } => {
                let alternatives = values
                    .iter()
                    .map(|value| self.equals(property_id, value))
                    .collect::<MappingResult<Vec<_>>>()?;
                Ok(QueryFragment::any_of(alternatives, *not))
            }
            Predicate::Exists { .. } => AlwaysPresent.compile(property_id, predicate, query),
            other => Err(MappingError::operator_not_supported(property_id, other.operator())),
        }
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// Which type field a [`TypePredicate`] targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeField {
    /// The object's own type only
    Exact,
    /// Base type ids, matched through the type hierarchy
    Base,
}

/// Comparisons of external type ids against the type fields
pub struct TypePredicate {
    field: TypeField,
    types: Arc<TypeMapping>,
}

impl TypePredicate {
    pub fn new(field: TypeField, types: Arc<TypeMapping>) -> Self {
        Self { field, types }
    }

    fn term(&self, property_id: &str, value: &PropertyValue) -> MappingResult<QueryFragment> {
        let id = canonical_string(property_id, PropertyType::Id, value)?;
        let type_id = self.types.type_id_from_external(&id)?;
        match self.field {
            TypeField::Exact => Ok(QueryFragment::term(
                FIELD_EXACT_TYPE,
                self.types.alfresco_class(type_id.qname()).to_string(),
            )),
            TypeField::Base => {
                if type_id.id() != type_id.scope().base_type_id() {
                    log_error!(codes::predicate::INVALID_PREDICATE_VALUE, "Not a base type id",
                        "property" => property_id, "value" => &id);
                    return Err(MappingError::invalid_argument(format!(
                        "'{}' is not a base type id",
                        id
                    )));
                }
                if self.types.is_remapped_type(&self.types.alfresco_class(type_id.qname())) {
                    Ok(QueryFragment::term(
                        FIELD_TYPE,
                        self.types.alfresco_class(type_id.qname()).to_string(),
                    ))
                } else {
                    // Only documents and folders are indexed by base type
                    Ok(QueryFragment::MatchNone)
                }
            }
        }
    }
}

impl PredicateStrategy for TypePredicate {
    fn compile(
        &self,
        property_id: &str,
        predicate: &Predicate<'_>,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        match predicate {
            Predicate::Equals(value) => self.term(property_id, value),
            Predicate::NotEquals(value) => Ok(QueryFragment::does_not_match(self.term(property_id, value)?)),
            Predicate::In { values, not } => {
                let terms = values
                    .iter()
                    .map(|value| self.term(property_id, value))
                    .collect::<MappingResult<Vec<_>>>()?;
                Ok(QueryFragment::any_of(terms, *not))
            }
            Predicate::Exists { .. } => AlwaysPresent.compile(property_id, predicate, query),
            other => Err(MappingError::operator_not_supported(property_id, other.operator())),
        }
    }
}

impl std::fmt::Debug for TypePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypePredicate").field("field", &self.field).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Occur;
    use crate::testing;
    use assert_matches::assert_matches;

    fn name_field() -> FieldPredicate {
        FieldPredicate::new("@name", PropertyType::String)
    }

    #[test]
    fn test_in_with_no_values() {
        let ctx = QueryContext::default();
        let field = name_field();
        let in_not = field.compile("p", &Predicate::In { values: &[], not: true }, &ctx).unwrap();
        assert_eq!(in_not, QueryFragment::MatchAll);
        let in_plain = field.compile("p", &Predicate::In { values: &[], not: false }, &ctx).unwrap();
        assert_eq!(in_plain, QueryFragment::MatchNone);
    }

    #[test]
    fn test_in_with_three_values_is_disjunction() {
        let ctx = QueryContext::default();
        let values = vec![
            PropertyValue::string("a"),
            PropertyValue::string("b"),
            PropertyValue::string("c"),
        ];
        let fragment = name_field()
            .compile("p", &Predicate::In { values: &values, not: false }, &ctx)
            .unwrap();
        let clauses = fragment.clauses();
        assert_eq!(clauses.len(), 3);
        assert!(clauses.iter().all(|c| c.occur == Occur::Should));
        assert!(clauses
            .iter()
            .all(|c| matches!(c.query, QueryFragment::Term { .. })));
    }

    #[test]
    fn test_in_rejects_mismatched_values() {
        let ctx = QueryContext::default();
        let values = vec![PropertyValue::Integer(1), PropertyValue::string("x")];
        let field = FieldPredicate::new("@score", PropertyType::Integer);
        assert_matches!(
            field.compile("p", &Predicate::In { values: &values, not: false }, &ctx),
            Err(MappingError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_ranges_use_sentinels() {
        let ctx = QueryContext::default();
        let score = FieldPredicate::new("@score", PropertyType::Integer);
        let value = PropertyValue::Integer(5);
        assert_eq!(
            score.compile("p", &Predicate::GreaterThan(&value), &ctx).unwrap(),
            QueryFragment::range("@score", "5", "MAX", false, true)
        );
        assert_eq!(
            score.compile("p", &Predicate::LessThanOrEquals(&value), &ctx).unwrap(),
            QueryFragment::range("@score", "MIN", "5", true, true)
        );

        let text = PropertyValue::string("m");
        assert_eq!(
            name_field().compile("p", &Predicate::LessThan(&text), &ctx).unwrap(),
            QueryFragment::range("@name", "\u{0}", "m", true, false)
        );
        assert_eq!(
            name_field().compile("p", &Predicate::GreaterThanOrEquals(&text), &ctx).unwrap(),
            QueryFragment::range("@name", "m", "\u{FFFF}", true, true)
        );
    }

    #[test]
    fn test_equality_like_and_existence() {
        let ctx = QueryContext::default();
        let field = name_field();
        let value = PropertyValue::string("q1");
        assert_eq!(
            field.compile("p", &Predicate::NotEquals(&value), &ctx).unwrap(),
            QueryFragment::does_not_match(QueryFragment::term("@name", "q1"))
        );
        assert_eq!(
            field.compile("p", &Predicate::Like { pattern: "q%", not: false }, &ctx).unwrap(),
            QueryFragment::wildcard("@name", "q*")
        );
        assert_eq!(
            field.compile("p", &Predicate::Like { pattern: "q_", not: true }, &ctx).unwrap(),
            QueryFragment::does_not_match(QueryFragment::wildcard("@name", "q?"))
        );
        assert_eq!(
            field.compile("p", &Predicate::Exists { not: true }, &ctx).unwrap(),
            QueryFragment::IsNull { field: "@name".to_string() }
        );
    }

    #[test]
    fn test_object_id_branches() {
        let ctx = QueryContext::default();
        let plain = PropertyValue::id("workspace://SpacesStore/a");
        assert_eq!(
            ObjectIdPredicate.compile("id", &Predicate::Equals(&plain), &ctx).unwrap(),
            QueryFragment::term(FIELD_ID, "workspace://SpacesStore/a")
        );

        let pwc = PropertyValue::id("workspace://SpacesStore/a;PWC");
        assert_eq!(
            ObjectIdPredicate.compile("id", &Predicate::Equals(&pwc), &ctx).unwrap(),
            QueryFragment::MatchNone
        );

        let labelled = PropertyValue::id("workspace://SpacesStore/a;1.3");
        let fragment = ObjectIdPredicate.compile("id", &Predicate::Equals(&labelled), &ctx).unwrap();
        let clauses = fragment.clauses();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0], Clause::must(QueryFragment::term(FIELD_ID, "workspace://SpacesStore/a")));
        assert_matches!(&clauses[1].query, QueryFragment::Term { value, .. } if value == "1.3");

        let first = PropertyValue::id("workspace://SpacesStore/a;1.0");
        let fragment = ObjectIdPredicate.compile("id", &Predicate::Equals(&first), &ctx).unwrap();
        let label = &fragment.clauses()[1].query;
        assert_eq!(label.clauses().len(), 2);
        assert_eq!(
            label.clauses()[1].query,
            QueryFragment::does_not_match(QueryFragment::term(
                FIELD_ASPECT,
                content_model::ASPECT_VERSIONABLE.to_string()
            ))
        );
    }

    #[test]
    fn test_object_id_rejects_ranges() {
        let ctx = QueryContext::default();
        let value = PropertyValue::id("x");
        assert_matches!(
            ObjectIdPredicate.compile("cmis:objectId", &Predicate::GreaterThan(&value), &ctx),
            Err(MappingError::OperatorNotSupported { .. })
        );
        assert_eq!(
            ObjectIdPredicate.compile("cmis:objectId", &Predicate::Exists { not: false }, &ctx).unwrap(),
            QueryFragment::MatchAll
        );
    }

    #[test]
    fn test_type_predicates() {
        let ctx = QueryContext::default();
        let types = Arc::new(testing::type_mapping());

        let exact = TypePredicate::new(TypeField::Exact, Arc::clone(&types));
        let report = PropertyValue::id("D:acme:report");
        assert_eq!(
            exact.compile("t", &Predicate::Equals(&report), &ctx).unwrap(),
            QueryFragment::term(FIELD_EXACT_TYPE, testing::REPORT_TYPE.to_string())
        );
        let document = PropertyValue::id("cmis:document");
        assert_eq!(
            exact.compile("t", &Predicate::Equals(&document), &ctx).unwrap(),
            QueryFragment::term(FIELD_EXACT_TYPE, content_model::TYPE_CONTENT.to_string())
        );

        let base = TypePredicate::new(TypeField::Base, types);
        let folder = PropertyValue::id("cmis:folder");
        assert_eq!(
            base.compile("b", &Predicate::Equals(&folder), &ctx).unwrap(),
            QueryFragment::term(FIELD_TYPE, content_model::TYPE_FOLDER.to_string())
        );
        let policy = PropertyValue::id("cmis:policy");
        assert_eq!(
            base.compile("b", &Predicate::Equals(&policy), &ctx).unwrap(),
            QueryFragment::MatchNone
        );
        assert_matches!(
            base.compile("b", &Predicate::Equals(&report), &ctx),
            Err(MappingError::InvalidArgument { .. })
        );
    }
}
