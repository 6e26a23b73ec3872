// src/accessors/mod.rs
//! Property accessors
//!
//! One [`PropertyAccessor`] per external property id. An accessor is a
//! composition of a [`ValueStrategy`] (how values are read and written), a
//! table of [`PredicateStrategy`] objects keyed by [`Operator`] (how
//! predicates compile to query fragments) and a [`SortSpec`].

pub mod builtin;
pub mod predicates;
pub mod values;

pub use builtin::{builtin_accessors, direct_accessor};

use crate::errors::{MappingError, MappingResult};
use crate::mapping::types::TypeMapping;
use crate::object::CmisObject;
use crate::query::{QueryContext, QueryFragment};
use crate::repository::ServiceRegistry;
use cmis_model::logging::codes;
use cmis_model::{
    log_error, AssociationRef, CmisPropertyDefinition, NodeRef, PropertyValue, QName,
    Updatability,
};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Services and tables accessors read through
#[derive(Debug, Clone)]
pub struct AccessorContext {
    pub services: ServiceRegistry,
    pub types: Arc<TypeMapping>,
}

impl AccessorContext {
    pub fn new(services: ServiceRegistry, types: Arc<TypeMapping>) -> Self {
        Self { services, types }
    }
}

// ============================================================================
// OPERATORS AND PREDICATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
    Exists,
    In,
    Like,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::GreaterThanOrEquals,
        Operator::LessThan,
        Operator::LessThanOrEquals,
        Operator::Exists,
        Operator::In,
        Operator::Like,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEquals => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEquals => "<=",
            Operator::Exists => "EXISTS",
            Operator::In => "IN",
            Operator::Like => "LIKE",
        }
    }

    /// Parse an operator symbol or keyword, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.to_ascii_uppercase();
        match value.as_str() {
            "=" | "EQ" => Some(Operator::Equals),
            "<>" | "!=" | "NE" => Some(Operator::NotEquals),
            ">" | "GT" => Some(Operator::GreaterThan),
            ">=" | "GE" => Some(Operator::GreaterThanOrEquals),
            "<" | "LT" => Some(Operator::LessThan),
            "<=" | "LE" => Some(Operator::LessThanOrEquals),
            "EXISTS" => Some(Operator::Exists),
            "IN" => Some(Operator::In),
            "LIKE" => Some(Operator::Like),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comparison with its operands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate<'a> {
    Equals(&'a PropertyValue),
    NotEquals(&'a PropertyValue),
    GreaterThan(&'a PropertyValue),
    GreaterThanOrEquals(&'a PropertyValue),
    LessThan(&'a PropertyValue),
    LessThanOrEquals(&'a PropertyValue),
    Exists { not: bool },
    In { values: &'a [PropertyValue], not: bool },
    Like { pattern: &'a str, not: bool },
}

impl Predicate<'_> {
    pub fn operator(&self) -> Operator {
        match self {
            Predicate::Equals(_) => Operator::Equals,
            Predicate::NotEquals(_) => Operator::NotEquals,
            Predicate::GreaterThan(_) => Operator::GreaterThan,
            Predicate::GreaterThanOrEquals(_) => Operator::GreaterThanOrEquals,
            Predicate::LessThan(_) => Operator::LessThan,
            Predicate::LessThanOrEquals(_) => Operator::LessThanOrEquals,
            Predicate::Exists { .. } => Operator::Exists,
            Predicate::In { .. } => Operator::In,
            Predicate::Like { .. } => Operator::Like,
        }
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// How an accessor reads and writes values
pub trait ValueStrategy: Send + Sync {
    fn node_value(&self, ctx: &AccessorContext, node: &NodeRef) -> Option<PropertyValue>;

    /// Value on a relationship; unsupported by default
    fn relationship_value(
        &self,
        _ctx: &AccessorContext,
        _assoc: &AssociationRef,
    ) -> Option<PropertyValue> {
        None
    }

    /// Native property written by `set_value`, `None` when computed
    fn mapped_property(&self) -> Option<&QName> {
        None
    }
}

/// How one operator compiles into a query fragment
pub trait PredicateStrategy: Send + Sync {
    fn compile(
        &self,
        property_id: &str,
        predicate: &Predicate<'_>,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment>;
}

/// Ordering behaviour of an accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortSpec {
    /// Sort on a field as is
    Field(String),
    /// Sort on the best localized variant of a text field
    TextField(String),
    Unsortable,
}

// ============================================================================
// PROPERTY ACCESSOR
// ============================================================================

pub struct PropertyAccessor {
    definition: CmisPropertyDefinition,
    value: Box<dyn ValueStrategy>,
    predicates: IndexMap<Operator, Arc<dyn PredicateStrategy>>,
    sort: SortSpec,
    context: Arc<AccessorContext>,
}

impl PropertyAccessor {
    pub fn new(
        mut definition: CmisPropertyDefinition,
        value: Box<dyn ValueStrategy>,
        context: Arc<AccessorContext>,
    ) -> Self {
        definition.orderable = false;
        Self {
            definition,
            value,
            predicates: IndexMap::new(),
            sort: SortSpec::Unsortable,
            context,
        }
    }

    /// Compile `operator` with `strategy`, replacing any earlier entry
    pub fn with_predicate(mut self, operator: Operator, strategy: Arc<dyn PredicateStrategy>) -> Self {
        self.predicates.insert(operator, strategy);
        self
    }

    /// Compile each of `operators` with the same strategy
    pub fn with_predicates(
        mut self,
        operators: &[Operator],
        strategy: Arc<dyn PredicateStrategy>,
    ) -> Self {
        for operator in operators {
            self.predicates.insert(*operator, Arc::clone(&strategy));
        }
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.definition.orderable = sort != SortSpec::Unsortable;
        self.sort = sort;
        self
    }

    pub fn property_id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &CmisPropertyDefinition {
        &self.definition
    }

    /// Native property, `None` when the value is computed or read-only
    pub fn mapped_property(&self) -> Option<&QName> {
        if self.definition.updatability == Updatability::ReadOnly {
            return None;
        }
        self.value.mapped_property()
    }

    pub fn supported_operators(&self) -> Vec<Operator> {
        self.predicates.keys().copied().collect()
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    pub fn node_value(&self, node: &NodeRef) -> Option<PropertyValue> {
        self.value.node_value(&self.context, node)
    }

    pub fn relationship_value(&self, assoc: &AssociationRef) -> Option<PropertyValue> {
        self.value.relationship_value(&self.context, assoc)
    }

    pub fn value(&self, object: &CmisObject) -> Option<PropertyValue> {
        match object {
            CmisObject::Node(node) => self.node_value(node),
            CmisObject::Relationship(assoc) => self.relationship_value(assoc),
            CmisObject::Other => None,
        }
    }

    pub fn set_value(&self, node: &NodeRef, value: PropertyValue) -> MappingResult<()> {
        let Some(property) = self.mapped_property() else {
            log_error!(codes::property::READ_ONLY_PROPERTY, "Cannot set read-only property",
                "property" => self.property_id(), "node" => node);
            return Err(MappingError::ReadOnlyProperty {
                property: self.property_id().to_string(),
            });
        };
        self.context.services.nodes.set_property(node, property, value)
    }

    // ------------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------------

    pub fn compile(&self, predicate: &Predicate<'_>, query: &QueryContext) -> MappingResult<QueryFragment> {
        let operator = predicate.operator();
        let Some(strategy) = self.predicates.get(&operator) else {
            log_error!(codes::predicate::OPERATOR_NOT_SUPPORTED, "Operator not supported",
                "property" => self.property_id(), "operator" => operator);
            return Err(MappingError::operator_not_supported(self.property_id(), operator));
        };
        strategy.compile(self.property_id(), predicate, query)
    }

    pub fn equals(&self, value: &PropertyValue, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::Equals(value), query)
    }

    pub fn not_equals(&self, value: &PropertyValue, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::NotEquals(value), query)
    }

    pub fn greater_than(&self, value: &PropertyValue, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::GreaterThan(value), query)
    }

    pub fn greater_than_or_equals(
        &self,
        value: &PropertyValue,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::GreaterThanOrEquals(value), query)
    }

    pub fn less_than(&self, value: &PropertyValue, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::LessThan(value), query)
    }

    pub fn less_than_or_equals(
        &self,
        value: &PropertyValue,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::LessThanOrEquals(value), query)
    }

    pub fn exists(&self, not: bool, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::Exists { not }, query)
    }

    pub fn in_values(
        &self,
        values: &[PropertyValue],
        not: bool,
        query: &QueryContext,
    ) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::In { values, not }, query)
    }

    pub fn like(&self, pattern: &str, not: bool, query: &QueryContext) -> MappingResult<QueryFragment> {
        self.compile(&Predicate::Like { pattern, not }, query)
    }

    /// Index field to order results by
    pub fn sort_field(&self, query: &QueryContext) -> MappingResult<String> {
        match &self.sort {
            SortSpec::Field(field) => Ok(field.clone()),
            SortSpec::TextField(field) => Ok(query.text_sort_field(field)),
            SortSpec::Unsortable => {
                log_error!(codes::predicate::UNSORTABLE_PROPERTY, "Property cannot be ordered",
                    "property" => self.property_id());
                Err(MappingError::invalid_argument(format!(
                    "property '{}' cannot be ordered",
                    self.property_id()
                )))
            }
        }
    }
}

impl fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("id", &self.definition.id)
            .field("operators", &self.supported_operators())
            .field("sort", &self.sort)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parsing() {
        assert_eq!(Operator::parse("like"), Some(Operator::Like));
        assert_eq!(Operator::parse(">="), Some(Operator::GreaterThanOrEquals));
        assert_eq!(Operator::parse("!="), Some(Operator::NotEquals));
        assert_eq!(Operator::parse("between"), None);
        for operator in Operator::ALL {
            assert_eq!(Operator::parse(operator.as_str()), Some(operator));
        }
    }

    #[test]
    fn test_predicate_operator() {
        let value = PropertyValue::string("x");
        assert_eq!(Predicate::Equals(&value).operator(), Operator::Equals);
        assert_eq!(Predicate::In { values: &[], not: true }.operator(), Operator::In);
        assert_eq!(
            Predicate::Like { pattern: "a%", not: false }.operator(),
            Operator::Like
        );
    }
}
