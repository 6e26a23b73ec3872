use crate::node::{ContentData, NodeRef};
use crate::qname::QName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// CMIS property data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    Id,
    Integer,
    DateTime,
    Decimal,
    Html,
    String,
    Uri,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Boolean => "boolean",
            PropertyType::Id => "id",
            PropertyType::Integer => "integer",
            PropertyType::DateTime => "datetime",
            PropertyType::Decimal => "decimal",
            PropertyType::Html => "html",
            PropertyType::String => "string",
            PropertyType::Uri => "uri",
        }
    }

    /// Types ordered numerically rather than lexically
    pub fn is_numeric_or_date(&self) -> bool {
        matches!(
            self,
            PropertyType::Integer | PropertyType::Decimal | PropertyType::DateTime
        )
    }

    /// Types stored in text fields with localized sort variants
    pub fn is_text(&self) -> bool {
        matches!(self, PropertyType::String | PropertyType::Html)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    Multi,
}

/// When a property may be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Updatability {
    ReadOnly,
    ReadWrite,
    /// Read-write only on a private working copy
    WhenCheckedOut,
}

/// External property definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmisPropertyDefinition {
    /// External property id, e.g. `cmis:name`
    pub id: String,
    /// Backing native property; `None` when the value is computed
    pub mapped: Option<QName>,
    pub property_type: PropertyType,
    pub cardinality: Cardinality,
    pub max_length: Option<usize>,
    pub updatability: Updatability,
    pub queryable: bool,
    pub orderable: bool,
}

impl CmisPropertyDefinition {
    pub fn new(id: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: id.into(),
            mapped: None,
            property_type,
            cardinality: Cardinality::Single,
            max_length: None,
            updatability: Updatability::ReadOnly,
            queryable: true,
            orderable: true,
        }
    }

    pub fn mapped_to(mut self, qname: QName) -> Self {
        self.mapped = Some(qname);
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        if cardinality == Cardinality::Multi {
            self.orderable = false;
        }
        self
    }

    pub fn with_updatability(mut self, updatability: Updatability) -> Self {
        self.updatability = updatability;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn unorderable(mut self) -> Self {
        self.orderable = false;
        self
    }

    pub fn is_multi_valued(&self) -> bool {
        self.cardinality == Cardinality::Multi
    }
}

/// Property value read from or written to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Id(String),
    Uri(String),
    Html(String),
    NodeRef(NodeRef),
    QName(QName),
    Content(ContentData),
    Multi(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn string(value: impl Into<String>) -> Self {
        PropertyValue::String(value.into())
    }

    pub fn id(value: impl Into<String>) -> Self {
        PropertyValue::Id(value.into())
    }

    /// Text content of string-like values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s)
            | PropertyValue::Id(s)
            | PropertyValue::Uri(s)
            | PropertyValue::Html(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentData> {
        match self {
            PropertyValue::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_node_ref(&self) -> Option<&NodeRef> {
        match self {
            PropertyValue::NodeRef(node) => Some(node),
            _ => None,
        }
    }

    /// Individual values: the elements of a multi value, otherwise itself
    pub fn values(&self) -> Vec<&PropertyValue> {
        match self {
            PropertyValue::Multi(values) => values.iter().collect(),
            single => vec![single],
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s)
            | PropertyValue::Id(s)
            | PropertyValue::Uri(s)
            | PropertyValue::Html(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Decimal(d) => write!(f, "{}", d),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::DateTime(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            }
            PropertyValue::NodeRef(node) => write!(f, "{}", node),
            PropertyValue::QName(qname) => write!(f, "{}", qname),
            PropertyValue::Content(content) => write!(f, "{}", content.content_url),
            PropertyValue::Multi(values) => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(value)
    }
}
