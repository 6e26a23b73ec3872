// src/query/mod.rs
//! Query-fragment algebra and the helpers predicate compilers share

pub mod context;
pub mod fragment;
pub mod like;
pub mod values;

pub use context::QueryContext;
pub use fragment::{Clause, Occur, QueryFragment};
pub use like::like_to_wildcard;
pub use values::{canonical_string, format_datetime, parse_value};

use cmis_model::config::constants::query::PROPERTY_FIELD_PREFIX;
use cmis_model::QName;

/// Index field of a native property
pub fn property_field(property: &QName) -> String {
    format!("{}{}", PROPERTY_FIELD_PREFIX, property)
}

/// Index field of one facet of a content property (`size`, `mimetype`)
pub fn content_field(property: &QName, facet: &str) -> String {
    format!("{}.{}", property_field(property), facet)
}
