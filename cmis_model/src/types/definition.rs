use super::scope::Scope;
use super::type_id::TypeId;
use crate::qname::QName;
use serde::{Deserialize, Serialize};

/// CMIS type definition synthesized from a native class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub type_id: TypeId,
    pub parent_id: Option<String>,
    pub base: Scope,
    pub display_name: String,
    pub description: String,
    pub creatable: bool,
    pub fileable: bool,
    pub queryable: bool,
    pub full_text_indexed: bool,
    pub included_in_supertype_query: bool,
    pub controllable_policy: bool,
    pub controllable_acl: bool,
    pub versionable: bool,
    pub content_stream_allowed: bool,
    /// Relationship types only
    pub allowed_source_types: Vec<String>,
    /// Relationship types only
    pub allowed_target_types: Vec<String>,
    pub property_ids: Vec<String>,
}

impl TypeDefinition {
    pub fn id(&self) -> &str {
        self.type_id.id()
    }
}

/// Source of type definitions for native types
pub trait TypeDefinitionSource: Send + Sync {
    fn type_definition(&self, native: &QName) -> Option<TypeDefinition>;
}
