// Internal modules
pub mod config;
pub mod dictionary;
pub mod error;
#[macro_use]
pub mod logging;
pub mod models;
pub mod node;
pub mod qname;
pub mod qname_cache;
pub mod types;

// Re-export key types for library consumers
pub use dictionary::{
    AssociationDefinition, ClassDefinition, DictionaryService, ModelDictionary,
    PropertyDefinition,
};
pub use config::MappingPreferences;
pub use error::ModelError;
pub use node::{AssociationRef, ChildAssociationRef, ContentData, NodeRef, StoreRef};
pub use qname::{NamespacePrefixResolver, NamespaceRegistry, QName};
pub use qname_cache::{CacheStatistics, QNameCache};
pub use types::{
    Action, Cardinality, CmisPropertyDefinition, PropertyType, PropertyValue, Scope,
    TypeDefinition, TypeDefinitionSource, TypeId, Updatability,
};
