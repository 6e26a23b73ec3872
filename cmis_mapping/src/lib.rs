//! # CMIS Mapping
//!
//! Maps the native content model onto the CMIS type model: type ids,
//! property accessors that compile query predicates, and allowable-action
//! evaluation.

pub mod accessors;
pub mod errors;
pub mod evaluators;
pub mod mapping;
pub mod object;
pub mod query;
pub mod registry;
pub mod repository;

#[cfg(test)]
mod testing;

// Re-export key types for library consumers
pub use accessors::{AccessorContext, Operator, Predicate, PropertyAccessor};
pub use errors::{MappingError, MappingResult};
pub use evaluators::ActionEvaluator;
pub use mapping::{CmisMapping, PermissionFormat, TypeMapping};
pub use object::CmisObject;
pub use query::{QueryContext, QueryFragment};
pub use registry::{ActionRegistry, ActionRegistryBuilder};
pub use repository::{MemoryRepository, ServiceRegistry};
