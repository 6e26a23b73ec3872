//! CMIS type model: scopes, type ids, property definitions and values,
//! allowable actions and synthesized type definitions

mod action;
mod definition;
mod property;
mod scope;
mod type_id;

pub use action::Action;
pub use definition::{TypeDefinition, TypeDefinitionSource};
pub use property::{Cardinality, CmisPropertyDefinition, PropertyType, PropertyValue, Updatability};
pub use scope::Scope;
pub use type_id::TypeId;
