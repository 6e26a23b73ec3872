// src/error.rs
//! Error types for the model crate

use crate::types::Scope;

/// Errors raised while parsing names, type ids and configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Malformed qualified name '{value}': {reason}")]
    MalformedQName { value: String, reason: String },

    #[error("Namespace prefix '{prefix}' is not registered")]
    UnknownPrefix { prefix: String },

    #[error("Namespace '{uri}' has no registered prefix")]
    UnmappedNamespace { uri: String },

    #[error("Malformed type id '{type_id}'")]
    MalformedTypeId { type_id: String },

    #[error("Malformed type id '{type_id}'; discriminator {discriminator} unknown")]
    UnknownDiscriminator { type_id: String, discriminator: char },

    #[error("Scope {scope:?} has no type id discriminator")]
    InvalidBaseType { scope: Scope },

    #[error("Malformed node reference '{value}'")]
    MalformedNodeRef { value: String },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

impl ModelError {
    /// Create a malformed-qname error
    pub fn malformed_qname(value: &str, reason: &str) -> Self {
        Self::MalformedQName {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
