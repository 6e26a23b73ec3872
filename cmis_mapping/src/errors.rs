// src/errors.rs
//! Error types for the mapping service, accessors and action registry

use cmis_model::{Action, ModelError, Scope};

/// Errors raised while resolving types and properties, compiling predicates
/// or building registries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Operator '{operator}' not supported by property '{property}'")]
    OperatorNotSupported { property: String, operator: String },

    #[error("Evaluator for action '{action}' already registered in scope '{scope}'")]
    DuplicateEvaluator { scope: Scope, action: Action },

    #[error("Accessor for property '{property}' already registered")]
    DuplicateAccessor { property: String },

    #[error("Property '{property}' is read-only")]
    ReadOnlyProperty { property: String },

    #[error("Repository failure: {reason}")]
    Repository { reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl MappingError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn repository(reason: impl Into<String>) -> Self {
        Self::Repository {
            reason: reason.into(),
        }
    }

    pub fn operator_not_supported(property: &str, operator: impl std::fmt::Display) -> Self {
        Self::OperatorNotSupported {
            property: property.to_string(),
            operator: operator.to_string(),
        }
    }

    /// Stable logging code for this error
    pub fn code(&self) -> cmis_model::logging::Code {
        use cmis_model::logging::codes;
        match self {
            Self::InvalidArgument { .. } => codes::property::UNKNOWN_PROPERTY,
            Self::OperatorNotSupported { .. } => codes::predicate::OPERATOR_NOT_SUPPORTED,
            Self::DuplicateEvaluator { .. } => codes::registry::DUPLICATE_EVALUATOR,
            Self::DuplicateAccessor { .. } => codes::registry::DUPLICATE_ACCESSOR,
            Self::ReadOnlyProperty { .. } => codes::property::READ_ONLY_PROPERTY,
            Self::Repository { .. } => codes::repository::REPOSITORY_FAILURE,
            Self::Model(ModelError::Configuration { .. }) => {
                codes::configuration::INVALID_CONFIGURATION
            }
            Self::Model(ModelError::MalformedTypeId { .. }) => codes::type_mapping::MALFORMED_TYPE_ID,
            Self::Model(ModelError::UnknownDiscriminator { .. }) => {
                codes::type_mapping::UNKNOWN_DISCRIMINATOR
            }
            Self::Model(ModelError::InvalidBaseType { .. }) => codes::type_mapping::INVALID_BASE_TYPE,
            Self::Model(ModelError::UnknownPrefix { .. }) => codes::naming::UNKNOWN_PREFIX,
            Self::Model(ModelError::UnmappedNamespace { .. }) => codes::naming::UNMAPPED_NAMESPACE,
            Self::Model(_) => codes::naming::MALFORMED_QNAME,
        }
    }
}

pub type MappingResult<T> = Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_convert() {
        let error: MappingError = ModelError::UnknownPrefix {
            prefix: "zz".to_string(),
        }
        .into();
        assert!(matches!(error, MappingError::Model(ModelError::UnknownPrefix { .. })));
        assert_eq!(error.code().as_str(), "E011");
    }

    #[test]
    fn test_display_messages() {
        let error = MappingError::DuplicateEvaluator {
            scope: Scope::Document,
            action: Action::CanCheckOut,
        };
        assert_eq!(
            error.to_string(),
            "Evaluator for action 'canCheckOut' already registered in scope 'document'"
        );
        assert_eq!(
            MappingError::operator_not_supported("cmis:isLatestVersion", "LIKE").to_string(),
            "Operator 'LIKE' not supported by property 'cmis:isLatestVersion'"
        );
    }
}
