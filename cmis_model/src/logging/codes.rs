//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the mapping crates log.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Qualified name and namespace error codes
pub mod naming {
    use super::Code;

    pub const MALFORMED_QNAME: Code = Code::new("E010");
    pub const UNKNOWN_PREFIX: Code = Code::new("E011");
    pub const UNMAPPED_NAMESPACE: Code = Code::new("E012");
}

/// Type id and type classification error codes
pub mod type_mapping {
    use super::Code;

    pub const MALFORMED_TYPE_ID: Code = Code::new("E020");
    pub const UNKNOWN_DISCRIMINATOR: Code = Code::new("E021");
    pub const INVALID_BASE_TYPE: Code = Code::new("E022");
    pub const UNKNOWN_TYPE: Code = Code::new("E023");
}

/// Property resolution and value error codes
pub mod property {
    use super::Code;

    pub const UNKNOWN_PROPERTY: Code = Code::new("E030");
    pub const READ_ONLY_PROPERTY: Code = Code::new("E031");
    pub const VALUE_TYPE_MISMATCH: Code = Code::new("E032");
}

/// Predicate compilation error codes
pub mod predicate {
    use super::Code;

    pub const OPERATOR_NOT_SUPPORTED: Code = Code::new("E040");
    pub const INVALID_PREDICATE_VALUE: Code = Code::new("E041");
    pub const UNSORTABLE_PROPERTY: Code = Code::new("E042");
}

/// Action evaluation codes
pub mod evaluator {
    use super::Code;

    pub const MISSING_NODE: Code = Code::new("W050");
}

/// Registration error codes
pub mod registry {
    use super::Code;

    pub const DUPLICATE_EVALUATOR: Code = Code::new("E060");
    pub const DUPLICATE_ACCESSOR: Code = Code::new("E061");
}

/// Configuration error codes
pub mod configuration {
    use super::Code;

    pub const INVALID_CONFIGURATION: Code = Code::new("E070");
    pub const CONFIGURATION_LOAD_FAILURE: Code = Code::new("E071");
}

/// Repository collaborator error codes
pub mod repository {
    use super::Code;

    pub const REPOSITORY_FAILURE: Code = Code::new("E080");
    pub const FIXTURE_LOAD_FAILURE: Code = Code::new("E081");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const MAPPING_INITIALIZED: Code = Code::new("I010");
    pub const EVALUATORS_REGISTERED: Code = Code::new("I020");
    pub const ACCESSORS_REGISTERED: Code = Code::new("I021");
    pub const PREDICATE_COMPILED: Code = Code::new("I030");
    pub const CONFIGURATION_LOADED: Code = Code::new("I040");
    pub const FIXTURE_LOADED: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let mut insert = |metadata: ErrorMetadata| {
            registry.insert(metadata.code, metadata);
        };

        // System errors
        insert(ErrorMetadata::new(
            "ERR001",
            "System",
            Severity::Critical,
            false,
            true,
            "Critical internal error",
            "File a bug report with the logged context",
        ));
        insert(ErrorMetadata::new(
            "ERR002",
            "System",
            Severity::Critical,
            false,
            true,
            "Mapping service initialization failure",
            "Check the repository fixture and configuration",
        ));

        // Naming errors
        insert(ErrorMetadata::new(
            "E010",
            "Naming",
            Severity::Medium,
            true,
            false,
            "Qualified name could not be parsed",
            "Use the {uri}local or prefix:local form",
        ));
        insert(ErrorMetadata::new(
            "E011",
            "Naming",
            Severity::Medium,
            true,
            false,
            "Namespace prefix is not registered",
            "Register the prefix in the namespace table",
        ));
        insert(ErrorMetadata::new(
            "E012",
            "Naming",
            Severity::Medium,
            true,
            false,
            "Namespace URI has no registered prefix",
            "Register a prefix for the namespace",
        ));

        // Type mapping errors
        insert(ErrorMetadata::new(
            "E020",
            "TypeMapping",
            Severity::High,
            true,
            false,
            "External type id is malformed",
            "Use <scope>:<prefix>:<local> or a base type id",
        ));
        insert(ErrorMetadata::new(
            "E021",
            "TypeMapping",
            Severity::High,
            true,
            false,
            "Type id discriminator is unknown",
            "Use one of the D, F, R or P discriminators",
        ));
        insert(ErrorMetadata::new(
            "E022",
            "TypeMapping",
            Severity::High,
            true,
            false,
            "Scope has no type id discriminator",
            "Map object-scoped types through the base type table",
        ));
        insert(ErrorMetadata::new(
            "E023",
            "TypeMapping",
            Severity::Medium,
            true,
            false,
            "Native type has no external mapping",
            "Check that the type derives from a mapped base type",
        ));

        // Property errors
        insert(ErrorMetadata::new(
            "E030",
            "Property",
            Severity::Medium,
            true,
            false,
            "Property id does not resolve to a known property",
            "Check the property id against the dictionary",
        ));
        insert(ErrorMetadata::new(
            "E031",
            "Property",
            Severity::Medium,
            true,
            false,
            "Property is computed and cannot be written",
            "Write the underlying native property instead",
        ));
        insert(ErrorMetadata::new(
            "E032",
            "Property",
            Severity::Medium,
            true,
            false,
            "Value does not match the property type",
            "Convert the value to the declared property type",
        ));

        // Predicate errors
        insert(ErrorMetadata::new(
            "E040",
            "Predicate",
            Severity::Medium,
            true,
            false,
            "Operator is not supported for the property",
            "Rewrite the query without this comparison",
        ));
        insert(ErrorMetadata::new(
            "E041",
            "Predicate",
            Severity::Medium,
            true,
            false,
            "Predicate value is invalid",
            "Check the literal against the property type",
        ));
        insert(ErrorMetadata::new(
            "E042",
            "Predicate",
            Severity::Low,
            true,
            false,
            "Property cannot be used for ordering",
            "Order by a scalar property",
        ));

        // Evaluator warnings
        insert(ErrorMetadata::new(
            "W050",
            "Evaluator",
            Severity::Low,
            true,
            false,
            "Evaluated node does not exist",
            "No action required; the action is reported as not allowed",
        ));

        // Registry errors
        insert(ErrorMetadata::new(
            "E060",
            "Registry",
            Severity::Critical,
            false,
            true,
            "Evaluator registered twice for the same scope and action",
            "Remove the duplicate registration",
        ));
        insert(ErrorMetadata::new(
            "E061",
            "Registry",
            Severity::Critical,
            false,
            true,
            "Accessor registered twice for the same property id",
            "Remove the duplicate registration",
        ));

        // Configuration errors
        insert(ErrorMetadata::new(
            "E070",
            "Configuration",
            Severity::High,
            false,
            true,
            "Configuration value is out of range",
            "Fix the configuration value",
        ));
        insert(ErrorMetadata::new(
            "E071",
            "Configuration",
            Severity::High,
            false,
            true,
            "Configuration file could not be loaded",
            "Check the file path and TOML syntax",
        ));

        // Repository errors
        insert(ErrorMetadata::new(
            "E080",
            "Repository",
            Severity::High,
            true,
            false,
            "Repository service failed",
            "Check that the referenced node exists",
        ));
        insert(ErrorMetadata::new(
            "E081",
            "Repository",
            Severity::High,
            false,
            true,
            "Repository fixture could not be loaded",
            "Check the fixture path and TOML syntax",
        ));

        // Success codes
        insert(ErrorMetadata::new(
            "I001",
            "System",
            Severity::Low,
            true,
            false,
            "Logging system initialized",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I010",
            "TypeMapping",
            Severity::Low,
            true,
            false,
            "Mapping service initialized",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I020",
            "Registry",
            Severity::Low,
            true,
            false,
            "Action evaluators registered",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I021",
            "Registry",
            Severity::Low,
            true,
            false,
            "Property accessors registered",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I030",
            "Predicate",
            Severity::Low,
            true,
            false,
            "Predicate compiled",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I040",
            "Configuration",
            Severity::Low,
            true,
            false,
            "Configuration loaded",
            "None",
        ));
        insert(ErrorMetadata::new(
            "I041",
            "Repository",
            Severity::Low,
            true,
            false,
            "Repository fixture loaded",
            "None",
        ));

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            naming::MALFORMED_QNAME,
            naming::UNKNOWN_PREFIX,
            naming::UNMAPPED_NAMESPACE,
            type_mapping::MALFORMED_TYPE_ID,
            type_mapping::UNKNOWN_DISCRIMINATOR,
            type_mapping::INVALID_BASE_TYPE,
            type_mapping::UNKNOWN_TYPE,
            property::UNKNOWN_PROPERTY,
            property::READ_ONLY_PROPERTY,
            property::VALUE_TYPE_MISMATCH,
            predicate::OPERATOR_NOT_SUPPORTED,
            predicate::INVALID_PREDICATE_VALUE,
            predicate::UNSORTABLE_PROPERTY,
            evaluator::MISSING_NODE,
            registry::DUPLICATE_EVALUATOR,
            registry::DUPLICATE_ACCESSOR,
            configuration::INVALID_CONFIGURATION,
            configuration::CONFIGURATION_LOAD_FAILURE,
            repository::REPOSITORY_FAILURE,
            repository::FIXTURE_LOAD_FAILURE,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::MAPPING_INITIALIZED,
            success::EVALUATORS_REGISTERED,
            success::ACCESSORS_REGISTERED,
            success::PREDICATE_COMPILED,
            success::CONFIGURATION_LOADED,
            success::FIXTURE_LOADED,
        ];
        for code in codes {
            assert!(get_error_metadata(code.as_str()).is_some(), "{}", code);
        }
    }

    #[test]
    fn test_duplicate_evaluator_halts() {
        let code = registry::DUPLICATE_EVALUATOR.as_str();
        assert_eq!(get_severity(code), Severity::Critical);
        assert!(requires_halt(code));
        assert!(!is_recoverable(code));
        assert_eq!(get_category(code), "Registry");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_action("E999"), "No specific action available");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }
}
