//! # CMIS Mapping CLI
//!
//! Inspects the mapping over a repository fixture: type ids, property
//! resolution, predicate compilation and allowable actions.

use clap::{Parser, Subcommand};
use cmis_mapping::accessors::{Operator, Predicate};
use cmis_mapping::query::parse_value;
use cmis_mapping::{CmisMapping, CmisObject, MappingError, MappingResult, MemoryRepository, ServiceRegistry};
use cmis_model::config::LogLevel;
use cmis_model::qname::NAMESPACE_BEGIN;
use cmis_model::{log_error, log_info, logging, MappingPreferences, NodeRef, PropertyValue, QName};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "cmis-map",
    version,
    about = "Inspect the CMIS mapping of a content repository"
)]
struct Cli {
    /// Repository fixture (TOML); an empty repository over the standard model otherwise
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Mapping preferences (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type id of a native class (e.g. "cm:content")
    TypeId { native: String },

    /// Native class and scope behind an external type id (e.g. "D:cm:content")
    ResolveType { external_id: String },

    /// Native property and accessor behind a property id or loose name
    ResolveProperty { name: String },

    /// Compile a predicate into a query fragment
    Compile {
        property: String,

        /// =, <>, >, >=, <, <=, EXISTS, IN or LIKE
        operator: String,

        values: Vec<String>,

        /// Negate EXISTS, IN and LIKE
        #[arg(long)]
        not: bool,
    },

    /// Allowable actions of a node (bare ids are looked up in the spaces store)
    Actions { node: String },

    /// External name of a qualified name ("cm:name" or "{uri}local")
    ExternalName { qname: String },

    /// Type definition synthesized for a native class
    TypeDef { native: String },
}

/// Command result in both output formats
struct Report {
    text: String,
    json: Value,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::init();

    let mut preferences = match load_preferences(cli.config.as_deref()) {
        Ok(preferences) => preferences,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.json {
        // keep stdout parseable
        preferences.logging.min_log_level = LogLevel::Error;
    }
    if let Err(e) = logging::config::init_runtime_preferences(preferences.logging.clone()) {
        log::warn!("{}", e);
    }
    if let Err(e) = logging::init_global_logging() {
        log::warn!("{}", e);
    }

    match run(&cli, &preferences) {
        Ok(report) => {
            if cli.json {
                println!("{}", report.json);
            } else {
                println!("{}", report.text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!(e.code(), "Command failed", "error" => &e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_preferences(path: Option<&Path>) -> Result<MappingPreferences, cmis_model::ModelError> {
    match path {
        Some(path) => MappingPreferences::load(path),
        None => Ok(MappingPreferences::default()),
    }
}

fn run(cli: &Cli, preferences: &MappingPreferences) -> MappingResult<Report> {
    let repository = match &cli.fixture {
        Some(path) => {
            log::debug!("loading fixture {}", path.display());
            MemoryRepository::load(path)?
        }
        None => MemoryRepository::with_standard_model(),
    };
    let mapping = CmisMapping::new(ServiceRegistry::from_memory(Arc::new(repository)), preferences)?;
    log_info!("Mapping ready", "accessors" => mapping.accessors().count());

    match &cli.command {
        Command::TypeId { native } => type_id(&mapping, native),
        Command::ResolveType { external_id } => resolve_type(&mapping, external_id),
        Command::ResolveProperty { name } => resolve_property(&mapping, name),
        Command::Compile {
            property,
            operator,
            values,
            not,
        } => compile(&mapping, property, operator, values, *not),
        Command::Actions { node } => actions(&mapping, node),
        Command::ExternalName { qname } => external_name(&mapping, qname),
        Command::TypeDef { native } => type_def(&mapping, native),
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn qname(mapping: &CmisMapping, value: &str) -> MappingResult<QName> {
    if value.starts_with(NAMESPACE_BEGIN) {
        Ok(QName::parse_expanded(value)?)
    } else {
        Ok(QName::resolve_prefixed(value, mapping.services().namespaces.as_ref())?)
    }
}

fn type_id(mapping: &CmisMapping, native: &str) -> MappingResult<Report> {
    let class = qname(mapping, native)?;
    let type_id = mapping
        .type_id_for_class(&class)
        .ok_or_else(|| MappingError::invalid_argument(format!("'{}' is not a CMIS type", native)))?;
    Ok(Report {
        text: format!(
            "{}\n  scope:      {}\n  query name: {}",
            type_id.id(),
            type_id.scope(),
            type_id.query_name()
        ),
        json: json!({
            "id": type_id.id(),
            "scope": type_id.scope().as_str(),
            "query_name": type_id.query_name(),
        }),
    })
}

fn resolve_type(mapping: &CmisMapping, external_id: &str) -> MappingResult<Report> {
    let type_id = mapping.type_id_from_external(external_id)?;
    Ok(Report {
        text: format!("{}\n  scope: {}", type_id.qname(), type_id.scope()),
        json: json!({
            "id": type_id.id(),
            "qname": type_id.qname().to_string(),
            "scope": type_id.scope().as_str(),
        }),
    })
}

fn resolve_property(mapping: &CmisMapping, name: &str) -> MappingResult<Report> {
    let accessor = mapping.property_accessor(name)?;
    let definition = accessor.definition();
    let operators: Vec<&str> = accessor
        .supported_operators()
        .iter()
        .map(|operator| operator.as_str())
        .collect();
    let mapped = accessor.mapped_property().map(|q| q.to_string());
    Ok(Report {
        text: format!(
            "{}\n  native:      {}\n  type:        {}\n  cardinality: {:?}\n  updatability: {:?}\n  operators:   {}",
            definition.id,
            mapped.as_deref().unwrap_or("(computed)"),
            definition.property_type,
            definition.cardinality,
            definition.updatability,
            operators.join(" ")
        ),
        json: json!({
            "id": definition.id,
            "native": mapped,
            "type": definition.property_type.as_str(),
            "multi_valued": definition.is_multi_valued(),
            "orderable": definition.orderable,
            "operators": operators,
        }),
    })
}

fn first<'a>(values: &'a [PropertyValue], operator: Operator) -> MappingResult<&'a PropertyValue> {
    values
        .first()
        .ok_or_else(|| MappingError::invalid_argument(format!("operator {} needs a value", operator)))
}

fn compile(
    mapping: &CmisMapping,
    property: &str,
    operator: &str,
    values: &[String],
    not: bool,
) -> MappingResult<Report> {
    let accessor = mapping.property_accessor(property)?;
    let operator = Operator::parse(operator)
        .ok_or_else(|| MappingError::invalid_argument(format!("unknown operator '{}'", operator)))?;

    let property_type = accessor.definition().property_type;
    let parsed = match operator {
        // patterns stay raw text
        Operator::Like | Operator::Exists => Vec::new(),
        _ => values
            .iter()
            .map(|value| parse_value(property_type, value))
            .collect::<MappingResult<Vec<_>>>()?,
    };

    let predicate = match operator {
        Operator::Equals => Predicate::Equals(first(&parsed, operator)?),
        Operator::NotEquals => Predicate::NotEquals(first(&parsed, operator)?),
        Operator::GreaterThan => Predicate::GreaterThan(first(&parsed, operator)?),
        Operator::GreaterThanOrEquals => Predicate::GreaterThanOrEquals(first(&parsed, operator)?),
        Operator::LessThan => Predicate::LessThan(first(&parsed, operator)?),
        Operator::LessThanOrEquals => Predicate::LessThanOrEquals(first(&parsed, operator)?),
        Operator::Exists => Predicate::Exists { not },
        Operator::In => Predicate::In {
            values: &parsed,
            not,
        },
        Operator::Like => Predicate::Like {
            pattern: values.first().map(String::as_str).ok_or_else(|| {
                MappingError::invalid_argument("LIKE needs a pattern".to_string())
            })?,
            not,
        },
    };

    let fragment = accessor.compile(&predicate, mapping.query_context())?;
    Ok(Report {
        text: fragment.to_string(),
        json: json!({
            "property": accessor.property_id(),
            "operator": operator.as_str(),
            "not": not,
            "query": fragment.to_string(),
        }),
    })
}

fn node_ref(value: &str) -> MappingResult<NodeRef> {
    if value.contains("://") {
        Ok(value.parse()?)
    } else {
        Ok(NodeRef::workspace(value))
    }
}

fn actions(mapping: &CmisMapping, node: &str) -> MappingResult<Report> {
    let node = node_ref(node)?;
    if !mapping.services().nodes.exists(&node) {
        return Err(MappingError::repository(format!("node '{}' does not exist", node)));
    }
    let object = CmisObject::Node(node);
    let scope = mapping.scope_of(&object).ok_or_else(|| {
        MappingError::invalid_argument(format!("'{}' is not a CMIS object", object))
    })?;
    let allowed: Vec<&str> = mapping
        .allowable_actions(scope, &object)
        .iter()
        .map(|action| action.value())
        .collect();
    Ok(Report {
        text: format!("{} ({})\n  {}", object, scope, allowed.join("\n  ")),
        json: json!({
            "object": object.to_string(),
            "scope": scope.as_str(),
            "actions": allowed,
        }),
    })
}

fn external_name(mapping: &CmisMapping, value: &str) -> MappingResult<Report> {
    let qname = qname(mapping, value)?;
    let external = mapping.cache().to_external_name(&qname);
    Ok(Report {
        text: external.clone(),
        json: json!({ "qname": qname.to_string(), "external": external }),
    })
}

fn type_def(mapping: &CmisMapping, native: &str) -> MappingResult<Report> {
    let class = qname(mapping, native)?;
    let definition = mapping
        .type_definition(&class)
        .ok_or_else(|| MappingError::invalid_argument(format!("'{}' is not a CMIS type", native)))?;
    let json = serde_json::to_value(&definition)
        .map_err(|e| MappingError::invalid_argument(format!("cannot serialize definition: {}", e)))?;
    Ok(Report {
        text: format!(
            "{} ({})\n  parent:     {}\n  name:       {}\n  creatable:  {}\n  fileable:   {}\n  queryable:  {}\n  versionable: {}\n  properties: {}",
            definition.id(),
            definition.base,
            definition.parent_id.as_deref().unwrap_or("-"),
            definition.display_name,
            definition.creatable,
            definition.fileable,
            definition.queryable,
            definition.versionable,
            definition.property_ids.join(", ")
        ),
        json,
    })
}
