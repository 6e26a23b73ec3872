// src/qname.rs
//! Qualified names and namespace prefix resolution
//!
//! A [`QName`] is a (namespace URI, local name) pair. Its canonical form is
//! the expanded `{uri}local` string; the prefixed `prefix:local` form needs a
//! [`NamespacePrefixResolver`].

use crate::error::ModelError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub const NAMESPACE_BEGIN: char = '{';
pub const NAMESPACE_END: char = '}';
pub const NAMESPACE_PREFIX: char = ':';

/// Namespace URI of names without a namespace
pub const DEFAULT_URI: &str = "";

/// Prefix bound to [`DEFAULT_URI`]
pub const DEFAULT_PREFIX: &str = "";

/// Immutable (namespace, local name) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
    namespace: Cow<'static, str>,
    local_name: Cow<'static, str>,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            local_name: Cow::Owned(local_name.into()),
        }
    }

    /// Build a name from static parts, usable in `const` items
    pub const fn from_static(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            local_name: Cow::Borrowed(local_name),
        }
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Parse the expanded `{uri}local` form. A string without the opening
    /// brace is a local name in the default namespace.
    pub fn parse_expanded(value: &str) -> Result<Self, ModelError> {
        let Some(rest) = value.strip_prefix(NAMESPACE_BEGIN) else {
            if value.is_empty() {
                return Err(ModelError::malformed_qname(value, "empty local name"));
            }
            return Ok(Self::new(DEFAULT_URI, value));
        };

        let end = rest
            .find(NAMESPACE_END)
            .ok_or_else(|| ModelError::malformed_qname(value, "missing closing '}'"))?;
        let (uri, local) = (&rest[..end], &rest[end + 1..]);
        if local.is_empty() {
            return Err(ModelError::malformed_qname(value, "empty local name"));
        }

        Ok(Self::new(uri, local))
    }

    /// Parse `prefix:local`, resolving the prefix. No colon means the default
    /// namespace.
    pub fn resolve_prefixed(
        value: &str,
        resolver: &dyn NamespacePrefixResolver,
    ) -> Result<Self, ModelError> {
        let (prefix, local) = match value.find(NAMESPACE_PREFIX) {
            Some(idx) => (&value[..idx], &value[idx + 1..]),
            None => (DEFAULT_PREFIX, value),
        };
        if local.is_empty() {
            return Err(ModelError::malformed_qname(value, "empty local name"));
        }

        let uri = resolver
            .namespace_uri(prefix)
            .ok_or_else(|| ModelError::UnknownPrefix {
                prefix: prefix.to_string(),
            })?;

        Ok(Self::new(uri, local))
    }

    /// Render as `prefix:local`, or just `local` in the default namespace
    pub fn to_prefixed(&self, resolver: &dyn NamespacePrefixResolver) -> Result<String, ModelError> {
        let prefix = resolver
            .prefixes_for(self.namespace_uri())
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::UnmappedNamespace {
                uri: self.namespace_uri().to_string(),
            })?;

        if prefix.is_empty() {
            Ok(self.local_name().to_string())
        } else {
            Ok(format!("{}{}{}", prefix, NAMESPACE_PREFIX, self.local_name()))
        }
    }

    /// Canonical `{uri}local` form
    pub fn to_expanded(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            NAMESPACE_BEGIN, self.namespace, NAMESPACE_END, self.local_name
        )
    }
}

impl FromStr for QName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_expanded(s)
    }
}

impl TryFrom<String> for QName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_expanded(&value)
    }
}

impl From<QName> for String {
    fn from(name: QName) -> Self {
        name.to_expanded()
    }
}

// ============================================================================
// PREFIX RESOLUTION
// ============================================================================

/// Namespace-prefix table consumed by the cache and the mapping service
pub trait NamespacePrefixResolver: Send + Sync {
    /// URI bound to `prefix`
    fn namespace_uri(&self, prefix: &str) -> Option<String>;

    /// Prefixes bound to `uri`; the first one is canonical
    fn prefixes_for(&self, uri: &str) -> Vec<String>;

    /// All registered prefixes
    fn prefixes(&self) -> Vec<String>;

    /// All registered namespace URIs
    fn uris(&self) -> Vec<String>;
}

/// In-memory, insertion-ordered prefix table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceRegistry {
    prefixes: IndexMap<String, String>,
}

impl NamespaceRegistry {
    /// Create a table holding only the default namespace
    pub fn new() -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert(DEFAULT_PREFIX.to_string(), DEFAULT_URI.to_string());
        Self { prefixes }
    }

    /// Create a table with the well-known content-model namespaces
    pub fn with_standard_namespaces() -> Self {
        let mut registry = Self::new();
        for (prefix, uri) in crate::models::STANDARD_NAMESPACES {
            registry.register(prefix, uri);
        }
        registry
    }

    /// Bind `prefix` to `uri`, replacing any earlier binding of the prefix
    pub fn register(&mut self, prefix: &str, uri: &str) {
        self.prefixes.insert(prefix.to_string(), uri.to_string());
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespacePrefixResolver for NamespaceRegistry {
    fn namespace_uri(&self, prefix: &str) -> Option<String> {
        self.prefixes.get(prefix).cloned()
    }

    fn prefixes_for(&self, uri: &str) -> Vec<String> {
        self.prefixes
            .iter()
            .filter(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn prefixes(&self) -> Vec<String> {
        self.prefixes.keys().cloned().collect()
    }

    fn uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = Vec::new();
        for uri in self.prefixes.values() {
            if !uris.contains(uri) {
                uris.push(uri.clone());
            }
        }
        uris
    }
}
