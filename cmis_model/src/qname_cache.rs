// src/qname_cache.rs
//! Bidirectional bounded cache between the legacy variable-naming convention
//! (`prefix_local`) and structured qualified names
//!
//! The cache is the only structure that mutates after start-up. Both
//! directions are memoized on first computation; once a direction reaches
//! its capacity the least recently used entry is evicted. Two threads may
//! compute the same entry concurrently; the computation is pure, so the
//! second insert simply overwrites the first.

use crate::config::runtime::MappingPreferences;
use crate::error::ModelError;
use crate::qname::{NamespacePrefixResolver, QName, NAMESPACE_BEGIN, NAMESPACE_PREFIX};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

const EXTERNAL_SEPARATOR: char = '_';

/// Entry counts for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
    pub external_entries: usize,
    pub qualified_entries: usize,
    pub capacity: usize,
}

pub struct QNameCache {
    resolver: Arc<dyn NamespacePrefixResolver>,
    default_namespace: String,
    capacity: NonZeroUsize,
    /// qualified name -> external name
    external: Mutex<LruCache<QName, String>>,
    /// external name -> qualified name
    qualified: Mutex<LruCache<String, QName>>,
}

impl QNameCache {
    /// Create a cache holding at most `capacity` entries per direction
    pub fn new(
        resolver: Arc<dyn NamespacePrefixResolver>,
        capacity: usize,
    ) -> Result<Self, ModelError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| ModelError::configuration("qname cache capacity must be non-zero"))?;

        Ok(Self {
            resolver,
            default_namespace: crate::qname::DEFAULT_URI.to_string(),
            capacity,
            external: Mutex::new(LruCache::new(capacity)),
            qualified: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Create a cache sized and namespaced from runtime preferences
    pub fn from_preferences(
        resolver: Arc<dyn NamespacePrefixResolver>,
        preferences: &MappingPreferences,
    ) -> Result<Self, ModelError> {
        Ok(Self::new(resolver, preferences.qname_cache_capacity)?
            .with_default_namespace(&preferences.default_namespace))
    }

    /// Namespace given to bare local names
    pub fn with_default_namespace(mut self, uri: &str) -> Self {
        self.default_namespace = uri.to_string();
        self
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn resolver(&self) -> &Arc<dyn NamespacePrefixResolver> {
        &self.resolver
    }

    /// Encode `qname` in the `prefix_local` convention
    pub fn to_external_name(&self, qname: &QName) -> String {
        if let Some(cached) = self.external.lock().get(qname) {
            return cached.clone();
        }

        let external = self.compute_external(qname);
        self.external.lock().put(qname.clone(), external.clone());
        if self.compute_qualified(&external) == *qname {
            self.qualified.lock().put(external.clone(), qname.clone());
        }
        external
    }

    /// Decode a `prefix_local`, `prefix:local` or `{uri}local` string
    pub fn to_qualified_name(&self, external: &str) -> QName {
        if let Some(cached) = self.qualified.lock().get(external) {
            return cached.clone();
        }

        let qname = self.compute_qualified(external);
        self.qualified.lock().put(external.to_string(), qname.clone());
        if self.compute_external(&qname) == external {
            self.external.lock().put(qname.clone(), external.to_string());
        }
        qname
    }

    /// Drop every memoized entry
    pub fn clear(&self) {
        self.external.lock().clear();
        self.qualified.lock().clear();
        crate::log_debug!("Qualified-name cache cleared");
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            external_entries: self.external.lock().len(),
            qualified_entries: self.qualified.lock().len(),
            capacity: self.capacity.get(),
        }
    }

    // ========================================================================
    // CONVERSIONS
    // ========================================================================

    fn compute_qualified(&self, external: &str) -> QName {
        let fallback = || QName::new(self.default_namespace.as_str(), external);

        if external.starts_with(NAMESPACE_BEGIN) {
            return QName::parse_expanded(external).unwrap_or_else(|_| fallback());
        }

        let separator = if external.contains(NAMESPACE_PREFIX) {
            NAMESPACE_PREFIX
        } else if external.contains(EXTERNAL_SEPARATOR) {
            EXTERNAL_SEPARATOR
        } else {
            return fallback();
        };

        match external.split_once(separator) {
            Some((prefix, local)) if !local.is_empty() => self
                .resolver
                .namespace_uri(prefix)
                .map(|uri| QName::new(uri, local))
                .unwrap_or_else(fallback),
            _ => fallback(),
        }
    }

    fn compute_external(&self, qname: &QName) -> String {
        let prefixed = if qname.namespace_uri() == self.default_namespace {
            Some(qname.local_name().to_string())
        } else {
            match qname.to_prefixed(self.resolver.as_ref()) {
                Ok(prefixed) if prefixed.contains(NAMESPACE_PREFIX) => Some(prefixed),
                _ => None,
            }
        };

        match prefixed {
            Some(prefixed) if !Self::is_ambiguous(qname, &prefixed) => {
                prefixed.replace(NAMESPACE_PREFIX, "_")
            }
            _ => qname.to_expanded(),
        }
    }

    /// An underscore before the first colon (or anywhere when there is no
    /// colon) cannot be told apart from the prefix separator
    fn is_ambiguous(qname: &QName, prefixed: &str) -> bool {
        if qname.local_name().contains(NAMESPACE_PREFIX) {
            return true;
        }
        match (
            prefixed.find(EXTERNAL_SEPARATOR),
            prefixed.find(NAMESPACE_PREFIX),
        ) {
            (Some(underscore), Some(colon)) => underscore < colon,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Debug for QNameCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QNameCache")
            .field("default_namespace", &self.default_namespace)
            .field("statistics", &self.statistics())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{cmis_model, content_model};
    use crate::qname::NamespaceRegistry;

    fn cache() -> QNameCache {
        let mut registry = NamespaceRegistry::with_standard_namespaces();
        registry.register("my_ns", "http://example.org/model/my/1.0");
        QNameCache::new(Arc::new(registry), 16).unwrap()
    }

    #[test]
    fn test_prefixed_encoding() {
        let cache = cache();
        assert_eq!(cache.to_external_name(&content_model::PROP_NAME), "cm_name");
        assert_eq!(
            cache.to_external_name(&content_model::PROP_VERSION_LABEL),
            "cm_versionLabel"
        );
        assert_eq!(cache.to_external_name(&cmis_model::DOCUMENT), "cmis_document");
    }

    #[test]
    fn test_underscore_in_local_name_keeps_prefixed_form() {
        let cache = cache();
        let qname = QName::new(content_model::URI, "my_property");
        assert_eq!(cache.to_external_name(&qname), "cm_my_property");
        assert_eq!(cache.to_qualified_name("cm_my_property"), qname);
    }

    #[test]
    fn test_ambiguous_prefix_uses_expanded_form() {
        let cache = cache();
        let qname = QName::new("http://example.org/model/my/1.0", "thing");
        assert_eq!(
            cache.to_external_name(&qname),
            "{http://example.org/model/my/1.0}thing"
        );

        let bare = QName::new("", "with_underscore");
        assert_eq!(cache.to_external_name(&bare), "{}with_underscore");
        assert_eq!(cache.to_qualified_name("{}with_underscore"), bare);
    }

    #[test]
    fn test_unprefixed_namespace_uses_expanded_form() {
        let cache = cache();
        let qname = QName::new("http://nowhere.example/ns", "x");
        assert_eq!(cache.to_external_name(&qname), "{http://nowhere.example/ns}x");
    }

    #[test]
    fn test_qualified_name_parsing_rules() {
        let cache = cache();
        assert_eq!(cache.to_qualified_name("plain"), QName::new("", "plain"));
        assert_eq!(cache.to_qualified_name("cm_title"), content_model::PROP_TITLE);
        assert_eq!(cache.to_qualified_name("cm:title"), content_model::PROP_TITLE);
        assert_eq!(
            cache.to_qualified_name(&content_model::PROP_TITLE.to_expanded()),
            content_model::PROP_TITLE
        );
    }

    #[test]
    fn test_unknown_prefix_falls_back_to_default_namespace() {
        let cache = cache();
        assert_eq!(cache.to_qualified_name("zz_title"), QName::new("", "zz_title"));

        let cache = cache.with_default_namespace(cmis_model::URI);
        assert_eq!(
            cache.to_qualified_name("zz_title"),
            QName::new(cmis_model::URI, "zz_title")
        );
    }

    #[test]
    fn test_round_trip_both_directions() {
        let cache = cache();
        let names = [
            content_model::PROP_NAME,
            content_model::TYPE_CONTENT,
            QName::new(content_model::URI, "a_b_c"),
            QName::new("", "local"),
            QName::new("http://example.org/model/my/1.0", "x"),
            cmis_model::OBJECT,
        ];
        for name in names {
            let external = cache.to_external_name(&name);
            assert_eq!(cache.to_qualified_name(&external), name, "{}", external);
        }

        for external in ["cm_name", "sys_base", "cmisext_object", "d_text", "plain"] {
            let qname = cache.to_qualified_name(external);
            assert_eq!(cache.to_external_name(&qname), external);
        }
    }

    #[test]
    fn test_memoizes_both_directions() {
        let cache = cache();
        cache.to_external_name(&content_model::PROP_NAME);
        let stats = cache.statistics();
        assert_eq!(stats.external_entries, 1);
        assert_eq!(stats.qualified_entries, 1);

        cache.clear();
        let stats = cache.statistics();
        assert_eq!(stats.external_entries, 0);
        assert_eq!(stats.qualified_entries, 0);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache = QNameCache::new(Arc::new(NamespaceRegistry::with_standard_namespaces()), 2)
            .unwrap();
        for local in ["a", "b", "c", "d"] {
            cache.to_external_name(&QName::new(content_model::URI, local));
        }
        let stats = cache.statistics();
        assert_eq!(stats.external_entries, 2);
        assert_eq!(stats.capacity, 2);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = QNameCache::new(Arc::new(NamespaceRegistry::new()), 0);
        assert!(matches!(result, Err(ModelError::Configuration { .. })));
    }

    #[test]
    fn test_concurrent_population() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(cache.to_qualified_name("cm_name"), content_model::PROP_NAME);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.statistics().qualified_entries, 1);
    }
}
