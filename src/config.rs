//! Runtime configuration: mirror endpoints, display settings and the
//! source-descriptor table.
//!
//! The descriptor table is a YAML list (see `sources.yaml` at the crate
//! root, embedded at build time). A replacement table can be loaded from
//! disk with [`SourceTable::from_path`].

use crate::error::ContentError;
use crate::models::SourceDescriptor;
use crate::orchestrator::RetryPolicy;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Web-archive availability endpoint.
pub const ARCHIVE_AVAILABILITY_URL: &str = "https://archive.org/wayback/available";
/// Search-engine API endpoint.
pub const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
/// Base url of the search-engine cache proxy.
pub const CACHE_PROXY_BASE: &str = "https://webcache.googleusercontent.com";
/// Host that serves archived pages and their assets.
pub const ARCHIVE_ASSET_HOST: &str = "web.archive.org";

const BUILTIN_SOURCES: &str = include_str!("../sources.yaml");

/// API key / engine id pair for the search-engine lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

/// Endpoints and credentials used by the mirror resolver.
///
/// Every endpoint is overridable so tests can point them at a mock server.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub archive_endpoint: String,
    pub search_endpoint: String,
    pub cache_base: String,
    pub mirror_host: String,
    pub credentials: Option<SearchCredentials>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            archive_endpoint: ARCHIVE_AVAILABILITY_URL.to_string(),
            search_endpoint: CUSTOM_SEARCH_URL.to_string(),
            cache_base: CACHE_PROXY_BASE.to_string(),
            mirror_host: ARCHIVE_ASSET_HOST.to_string(),
            credentials: None,
        }
    }
}

impl MirrorConfig {
    /// Attach search credentials when both halves are present and non-blank.
    pub fn with_credentials(mut self, api_key: Option<String>, engine_id: Option<String>) -> Self {
        self.credentials = match (api_key, engine_id) {
            (Some(api_key), Some(engine_id))
                if !api_key.trim().is_empty() && !engine_id.trim().is_empty() =>
            {
                Some(SearchCredentials { api_key, engine_id })
            }
            _ => None,
        };
        self
    }
}

/// Settings for one [`ContentService`](crate::ContentService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub mirror: MirrorConfig,
    /// Protocol the outer application is served over (`http` or `https`).
    pub display_protocol: String,
    pub retry_policy: RetryPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mirror: MirrorConfig::default(),
            display_protocol: "https".to_string(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// Immutable lookup table from source id to [`SourceDescriptor`].
///
/// Safe to share read-only across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    sources: BTreeMap<String, SourceDescriptor>,
}

impl SourceTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_SOURCES)
    }

    /// Load a table from a YAML file on disk.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ContentError::Config(format!("cannot read source table: {e}")))?;
        let table = Self::from_yaml(&raw)?;
        info!(count = table.len(), "Loaded source table");
        Ok(table)
    }

    /// Parse and validate a YAML list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the YAML is malformed, an id is
    /// blank or duplicated, or a descriptor has no retrieval methods.
    pub fn from_yaml(raw: &str) -> Result<Self, ContentError> {
        let descriptors: Vec<SourceDescriptor> = serde_yaml::from_str(raw)
            .map_err(|e| ContentError::Config(format!("malformed source table: {e}")))?;
        Self::from_descriptors(descriptors)
    }

    pub fn from_descriptors(descriptors: Vec<SourceDescriptor>) -> Result<Self, ContentError> {
        let mut sources = BTreeMap::new();
        for descriptor in descriptors {
            if descriptor.id.trim().is_empty() {
                return Err(ContentError::Config("source with blank id".to_string()));
            }
            if descriptor.retrieval_methods.is_empty() {
                return Err(ContentError::Config(format!(
                    "source {} has no retrieval methods",
                    descriptor.id
                )));
            }
            debug!(id = %descriptor.id, methods = ?descriptor.retrieval_methods, "Registering source");
            if let Some(previous) = sources.insert(descriptor.id.clone(), descriptor) {
                return Err(ContentError::Config(format!("duplicate source id {}", previous.id)));
            }
        }
        Ok(Self { sources })
    }

    pub fn get(&self, id: &str) -> Option<&SourceDescriptor> {
        self.sources.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MethodTag;

    #[test]
    fn test_builtin_table_loads() {
        let table = SourceTable::builtin().unwrap();
        assert!(table.len() >= 15);
        let nyt = table.get("nytimes.com").unwrap();
        assert_eq!(nyt.display_name, "The New York Times");
        assert_eq!(nyt.retrieval_methods[0], MethodTag::Archive);
        assert!(table.get("newyorker.com").unwrap().direct);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = "- {id: a.com, name: A, methods: [ARCHIVE]}\n- {id: a.com, name: B, methods: [NONE]}\n";
        let err = SourceTable::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ContentError::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_empty_methods_rejected() {
        let yaml = "- {id: a.com, name: A, methods: []}\n";
        assert!(SourceTable::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_method_rejected() {
        let yaml = "- {id: a.com, name: A, methods: [BING]}\n";
        assert!(SourceTable::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let config = MirrorConfig::default().with_credentials(Some("key".to_string()), None);
        assert!(config.credentials.is_none());

        let config = MirrorConfig::default()
            .with_credentials(Some("key".to_string()), Some("cx".to_string()));
        assert_eq!(
            config.credentials,
            Some(SearchCredentials {
                api_key: "key".to_string(),
                engine_id: "cx".to_string(),
            })
        );
    }
}
