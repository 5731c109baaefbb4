//! Mirror resolution: turn a paywalled url into a reachable copy.
//!
//! Two lookups are supported:
//!
//! | Method | Lookup | Mirror url |
//! |--------|--------|------------|
//! | `ARCHIVE` | `GET {archive}?url=<url>` | `archived_snapshots.closest.url` |
//! | `GOOGLE_CACHE` | `GET {search}?cx=..&key=..&q=<slug>&siteSearch=<site>` | `{cache}/search?q=cache:<cacheId>:<site>` |
//!
//! `NONE` bypasses the resolver and returns the url unchanged. Both lookups
//! are query-insensitive: the query string is stripped before the request.
//! Nothing is cached; each call performs exactly one outbound request.

use crate::config::MirrorConfig;
use crate::error::ContentError;
use crate::models::MethodTag;
use crate::utils::{last_path_segment, sanitize_url, truncate_for_log};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    #[serde(default)]
    cache_id: Option<String>,
}

/// Resolves `(url, method)` pairs to mirror urls.
#[derive(Debug, Clone)]
pub struct MirrorResolver {
    client: Client,
    config: MirrorConfig,
}

impl MirrorResolver {
    pub fn new(client: Client, config: MirrorConfig) -> Self {
        Self { client, config }
    }

    /// Resolve a mirror url for `url` using `method`.
    ///
    /// # Arguments
    ///
    /// * `url` - The original article url
    /// * `method` - Which lookup to run
    /// * `site` - Site filter for the search-engine lookup (the source's domain)
    ///
    /// # Errors
    ///
    /// [`ContentError::MirrorUnavailable`] if the lookup request fails, its
    /// body cannot be decoded, or it yields no snapshot / search result.
    #[instrument(level = "info", skip(self))]
    pub async fn resolve(&self, url: &str, method: MethodTag, site: &str) -> Result<String, ContentError> {
        match method {
            MethodTag::None => Ok(url.to_string()),
            MethodTag::Archive => self.archive_snapshot(url).await,
            MethodTag::GoogleCache => self.search_cache(url, site).await,
        }
    }

    async fn archive_snapshot(&self, url: &str) -> Result<String, ContentError> {
        let method = MethodTag::Archive;
        let lookup = sanitize_url(url);
        debug!(%lookup, endpoint = %self.config.archive_endpoint, "Checking archive availability");

        let response = self
            .client
            .get(&self.config.archive_endpoint)
            .query(&[("url", lookup)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ContentError::mirror(method, format!("unable to check url: {e}")))?;
        let body = response
            .text()
            .await
            .map_err(|e| ContentError::mirror(method, format!("unreadable response: {e}")))?;
        if body.trim().is_empty() {
            return Err(ContentError::mirror(method, "empty availability response"));
        }

        let parsed: AvailabilityResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_for_log(&body, 200), "Malformed availability response");
            ContentError::mirror(method, format!("malformed availability response: {e}"))
        })?;

        match parsed.archived_snapshots.closest {
            Some(snapshot) if !snapshot.url.trim().is_empty() => {
                info!(snapshot = %snapshot.url, "Found archive snapshot");
                Ok(snapshot.url)
            }
            _ => Err(ContentError::mirror(method, "checked url but no snapshot available")),
        }
    }

    async fn search_cache(&self, url: &str, site: &str) -> Result<String, ContentError> {
        let method = MethodTag::GoogleCache;
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or_else(|| ContentError::mirror(method, "search credentials not configured"))?;

        let term = last_path_segment(sanitize_url(url));
        if term.is_empty() {
            return Err(ContentError::mirror(method, "url has no final path segment to search for"));
        }
        debug!(%term, %site, "Searching for cached copy");

        let response = self
            .client
            .get(&self.config.search_endpoint)
            .query(&[
                ("cx", credentials.engine_id.as_str()),
                ("key", credentials.api_key.as_str()),
                ("q", term),
                ("siteSearch", site),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ContentError::mirror(method, format!("search request failed: {e}")))?;
        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ContentError::mirror(method, format!("malformed search response: {e}")))?;

        let cache_id = parsed
            .items
            .into_iter()
            .next()
            .and_then(|item| item.cache_id)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ContentError::mirror(method, "search returned no cached results"))?;

        let cache_url = self.cache_url(&cache_id, site);
        info!(%cache_url, "Built cache url");
        Ok(cache_url)
    }

    /// Cache-proxy url for a search result's cache id on `site`.
    pub fn cache_url(&self, cache_id: &str, site: &str) -> String {
        format!(
            "{}/search?q=cache:{}:{}",
            self.config.cache_base.trim_end_matches('/'),
            urlencoding::encode(cache_id),
            site
        )
    }
}
