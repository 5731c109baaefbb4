//! Content orchestration: resolve → fetch → extract → post-process, with
//! sequential fallback across retrieval methods.
//!
//! One request walks a small state machine:
//!
//! ```text
//! Pending(i) ─▶ Resolving ─▶ Fetching ─▶ Extracting ─▶ Success
//!     ▲            │             │            │
//!     │            └─────────────┴────────────┴─▶ on_failure
//!     │                                            │
//!     │              RetryOne(url without '/') ◀───┤ (once, url ends in '/')
//!     │                   │                        │
//!     │                   └─▶ Resolving            ▼
//!     └──────────────────────────────────────── Failed(i) ─▶ Pending(i+1) | Exhausted
//! ```
//!
//! Methods are tried strictly in order and the first success wins. Every
//! method starts from the request's original url; the trailing-slash edit
//! only applies to that method's single retry.

use crate::config::{ServiceConfig, SourceTable};
use crate::error::ContentError;
use crate::extractors::ExtractorRegistry;
use crate::fetch::{build_client, fetch_html};
use crate::mirror::MirrorResolver;
use crate::models::{ExtractionRequest, ExtractionResult, MethodTag};
use crate::postprocess::post_process;
use crate::utils::{is_http_url, strip_trailing_slash};
use reqwest::Client;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};

/// When a failed method earns its one trailing-slash retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Retry after any per-method failure.
    #[default]
    AnyFailure,
    /// Retry only when mirror resolution failed.
    MirrorOnly,
}

impl FromStr for RetryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "any-failure" | "any" => Ok(RetryPolicy::AnyFailure),
            "mirror-only" | "mirror" => Ok(RetryPolicy::MirrorOnly),
            other => Err(format!("unknown retry policy: {other}")),
        }
    }
}

impl RetryPolicy {
    /// Transition taken when the method at `method_index` fails on `url`.
    pub fn on_failure(
        &self,
        method_index: usize,
        url: &str,
        retried: bool,
        error: &ContentError,
    ) -> AttemptState {
        // Settings and contract errors are not fixed by dropping the slash.
        let eligible = error.is_recoverable()
            && match self {
                RetryPolicy::AnyFailure => true,
                RetryPolicy::MirrorOnly => matches!(error, ContentError::MirrorUnavailable { .. }),
            };
        match strip_trailing_slash(url) {
            Some(stripped) if eligible && !retried => AttemptState::RetryOne {
                method_index,
                stripped_url: stripped.to_string(),
            },
            _ => AttemptState::Failed { method_index },
        }
    }
}

/// Where a request currently is in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    Pending { method_index: usize },
    Resolving { method_index: usize, url: String, retried: bool },
    Fetching { method_index: usize, url: String, mirror_url: String, retried: bool },
    Extracting { method_index: usize, url: String, html: String, retried: bool },
    RetryOne { method_index: usize, stripped_url: String },
    Failed { method_index: usize },
    Success(ExtractionResult),
    Exhausted,
}

/// The core entry point: turns `(source, url, methods)` into an article.
///
/// Holds only immutable state, so one instance can serve concurrent
/// requests behind an `Arc`.
#[derive(Debug)]
pub struct ContentService {
    sources: SourceTable,
    registry: ExtractorRegistry,
    resolver: MirrorResolver,
    client: Client,
    config: ServiceConfig,
}

impl ContentService {
    /// Build a service, checking that every described source has an extractor.
    ///
    /// # Errors
    ///
    /// [`ContentError::Config`] if a source lacks an extractor or the HTTP
    /// client cannot be built.
    pub fn new(
        sources: SourceTable,
        registry: ExtractorRegistry,
        config: ServiceConfig,
    ) -> Result<Self, ContentError> {
        if let Some(missing) = sources.ids().find(|id| !registry.contains(id)) {
            return Err(ContentError::Config(format!("source {missing} has no extractor")));
        }
        let client = build_client()?;
        let resolver = MirrorResolver::new(client.clone(), config.mirror.clone());
        info!(sources = sources.len(), retry_policy = ?config.retry_policy, "Content service ready");
        Ok(Self {
            sources,
            registry,
            resolver,
            client,
            config,
        })
    }

    /// Service over the built-in source table and extractors.
    pub fn with_builtin_sources(config: ServiceConfig) -> Result<Self, ContentError> {
        Self::new(SourceTable::builtin()?, ExtractorRegistry::with_builtin_sources(), config)
    }

    pub fn sources(&self) -> &SourceTable {
        &self.sources
    }

    /// Read an article using the source's configured methods.
    pub async fn read(&self, source_id: &str, url: &str) -> Result<ExtractionResult, ContentError> {
        let descriptor = self
            .sources
            .get(source_id.trim())
            .ok_or_else(|| ContentError::UnknownSource(source_id.to_string()))?;
        let methods = descriptor.effective_methods();
        self.get_content(&descriptor.id, url, &methods).await
    }

    pub async fn get_content_for(&self, request: &ExtractionRequest) -> Result<ExtractionResult, ContentError> {
        self.get_content(&request.source_id, &request.target_url, &request.methods)
            .await
    }

    /// Fetch and extract an article, trying `methods` in order.
    ///
    /// # Arguments
    ///
    /// * `source_id` - Registered source, e.g. `nytimes.com`
    /// * `url` - Absolute http(s) url of the article
    /// * `methods` - Retrieval methods, most reliable first
    ///
    /// # Errors
    ///
    /// - [`ContentError::InvalidRequest`] / [`ContentError::UnknownSource`]
    ///   before any network activity
    /// - [`ContentError::NoArticleFound`] once every method has failed
    #[instrument(level = "info", skip(self))]
    pub async fn get_content(
        &self,
        source_id: &str,
        url: &str,
        methods: &[MethodTag],
    ) -> Result<ExtractionResult, ContentError> {
        let source_id = source_id.trim();
        let url = url.trim();
        if source_id.is_empty() {
            return Err(ContentError::InvalidRequest("source not provided".to_string()));
        }
        if url.is_empty() {
            return Err(ContentError::InvalidRequest("url not provided".to_string()));
        }
        if !is_http_url(url) {
            return Err(ContentError::InvalidRequest(format!("not an http(s) url: {url}")));
        }
        if methods.is_empty() {
            return Err(ContentError::InvalidRequest("no retrieval methods".to_string()));
        }
        let extractor = self
            .registry
            .get(source_id)
            .ok_or_else(|| ContentError::UnknownSource(source_id.to_string()))?;

        let mut state = AttemptState::Pending { method_index: 0 };
        loop {
            state = match state {
                AttemptState::Pending { method_index } => {
                    if method_index < methods.len() {
                        debug!(method = %methods[method_index], method_index, "Trying method");
                        AttemptState::Resolving {
                            method_index,
                            url: url.to_string(),
                            retried: false,
                        }
                    } else {
                        AttemptState::Exhausted
                    }
                }
                AttemptState::Resolving {
                    method_index,
                    url: attempt_url,
                    retried,
                } => {
                    let method = methods[method_index];
                    match self.resolver.resolve(&attempt_url, method, source_id).await {
                        Ok(mirror_url) => AttemptState::Fetching {
                            method_index,
                            url: attempt_url,
                            mirror_url,
                            retried,
                        },
                        Err(e) => self.failed(method, method_index, &attempt_url, retried, e),
                    }
                }
                AttemptState::Fetching {
                    method_index,
                    url: attempt_url,
                    mirror_url,
                    retried,
                } => match fetch_html(&self.client, &mirror_url).await {
                    Ok(html) => AttemptState::Extracting {
                        method_index,
                        url: attempt_url,
                        html,
                        retried,
                    },
                    Err(e) => self.failed(methods[method_index], method_index, &attempt_url, retried, e),
                },
                AttemptState::Extracting {
                    method_index,
                    url: attempt_url,
                    html,
                    retried,
                } => match extractor.extract(&html) {
                    Ok(result) => AttemptState::Success(ExtractionResult {
                        body_html: post_process(
                            &result.body_html,
                            &self.config.display_protocol,
                            &self.config.mirror.mirror_host,
                        ),
                        headline: result.headline,
                    }),
                    Err(e) => self.failed(methods[method_index], method_index, &attempt_url, retried, e),
                },
                AttemptState::RetryOne {
                    method_index,
                    stripped_url,
                } => {
                    info!(method = %methods[method_index], url = %stripped_url, "Retrying without trailing slash");
                    AttemptState::Resolving {
                        method_index,
                        url: stripped_url,
                        retried: true,
                    }
                }
                AttemptState::Failed { method_index } => AttemptState::Pending {
                    method_index: method_index + 1,
                },
                AttemptState::Success(result) => {
                    info!(
                        headline = %result.headline,
                        body_bytes = result.body_html.len(),
                        "Extracted article"
                    );
                    return Ok(result);
                }
                AttemptState::Exhausted => {
                    error!(methods = ?methods, "All retrieval methods exhausted");
                    return Err(ContentError::NoArticleFound {
                        source_id: source_id.to_string(),
                        url: url.to_string(),
                    });
                }
            };
        }
    }

    fn failed(
        &self,
        method: MethodTag,
        method_index: usize,
        url: &str,
        retried: bool,
        error: ContentError,
    ) -> AttemptState {
        warn!(%method, %url, retried, error = %error, "Retrieval method failed");
        self.config
            .retry_policy
            .on_failure(method_index, url, retried, &error)
    }
}
