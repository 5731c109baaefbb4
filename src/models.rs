//! Data models for sources, retrieval methods, requests and extracted articles.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`MethodTag`]: How a mirror of a page is located
//! - [`SourceDescriptor`]: Static metadata for one supported publication
//! - [`ExtractionRequest`]: One `(source, url, methods)` request
//! - [`ExtractionResult`]: The headline and body HTML handed back to the caller
//!
//! Descriptors use the same field names as the YAML source table, hence the
//! `name`/`methods` renames.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy used to locate a mirror of a page.
///
/// Serialized as `NONE`, `ARCHIVE` and `GOOGLE_CACHE` to match the source
/// table and the CLI `--method` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodTag {
    /// No mirror: fetch the original url as-is.
    None,
    /// Closest web-archive snapshot.
    Archive,
    /// Search-engine cache copy.
    GoogleCache,
}

impl MethodTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodTag::None => "NONE",
            MethodTag::Archive => "ARCHIVE",
            MethodTag::GoogleCache => "GOOGLE_CACHE",
        }
    }
}

impl fmt::Display for MethodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodTag {
    type Err = String;

    /// Parse a method tag, ignoring case and accepting `-` for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "NONE" | "DIRECT" => Ok(MethodTag::None),
            "ARCHIVE" => Ok(MethodTag::Archive),
            "GOOGLE_CACHE" => Ok(MethodTag::GoogleCache),
            other => Err(format!("unknown retrieval method: {other}")),
        }
    }
}

/// Static metadata for one supported publication.
///
/// Loaded once at startup from the source table and never mutated.
///
/// # Fields
///
/// * `id` - Canonical domain, also the extractor registry key
/// * `display_name` - Human-readable publication name
/// * `retrieval_methods` - Methods to try, most reliable first; never empty
/// * `direct` - Whether the origin serves the full article without a mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "methods")]
    pub retrieval_methods: Vec<MethodTag>,
    #[serde(default)]
    pub direct: bool,
}

impl SourceDescriptor {
    /// The ordered methods the orchestrator should try for this source.
    ///
    /// Direct sources get an implicit leading [`MethodTag::None`] unless
    /// their table entry already lists it.
    pub fn effective_methods(&self) -> Vec<MethodTag> {
        let mut methods = Vec::with_capacity(self.retrieval_methods.len() + 1);
        if self.direct && !self.retrieval_methods.contains(&MethodTag::None) {
            methods.push(MethodTag::None);
        }
        methods.extend(self.retrieval_methods.iter().copied());
        methods
    }
}

/// A single extraction request. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub source_id: String,
    pub target_url: String,
    pub methods: Vec<MethodTag>,
}

impl ExtractionRequest {
    pub fn new(source_id: impl Into<String>, target_url: impl Into<String>, methods: Vec<MethodTag>) -> Self {
        Self {
            source_id: source_id.into(),
            target_url: target_url.into(),
            methods,
        }
    }
}

/// Headline and body HTML produced by an extractor.
///
/// Either field may be empty when the source's markup lacks that element;
/// that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub headline: String,
    pub body_html: String,
}

impl ExtractionResult {
    pub fn new(headline: impl Into<String>, body_html: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            body_html: body_html.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headline.trim().is_empty() && self.body_html.trim().is_empty()
    }
}
