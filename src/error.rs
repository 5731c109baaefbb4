//! Error taxonomy for the extraction pipeline.
//!
//! Per-method failures ([`ContentError::MirrorUnavailable`],
//! [`ContentError::Fetch`], [`ContentError::ExtractionFailed`]) are caught
//! inside the orchestrator loop and only drive the fallback policy. The
//! caller only ever sees [`ContentError::NoArticleFound`] or one of the
//! input/configuration errors raised before any network activity.

use crate::models::MethodTag;
use thiserror::Error;

/// Everything that can go wrong between a `(source, url)` request and a
/// rendered article.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The caller supplied a blank source id, a blank or unparseable url,
    /// or an empty method list.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The source id is not in the descriptor table or has no extractor.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// No usable mirror: the lookup failed, returned nothing, or had no snapshot.
    #[error("no mirror available via {method}: {reason}")]
    MirrorUnavailable { method: MethodTag, reason: String },

    /// Fetching the resolved page failed at the transport or status level.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// An extractor's mandatory decode step threw.
    #[error("extraction failed for {source_id}: {reason}")]
    ExtractionFailed { source_id: String, reason: String },

    /// Every method was tried and none produced an article.
    #[error("no article found for {source_id} at {url}")]
    NoArticleFound { source_id: String, url: String },

    /// The source table or runtime settings are invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ContentError {
    /// Whether this failure should feed the per-method fallback policy
    /// rather than abort the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ContentError::MirrorUnavailable { .. }
                | ContentError::Fetch { .. }
                | ContentError::ExtractionFailed { .. }
        )
    }

    pub(crate) fn mirror(method: MethodTag, reason: impl Into<String>) -> Self {
        ContentError::MirrorUnavailable {
            method,
            reason: reason.into(),
        }
    }

    pub(crate) fn extraction(source_id: &str, reason: impl Into<String>) -> Self {
        ContentError::ExtractionFailed {
            source_id: source_id.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(ContentError::mirror(MethodTag::Archive, "no snapshot").is_recoverable());
        assert!(ContentError::extraction("bloomberg.com", "bad json").is_recoverable());
        assert!(
            ContentError::Fetch {
                url: "https://example.com".to_string(),
                reason: "HTTP 404".to_string(),
            }
            .is_recoverable()
        );
        assert!(!ContentError::InvalidRequest("empty url".to_string()).is_recoverable());
        assert!(
            !ContentError::NoArticleFound {
                source_id: "nytimes.com".to_string(),
                url: "https://nytimes.com/a".to_string(),
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_display_mentions_method() {
        let e = ContentError::mirror(MethodTag::GoogleCache, "no results");
        assert_eq!(e.to_string(), "no mirror available via GOOGLE_CACHE: no results");
    }
}
