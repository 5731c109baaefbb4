//! # Paywall Reader
//!
//! Reads news articles from paywalled publications by fetching a mirror of
//! the page (a web-archive snapshot or a search-engine cache copy) and
//! running a per-publication extractor over it.
//!
//! ## Pipeline
//!
//! 1. **Resolve**: turn the article url into a mirror url ([`mirror`])
//! 2. **Fetch**: download the mirror page ([`fetch`])
//! 3. **Extract**: pull headline and body out with the source's extractor ([`extractors`])
//! 4. **Post-process**: rewrite archived image urls to the display protocol ([`postprocess`])
//!
//! Retrieval methods are tried in order; a failed method is retried once
//! without a trailing slash before the next one is attempted
//! ([`orchestrator`]).
//!
//! ## Example
//!
//! ```no_run
//! use paywall_reader::{ContentService, MethodTag, ServiceConfig};
//!
//! # async fn run() -> Result<(), paywall_reader::ContentError> {
//! let service = ContentService::with_builtin_sources(ServiceConfig::default())?;
//! let article = service
//!     .get_content("nytimes.com", "https://www.nytimes.com/2022/07/20/us/story.html", &[MethodTag::Archive])
//!     .await?;
//! println!("{}", article.headline);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod mirror;
pub mod models;
pub mod orchestrator;
pub mod postprocess;
pub mod render;
pub mod utils;

pub use config::{MirrorConfig, SearchCredentials, ServiceConfig, SourceTable};
pub use error::ContentError;
pub use extractors::{Extractor, ExtractorRegistry};
pub use models::{ExtractionRequest, ExtractionResult, MethodTag, SourceDescriptor};
pub use orchestrator::{ContentService, RetryPolicy};
