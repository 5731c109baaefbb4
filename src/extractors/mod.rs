//! Per-publication extractors turning mirrored HTML into an article.
//!
//! Every source implements [`Extractor`] and is registered under its
//! canonical domain in an [`ExtractorRegistry`]. Adding a source means
//! adding a module and one `register` call; no dispatcher is edited.
//!
//! # Supported Sources
//!
//! | Source | Module | Strategy | Notes |
//! |--------|--------|----------|-------|
//! | nytimes.com | [`nytimes`] | Selectors | `section[name='articleBody']` |
//! | cooking.nytimes.com | [`nyt_cooking`] | Selectors | Ingredients + instructions |
//! | newyorker.com | [`newyorker`] | JSON-LD | Markdown `articleBody` |
//! | bloomberg.com | [`bloomberg`] | Embedded JSON | Content-block renderer |
//! | wsj.com | [`wsj`] | Selectors | Drops ads and podcast players |
//! | washingtonpost.com | [`washingtonpost`] | Selectors | Drops subscribe promos |
//! | economist.com | [`economist`] | Selectors | Paragraph-level body |
//! | ft.com | [`ft`] | Selectors | |
//! | theatlantic.com | [`theatlantic`] | Selectors | Drops inline ads |
//! | wired.com | [`wired`] | Selectors | Promotes `<noscript>` images |
//! | bostonglobe.com | [`bostonglobe`] | Selectors | Decodes `data-src` resizer urls |
//! | latimes.com | [`latimes`] | Selectors | Drops `ps-promo` elements |
//! | businessinsider.com | [`businessinsider`] | Selectors | Decodes JSON `data-srcs` maps |
//! | telegraph.co.uk | [`telegraph`] | Selectors | `<amp-img>` to `<img>` |
//! | theathletic.com | [`theathletic`] | Selectors | |
//! | hbr.org | [`hbr`] | Selectors | Headline from `h1.article-hed` |
//! | foreignpolicy.com | [`foreignpolicy`] | Selectors | |
//!
//! Structural misses leave the field empty; only the JSON decode paths
//! (newyorker, bloomberg) can fail with
//! [`ContentError::ExtractionFailed`].

use crate::error::ContentError;
use crate::models::ExtractionResult;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::fmt;

pub mod selector;

pub mod bloomberg;
pub mod bostonglobe;
pub mod businessinsider;
pub mod economist;
pub mod foreignpolicy;
pub mod ft;
pub mod hbr;
pub mod latimes;
pub mod newyorker;
pub mod nyt_cooking;
pub mod nytimes;
pub mod telegraph;
pub mod theatlantic;
pub mod theathletic;
pub mod washingtonpost;
pub mod wired;
pub mod wsj;

pub use selector::{BodyMode, SelectorExtractor, SelectorRules};

/// Converts one publication's raw mirror HTML into headline + body.
///
/// Implementations never perform network I/O.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<ExtractionResult, ContentError>;
}

impl<F> Extractor for F
where
    F: Fn(&str) -> Result<ExtractionResult, ContentError> + Send + Sync,
{
    fn extract(&self, html: &str) -> Result<ExtractionResult, ContentError> {
        self(html)
    }
}

/// Total mapping from source id to extractor.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<String, Box<dyn Extractor>>,
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("sources", &self.extractors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in publication.
    pub fn with_builtin_sources() -> Self {
        let mut registry = Self::new();
        registry
            .register(nytimes::SOURCE_ID, nytimes::extractor())
            .register(nyt_cooking::SOURCE_ID, nyt_cooking::extractor())
            .register(newyorker::SOURCE_ID, newyorker::NewYorkerExtractor)
            .register(bloomberg::SOURCE_ID, bloomberg::BloombergExtractor)
            .register(wsj::SOURCE_ID, wsj::extractor())
            .register(washingtonpost::SOURCE_ID, washingtonpost::extractor())
            .register(economist::SOURCE_ID, economist::extractor())
            .register(ft::SOURCE_ID, ft::extractor())
            .register(theatlantic::SOURCE_ID, theatlantic::extractor())
            .register(wired::SOURCE_ID, wired::extractor())
            .register(bostonglobe::SOURCE_ID, bostonglobe::extractor())
            .register(latimes::SOURCE_ID, latimes::extractor())
            .register(businessinsider::SOURCE_ID, businessinsider::extractor())
            .register(telegraph::SOURCE_ID, telegraph::extractor())
            .register(theathletic::SOURCE_ID, theathletic::extractor())
            .register(hbr::SOURCE_ID, hbr::extractor())
            .register(foreignpolicy::SOURCE_ID, foreignpolicy::extractor());
        registry
    }

    /// Register (or replace) the extractor for `source_id`.
    pub fn register(&mut self, source_id: impl Into<String>, extractor: impl Extractor + 'static) -> &mut Self {
        self.extractors.insert(source_id.into(), Box::new(extractor));
        self
    }

    pub fn get(&self, source_id: &str) -> Option<&dyn Extractor> {
        self.extractors.get(source_id).map(|e| e.as_ref())
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.extractors.contains_key(source_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }
}

/// Parse a CSS selector, reporting failures against `source_id`.
pub(crate) fn parse_selector(source_id: &str, css: &str) -> Result<Selector, ContentError> {
    Selector::parse(css).map_err(|e| ContentError::extraction(source_id, format!("bad selector {css:?}: {e:?}")))
}

/// `<title>` text with the first occurrence of any known suffix removed.
pub(crate) fn title_without_suffix(document: &Html, suffixes: &[&str]) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    let Some(title) = document.select(&selector).next() else {
        return String::new();
    };
    let mut text = crate::render::collapsed_text(title);
    if let Some(suffix) = suffixes.iter().find(|s| text.contains(*s)) {
        text = text.replacen(suffix, "", 1);
    }
    text.trim().to_string()
}

/// `content` of `<meta property=..>`, e.g. `og:title`.
pub(crate) fn meta_property(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[property='{property}']")).ok()?;
    document
        .select(&selector)
        .filter_map(|m| m.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceTable;

    #[test]
    fn test_every_builtin_source_has_an_extractor() {
        let table = SourceTable::builtin().unwrap();
        let registry = ExtractorRegistry::with_builtin_sources();
        for id in table.ids() {
            assert!(registry.contains(id), "missing extractor for {id}");
        }
        assert_eq!(registry.ids().count(), table.len());
    }

    #[test]
    fn test_closure_extractor_registration() {
        let mut registry = ExtractorRegistry::new();
        registry.register("example.com", |html: &str| -> Result<ExtractionResult, ContentError> {
            Ok(ExtractionResult::new("Example", html.to_uppercase()))
        });
        let result = registry.get("example.com").unwrap().extract("<p>hi</p>").unwrap();
        assert_eq!(result.headline, "Example");
        assert_eq!(result.body_html, "<P>HI</P>");
        assert!(registry.get("other.com").is_none());
    }

    #[test]
    fn test_title_without_suffix() {
        let document = Html::parse_document(
            "<html><head><title>Big Story - The New York Times</title></head></html>",
        );
        assert_eq!(
            title_without_suffix(&document, &[" - The New York Times"]),
            "Big Story"
        );
        assert_eq!(title_without_suffix(&document, &[]), "Big Story - The New York Times");
    }

    #[test]
    fn test_meta_property() {
        let document = Html::parse_document(
            r#"<html><head><meta property="og:title" content=" OG headline "></head></html>"#,
        );
        assert_eq!(meta_property(&document, "og:title").as_deref(), Some("OG headline"));
        assert_eq!(meta_property(&document, "og:image"), None);
    }
}
