//! Rule-driven extractor shared by every markup-based source.
//!
//! A source describes its markup as a [`SelectorRules`] value: where the
//! headline lives, which containers hold the body, what to drop, which
//! attributes to strip and an optional element rewrite hook. The engine
//! turns those rules into an [`ExtractionResult`].

use super::{meta_property, parse_selector, title_without_suffix, Extractor};
use crate::error::ContentError;
use crate::models::ExtractionResult;
use crate::render::{collapsed_text, Cleanup, RewriteFn};
use scraper::{ElementRef, Html};
use tracing::debug;

/// How a matched body container is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    /// Children only (the container is a wrapper div/section).
    #[default]
    Inner,
    /// The element itself (the selector matches paragraphs).
    Outer,
}

/// Markup knowledge for one publication.
#[derive(Debug, Clone, Copy)]
pub struct SelectorRules {
    pub source_id: &'static str,
    /// Suffixes stripped from `<title>`, e.g. `" - The New York Times"`.
    pub title_suffixes: &'static [&'static str],
    /// Tried when `<title>` is missing or empty.
    pub headline_selectors: &'static [&'static str],
    /// Try `headline_selectors` before `<title>`.
    pub prefer_headline_selectors: bool,
    /// Every match of every selector, in rule order; nested matches are skipped.
    pub body_selectors: &'static [&'static str],
    pub body_mode: BodyMode,
    pub drop: &'static [&'static str],
    pub strip_attributes: &'static [&'static str],
    pub rewrite: Option<RewriteFn>,
}

impl SelectorRules {
    pub const fn new(source_id: &'static str) -> Self {
        Self {
            source_id,
            title_suffixes: &[],
            headline_selectors: &[],
            prefer_headline_selectors: false,
            body_selectors: &[],
            body_mode: BodyMode::Inner,
            drop: &[],
            strip_attributes: &["style"],
            rewrite: None,
        }
    }
}

/// [`Extractor`] backed by [`SelectorRules`].
#[derive(Debug, Clone, Copy)]
pub struct SelectorExtractor {
    rules: SelectorRules,
}

impl SelectorExtractor {
    pub const fn new(rules: SelectorRules) -> Self {
        Self { rules }
    }

    fn headline(&self, document: &Html) -> Result<String, ContentError> {
        if self.rules.prefer_headline_selectors {
            if let Some(text) = self.headline_from_selectors(document)? {
                return Ok(text);
            }
        }
        let from_title = title_without_suffix(document, self.rules.title_suffixes);
        if !from_title.is_empty() {
            return Ok(from_title);
        }
        if !self.rules.prefer_headline_selectors {
            if let Some(text) = self.headline_from_selectors(document)? {
                return Ok(text);
            }
        }
        Ok(meta_property(document, "og:title").unwrap_or_default())
    }

    fn headline_from_selectors(&self, document: &Html) -> Result<Option<String>, ContentError> {
        for css in self.rules.headline_selectors {
            let selector = parse_selector(self.rules.source_id, css)?;
            if let Some(text) = document
                .select(&selector)
                .map(collapsed_text)
                .find(|t| !t.is_empty())
            {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    fn body(&self, document: &Html) -> Result<String, ContentError> {
        let source_id = self.rules.source_id;
        let cleanup = Cleanup {
            drop: self
                .rules
                .drop
                .iter()
                .map(|css| parse_selector(source_id, css))
                .collect::<Result<_, _>>()?,
            strip_attributes: self.rules.strip_attributes.to_vec(),
            rewrite: self.rules.rewrite,
        };

        let mut containers: Vec<ElementRef<'_>> = Vec::new();
        for css in self.rules.body_selectors {
            let selector = parse_selector(source_id, css)?;
            for element in document.select(&selector) {
                let nested = containers.iter().any(|c| {
                    *c == element || element.ancestors().any(|a| a.id() == c.id())
                });
                if nested {
                    continue;
                }
                // An outer match takes the place of the first container it wraps.
                let wraps = |c: &ElementRef<'_>| c.ancestors().any(|a| a.id() == element.id());
                match containers.iter().position(|c| wraps(c)) {
                    Some(index) => {
                        containers.retain(|c| !wraps(c));
                        containers.insert(index.min(containers.len()), element);
                    }
                    None => containers.push(element),
                }
            }
        }
        debug!(source_id, containers = containers.len(), "Matched body containers");

        let body: String = containers
            .into_iter()
            .map(|container| match self.rules.body_mode {
                BodyMode::Inner => cleanup.inner_html(container),
                BodyMode::Outer => cleanup.outer_html(container),
            })
            .collect();
        Ok(body.trim().to_string())
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, html: &str) -> Result<ExtractionResult, ContentError> {
        let document = Html::parse_document(html);
        let headline = self.headline(&document)?;
        let body_html = self.body(&document)?;
        Ok(ExtractionResult { headline, body_html })
    }
}
