//! Business Insider.
//!
//! Lazy images carry a JSON-encoded source map in `data-srcs`, keyed by
//! image url. The first url becomes the image's `src`.

use super::{SelectorExtractor, SelectorRules};
use crate::render::image_tag;
use scraper::ElementRef;
use serde_json::{Map, Value};

pub const SOURCE_ID: &str = "businessinsider.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - Business Insider", " | Business Insider"],
    headline_selectors: &["h1.post-headline"],
    body_selectors: &["#piano-inline-content-wrapper", "section.post-content"],
    drop: &[
        ".in-post-sticky",
        ".inline-newsletter-signup",
        "[class*='ad-wrapper']",
        ".post-content-bottom",
    ],
    rewrite: Some(lazy_image),
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}

fn lazy_image(element: ElementRef<'_>) -> Option<String> {
    if element.value().name() != "img" {
        return None;
    }
    let srcs = element.value().attr("data-srcs")?;
    let src = first_source(srcs)?;
    Some(image_tag(&src, element.value().attr("alt")))
}

fn first_source(data_srcs: &str) -> Option<String> {
    let map: Map<String, Value> = serde_json::from_str(data_srcs).ok()?;
    map.keys().find(|k| !k.trim().is_empty()).cloned()
}
