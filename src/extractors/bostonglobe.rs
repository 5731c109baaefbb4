//! The Boston Globe.
//!
//! Images are lazy-loaded through the Arc resizer: `data-src` points at
//! `/resizer/...?...&url=<percent-encoded original>`. The original is
//! decoded out of the query string and emitted as a plain `<img>`.

use super::{SelectorExtractor, SelectorRules};
use crate::render::image_tag;
use scraper::ElementRef;
use url::Url;

pub const SOURCE_ID: &str = "bostonglobe.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - The Boston Globe"],
    headline_selectors: &["h1.headline", "h1[class*='headline']"],
    body_selectors: &["div.article_content", "div[data-testid='article-body']"],
    drop: &[".inline_ad", ".newsletter_signup", "div[class*='ad_container']"],
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
    let data_src = element.value().attr("data-src")?;
    Some(image_tag(&original_image_url(data_src), element.value().attr("alt")))
}

/// The `url` query parameter of a resizer url, or the url itself.
fn original_image_url(data_src: &str) -> String {
    let absolute = if data_src.starts_with("//") {
        format!("https:{data_src}")
    } else {
        data_src.to_string()
    };
    Url::parse(&absolute)
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|original| !original.is_empty())
        .unwrap_or(absolute)
}
