//! Los Angeles Times.
//!
//! Promotional modules are delivered as `ps-*` custom elements inside the
//! rich-text body and are removed wholesale.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "latimes.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - Los Angeles Times"],
    headline_selectors: &["h1.headline"],
    body_selectors: &["div.rich-text-article-body-content", "div.page-article-body"],
    drop: &[
        "ps-promo",
        "ps-newsletter-signup",
        ".google-dfp-ad-wrapper",
    ],
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}
