//! The New York Times.
//!
//! Archived article pages keep the server-rendered body inside
//! `section[name='articleBody']`, interleaved with ad slots and inline
//! newsletter prompts.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "nytimes.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - The New York Times"],
    headline_selectors: &["h1[data-testid='headline']"],
    body_selectors: &["section[name='articleBody']"],
    drop: &[
        "div[id^='story-ad']",
        "div[data-testid='inline-message']",
        "div[data-testid='brand-bar']",
        "#bottom-wrapper",
    ],
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}
