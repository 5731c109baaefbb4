//! The Athletic.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "theathletic.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - The Athletic"],
    headline_selectors: &["h1[class*='headline']", "h1"],
    body_selectors: &["div.article-content-container", "div.bodytext1"],
    drop: &[".ad-container", "[class*='PaywallPromo']", ".article-share-toolbar"],
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}
