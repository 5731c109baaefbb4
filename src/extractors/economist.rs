//! The Economist.
//!
//! Body text is rendered as sibling `<p>` elements with no single wrapper,
//! so paragraphs are matched directly and serialized with their tags.

use super::{BodyMode, SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "economist.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" | The Economist"],
    headline_selectors: &["h1[class*='headline']", "h1"],
    body_selectors: &["p[class^='article__body-text']", "p[data-component='paragraph']"],
    body_mode: BodyMode::Outer,
    strip_attributes: &["style", "class", "data-component"],
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}
