//! The Washington Post.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "washingtonpost.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - The Washington Post"],
    headline_selectors: &["h1[data-qa='headline']", "h1#main-content"],
    body_selectors: &["div.article-body", "div[data-qa='article-body']"],
    drop: &[
        "[data-qa='subscribe-promo']",
        "[data-qa='article-body-ad']",
        "[data-qa='interstitial-link']",
        ".hide-for-print",
    ],
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Extractor;

    #[test]
    fn test_extracts_each_body_block_once() {
        let page = r#"<html><head><title>Storm Hits Coast - The Washington Post</title></head><body>
          <div class="article-body" data-qa="article-body"><p>The storm made landfall.</p></div>
          <div data-qa="subscribe-promo">Subscribe for $1</div>
          <div class="article-body"><p>Thousands lost power.</p>
            <div data-qa="interstitial-link">Read more</div></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "Storm Hits Coast");
        assert_eq!(result.body_html.matches("made landfall").count(), 1);
        assert!(result.body_html.contains("lost power"));
        assert!(!result.body_html.contains("Subscribe"));
        assert!(!result.body_html.contains("Read more"));
    }
}
