//! Foreign Policy.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "foreignpolicy.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" – Foreign Policy", " - Foreign Policy"],
    headline_selectors: &["h1.hed"],
    body_selectors: &["div.post-content-main", "div.content-gated--main-article"],
    drop: &[
        ".fp_choose_placement_related_posts",
        ".newsletter-signup",
        ".ad-container",
        ".post-content-main > .wp-block-buttons",
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
    fn test_extracts_article() {
        let page = r#"<html><head><title>The New Cold War – Foreign Policy</title></head><body>
          <div class="post-content-main"><p>Tensions are rising.</p>
            <div class="fp_choose_placement_related_posts">More from FP</div></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "The New Cold War");
        assert!(result.body_html.contains("Tensions are rising."));
        assert!(!result.body_html.contains("More from FP"));
    }
}
