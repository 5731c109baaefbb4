//! The Atlantic.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "theatlantic.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - The Atlantic"],
    headline_selectors: &["h1[class^='ArticleTitle']", "h1.c-article-header__hed"],
    body_selectors: &["section[data-event-module='article body']", "div[class^='ArticleBody_root']"],
    drop: &[
        "[class^='ArticleInlineAd']",
        "[class^='ArticleRelatedContentModule']",
        "[class^='ArticleNewsletter']",
        "gpt-ad",
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
    fn test_drops_inline_ads() {
        let page = r#"<html><head><title>The Case Against Busyness - The Atlantic</title></head><body>
          <section data-event-module="article body"><div class="ArticleBody_root__x">
            <p class="ArticleParagraph_root__y">We are all so busy.</p>
            <div class="ArticleInlineAd_root__z"><gpt-ad></gpt-ad></div>
            <div class="ArticleRelatedContentModule_root__q">Related</div>
            <p class="ArticleParagraph_root__y">Maybe too busy.</p></div></section>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "The Case Against Busyness");
        assert!(result.body_html.contains("We are all so busy."));
        assert!(result.body_html.contains("Maybe too busy."));
        assert!(!result.body_html.contains("gpt-ad"));
        assert!(!result.body_html.contains("Related"));
    }
}
