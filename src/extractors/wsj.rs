//! The Wall Street Journal.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "wsj.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - WSJ", " - The Wall Street Journal"],
    headline_selectors: &["h1.wsj-article-headline", "h1[class*='StyledHeadline']"],
    body_selectors: &["section[class^='articleBody']", "div.article-content"],
    drop: &[
        ".wsj-ad",
        "[class*='snippet-promotion']",
        ".media-object-podcast",
        "[data-type='inset'][data-subtype='newsletter']",
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
    fn test_extracts_article_body() {
        let page = r#"<html><head><title>Fed Holds Rates Steady - WSJ</title></head><body>
          <section class="articleBody e1xyz"><p>The Federal Reserve held rates.</p>
            <div class="wsj-ad dynamic"><span>ADVERTISEMENT</span></div>
            <div class="media-object-podcast">Listen</div>
            <p style="font-size:18px">Officials signaled patience.</p></section>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "Fed Holds Rates Steady");
        assert!(result.body_html.contains("held rates"));
        assert!(result.body_html.contains("<p>Officials signaled patience.</p>"));
        assert!(!result.body_html.contains("ADVERTISEMENT"));
        assert!(!result.body_html.contains("Listen"));
    }
}
