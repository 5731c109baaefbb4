//! Financial Times.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "ft.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" | Financial Times", " | FT"],
    headline_selectors: &["h1.o-topper__headline", "blockquote.o-topper__standfirst"],
    body_selectors: &["div.article-body", "div#article-body"],
    drop: &[
        ".o-ads",
        "pg-slot",
        "[data-component='newsletter-signup']",
        ".n-content-recommended",
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
        let page = r#"<html><head><title>Markets rally on jobs data | Financial Times</title></head><body>
          <div class="article-body" id="article-body"><p>Stocks rose.</p>
            <pg-slot><div class="o-ads">ad</div></pg-slot>
            <aside class="n-content-recommended">Recommended</aside>
            <p>Bonds fell.</p></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "Markets rally on jobs data");
        assert!(result.body_html.contains("Stocks rose."));
        assert!(result.body_html.contains("Bonds fell."));
        assert!(!result.body_html.contains("Recommended"));
        assert!(!result.body_html.contains("pg-slot"));
    }
}
