//! Harvard Business Review.
//!
//! HBR titles carry no stable suffix, so the article headline element is
//! preferred and `<title>` is only used with known suffixes removed.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "hbr.org";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" | Harvard Business Review", " - Harvard Business Review"],
    headline_selectors: &["h1.article-hed", "h1.hed"],
    prefer_headline_selectors: true,
    body_selectors: &["div.article-body", "div.content-area .standard"],
    drop: &[".newsletter-signup", ".related-topics", "[class*='in-article-promo']"],
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
        let page = r#"<html><head><title>How to Run a Meeting | Harvard Business Review</title></head><body>
          <h1 class="article-hed">How to Run a Meeting</h1>
          <div class="article-body"><p>Start with an agenda.</p>
            <div class="newsletter-signup">Get the newsletter</div></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "How to Run a Meeting");
        assert!(result.body_html.contains("Start with an agenda."));
        assert!(!result.body_html.contains("newsletter"));
    }

    #[test]
    fn test_headline_element_preferred_over_title() {
        let page = r#"<html><head><title>How to Run a Meeting</title></head><body>
          <h1 class="article-hed">How to Run a Great Meeting</h1>
          <div class="article-body"><p>Start with an agenda.</p></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "How to Run a Great Meeting");
    }

    #[test]
    fn test_title_used_when_headline_element_missing() {
        let page = r#"<html><head><title>Managing Up | Harvard Business Review</title></head><body>
          <div class="article-body"><p>Know your boss.</p></div>
        </body></html>"#;
        assert_eq!(extractor().extract(page).unwrap().headline, "Managing Up");
    }
}
