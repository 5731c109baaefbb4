//! The Telegraph.
//!
//! Archived copies are frequently the AMP rendition, where images are
//! `<amp-img>` custom elements and ads are `<amp-ad>`.

use super::{SelectorExtractor, SelectorRules};
use crate::render::image_tag;
use scraper::ElementRef;

pub const SOURCE_ID: &str = "telegraph.co.uk";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" | The Telegraph", " - The Telegraph"],
    headline_selectors: &["h1[itemprop='headline name']", "h1.e-headline"],
    body_selectors: &["div[itemprop='articleBody']", "div.articleBodyText"],
    drop: &["amp-ad", ".teaser", "[class*='advert']", "amp-social-share"],
    rewrite: Some(amp_image),
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}

fn amp_image(element: ElementRef<'_>) -> Option<String> {
    if element.value().name() != "amp-img" {
        return None;
    }
    match element.value().attr("src") {
        Some(src) => Some(image_tag(src, element.value().attr("alt"))),
        None => Some(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Extractor;

    #[test]
    fn test_amp_images_become_img() {
        let page = r#"<html><head><title>Budget reaction | The Telegraph</title></head><body>
          <div itemprop="articleBody"><p>The Chancellor spoke.</p>
            <amp-img src="https://www.telegraph.co.uk/img/budget.jpg" alt="Chancellor" width="640" height="360" layout="responsive"><noscript>x</noscript></amp-img>
            <amp-ad type="doubleclick" data-slot="/1/x"></amp-ad>
            <amp-img layout="fill"></amp-img></div>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "Budget reaction");
        assert!(result.body_html.contains(r#"<img src="https://www.telegraph.co.uk/img/budget.jpg" alt="Chancellor">"#));
        assert!(!result.body_html.contains("amp-"));
    }
}
