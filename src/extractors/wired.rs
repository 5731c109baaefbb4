//! WIRED.
//!
//! Responsive images render a `data:` placeholder `<img>` and keep the real
//! image inside a sibling `<noscript>`. The placeholder is dropped and the
//! `<noscript>` image promoted.

use super::{SelectorExtractor, SelectorRules};
use crate::render::image_tag;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

pub const SOURCE_ID: &str = "wired.com";

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" | WIRED"],
    headline_selectors: &["h1[data-testid='ContentHeaderHed']"],
    body_selectors: &["div[class^='body__inner-container']", "div.article__body"],
    drop: &[
        "[class*='ad__slot']",
        "[class^='ConsumerMarketingUnit']",
        "[data-testid='RecircMostPopular']",
    ],
    rewrite: Some(responsive_image),
    ..SelectorRules::new(SOURCE_ID)
};

pub fn extractor() -> SelectorExtractor {
    SelectorExtractor::new(RULES)
}

fn responsive_image(element: ElementRef<'_>) -> Option<String> {
    match element.value().name() {
        "noscript" => Some(noscript_image(element).unwrap_or_default()),
        "img" if element.value().attr("src").is_some_and(|s| s.starts_with("data:")) => {
            Some(String::new())
        }
        _ => None,
    }
}

/// The image inside a `<noscript>`, whether parsed as elements or raw text.
fn noscript_image(noscript: ElementRef<'_>) -> Option<String> {
    if let Some(img) = noscript.select(&IMG).next() {
        return img
            .value()
            .attr("src")
            .map(|src| image_tag(src, img.value().attr("alt")));
    }
    let raw: String = noscript.text().collect();
    let fragment = Html::parse_fragment(&raw);
    let img = fragment.select(&IMG).next()?;
    img.value()
        .attr("src")
        .map(|src| image_tag(src, img.value().attr("alt")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Extractor;

    #[test]
    fn test_promotes_noscript_images() {
        let page = r#"<html><head><title>The Chip Wars Heat Up | WIRED</title></head><body>
          <div class="body__inner-container"><p>Fabs are expensive.</p>
            <picture><img class="responsive-image__image" src="data:image/gif;base64,AAAA" alt=""></picture>
            <noscript><img src="https://media.wired.com/photos/chip.jpg" alt="A chip"></noscript>
            <div class="ad__slot ad__slot--inline">ad</div>
          </div></body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "The Chip Wars Heat Up");
        assert!(result.body_html.contains("Fabs are expensive."));
        assert!(result.body_html.contains(r#"<img src="https://media.wired.com/photos/chip.jpg" alt="A chip">"#));
        assert!(!result.body_html.contains("data:image"));
        assert!(!result.body_html.contains("noscript"));
    }
}
