//! NYT Cooking recipes: ingredients list followed by the method.

use super::{SelectorExtractor, SelectorRules};

pub const SOURCE_ID: &str = "cooking.nytimes.com";

const RULES: SelectorRules = SelectorRules {
    title_suffixes: &[" - NYT Cooking"],
    headline_selectors: &["h1.recipe-title", "h1[class^='pantry--title']"],
    body_selectors: &[".recipe-ingredients-wrap", ".recipe-instructions"],
    drop: &[".nutrition-tooltip", ".recipe-note-form"],
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
    fn test_extracts_ingredients_and_steps() {
        let page = r#"<html><head><title>Lemon Pasta Recipe - NYT Cooking</title></head><body>
          <section class="recipe-ingredients-wrap"><ul><li>1 lemon</li><li>Pasta</li></ul>
            <div class="nutrition-tooltip">Nutritional analysis</div></section>
          <section class="recipe-instructions"><ol><li>Boil water.</li></ol></section>
        </body></html>"#;
        let result = extractor().extract(page).unwrap();
        assert_eq!(result.headline, "Lemon Pasta Recipe");
        let ingredients = result.body_html.find("1 lemon").unwrap();
        let steps = result.body_html.find("Boil water.").unwrap();
        assert!(ingredients < steps);
        assert!(!result.body_html.contains("Nutritional"));
    }
}
