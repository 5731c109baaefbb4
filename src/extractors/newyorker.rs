//! The New Yorker.
//!
//! The article ships as JSON-LD (`script[type='application/ld+json']`) with
//! a Markdown `articleBody`. Some pages emit JSON that fails to parse after
//! the `keywords` field; those are repaired by cutting the object there and
//! closing it, which keeps `headline` and `articleBody` intact.

use super::Extractor;
use crate::error::ContentError;
use crate::models::ExtractionResult;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const SOURCE_ID: &str = "newyorker.com";

static LD_JSON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[type='application/ld+json']").unwrap());

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LdArticle {
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    article_body: Option<String>,
}

/// JSON-LD based extractor for newyorker.com.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewYorkerExtractor;

impl Extractor for NewYorkerExtractor {
    fn extract(&self, html: &str) -> Result<ExtractionResult, ContentError> {
        let document = Html::parse_document(html);
        let scripts: Vec<String> = document
            .select(&LD_JSON)
            .map(|script| script.text().collect())
            .collect();
        if scripts.is_empty() {
            return Err(ContentError::extraction(SOURCE_ID, "no JSON-LD script tag"));
        }

        let mut decoded_any = false;
        for raw in &scripts {
            let Some(value) = decode_ld_json(raw) else {
                continue;
            };
            decoded_any = true;
            if let Some(article) = find_article(value) {
                let body = article.article_body.unwrap_or_default();
                return Ok(ExtractionResult {
                    headline: article.headline.unwrap_or_default().trim().to_string(),
                    body_html: markdown_to_html(&body),
                });
            }
        }

        if decoded_any {
            debug!(scripts = scripts.len(), "JSON-LD present but no article object");
            Ok(ExtractionResult::default())
        } else {
            Err(ContentError::extraction(SOURCE_ID, "malformed JSON-LD"))
        }
    }
}

fn decode_ld_json(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "JSON-LD did not parse; trying keyword truncation");
            let head = raw.split(",\"keywords\":").next()?;
            if head.len() == raw.len() {
                return None;
            }
            serde_json::from_str(&format!("{head}}}")).ok()
        }
    }
}

/// First object carrying `articleBody` or `headline`, searching arrays and `@graph`.
fn find_article(value: Value) -> Option<LdArticle> {
    match value {
        Value::Array(items) => items.into_iter().find_map(find_article),
        Value::Object(mut map) => {
            if map.contains_key("articleBody") || map.contains_key("headline") {
                return serde_json::from_value(Value::Object(map)).ok();
            }
            map.remove("@graph").and_then(find_article)
        }
        _ => None,
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(markdown));
    out
}
