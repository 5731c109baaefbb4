//! Bloomberg.
//!
//! Story pages are client-rendered: the article exists only as a JSON
//! document in `script#__NEXT_DATA__`. The body is a tree of typed content
//! blocks under `props.pageProps.story.body.content`, rendered here by a
//! small recursive-descent walk:
//!
//! | Block | Markup |
//! |-------|--------|
//! | `paragraph` | `<div>…</div>` |
//! | `text` | `<span>…</span>` (with `<strong>` / `<em>`) |
//! | `link` | `<a href>…</a>` |
//! | `entity` | children inline |
//! | `heading` | `<hN>…</hN>` |
//! | `list` / `list-item` | `<ul>`/`<ol>` / `<li>` |
//! | `quote` | `<blockquote>…</blockquote>` |
//! | `media` | `<figure><img><figcaption></figure>` |
//! | `embed` | `<div><a href>…</a></div>` |
//! | `br` | `<br>` |
//!
//! Anything else (ads, newsletter prompts) renders nothing.

use super::Extractor;
use crate::error::ContentError;
use crate::models::ExtractionResult;
use crate::render::image_tag;
use html_escape::{encode_double_quoted_attribute, encode_text};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::fmt::Write;

pub const SOURCE_ID: &str = "bloomberg.com";

static NEXT_DATA: Lazy<Selector> = Lazy::new(|| Selector::parse("script#__NEXT_DATA__").unwrap());

#[derive(Debug, Deserialize)]
struct NextData {
    props: Props,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    page_props: PageProps,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    story: Story,
}

#[derive(Debug, Deserialize)]
struct Story {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    body: StoryBody,
}

#[derive(Debug, Default, Deserialize)]
struct StoryBody {
    #[serde(default)]
    content: Vec<Block>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Block {
    Paragraph {
        #[serde(default)]
        content: Vec<Block>,
    },
    Text {
        #[serde(default)]
        value: String,
        #[serde(default)]
        attributes: TextAttributes,
    },
    Link {
        #[serde(default)]
        data: LinkData,
        #[serde(default)]
        content: Vec<Block>,
    },
    Entity {
        #[serde(default)]
        content: Vec<Block>,
    },
    Heading {
        #[serde(default)]
        data: HeadingData,
        #[serde(default)]
        content: Vec<Block>,
    },
    List {
        #[serde(default, rename = "subType")]
        sub_type: String,
        #[serde(default)]
        content: Vec<Block>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<Block>,
    },
    Quote {
        #[serde(default)]
        content: Vec<Block>,
    },
    Media {
        #[serde(default)]
        data: MediaData,
    },
    Embed {
        #[serde(default)]
        data: EmbedData,
    },
    Br,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Default, Deserialize)]
struct TextAttributes {
    #[serde(default)]
    strong: bool,
    #[serde(default)]
    emphasis: bool,
}

#[derive(Debug, Default, Deserialize)]
struct LinkData {
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HeadingData {
    #[serde(default)]
    level: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct MediaData {
    #[serde(default)]
    photo: Option<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    src: String,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EmbedData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Embedded-JSON extractor for bloomberg.com.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloombergExtractor;

impl Extractor for BloombergExtractor {
    fn extract(&self, html: &str) -> Result<ExtractionResult, ContentError> {
        let document = Html::parse_document(html);
        let script = document
            .select(&NEXT_DATA)
            .next()
            .ok_or_else(|| ContentError::extraction(SOURCE_ID, "no __NEXT_DATA__ script tag"))?;
        let raw: String = script.text().collect();
        let data: NextData = serde_json::from_str(&raw)
            .map_err(|e| ContentError::extraction(SOURCE_ID, format!("malformed story JSON: {e}")))?;

        let story = data.props.page_props.story;
        Ok(ExtractionResult {
            headline: story.headline.trim().to_string(),
            body_html: render_blocks(&story.body.content),
        })
    }
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(block, &mut out);
    }
    out
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph { content } => wrap(out, "div", content),
        Block::Text { value, attributes } => {
            let mut text = encode_text(value).into_owned();
            if attributes.emphasis {
                text = format!("<em>{text}</em>");
            }
            if attributes.strong {
                text = format!("<strong>{text}</strong>");
            }
            let _ = write!(out, "<span>{text}</span>");
        }
        Block::Link { data, content } => match data.href.as_deref() {
            Some(href) if !href.is_empty() => {
                let _ = write!(out, "<a href=\"{}\">", encode_double_quoted_attribute(href));
                out.push_str(&render_blocks(content));
                out.push_str("</a>");
            }
            _ => out.push_str(&render_blocks(content)),
        },
        Block::Entity { content } => out.push_str(&render_blocks(content)),
        Block::Heading { data, content } => {
            let level = data.level.unwrap_or(2).clamp(2, 6);
            wrap(out, &format!("h{level}"), content);
        }
        Block::List { sub_type, content } => {
            let tag = if sub_type == "ordered" { "ol" } else { "ul" };
            wrap(out, tag, content);
        }
        Block::ListItem { content } => wrap(out, "li", content),
        Block::Quote { content } => wrap(out, "blockquote", content),
        Block::Media { data } => {
            if let Some(photo) = data.photo.as_ref().filter(|p| !p.src.is_empty()) {
                out.push_str("<figure>");
                out.push_str(&image_tag(&photo.src, photo.alt.as_deref()));
                if let Some(caption) = photo.caption.as_deref().filter(|c| !c.trim().is_empty()) {
                    let _ = write!(out, "<figcaption>{}</figcaption>", encode_text(caption));
                }
                out.push_str("</figure>");
            }
        }
        Block::Embed { data } => {
            if let Some(url) = data.url.as_deref().filter(|u| !u.is_empty()) {
                let label = data.title.as_deref().unwrap_or(url);
                let _ = write!(
                    out,
                    "<div><a href=\"{}\">{}</a></div>",
                    encode_double_quoted_attribute(url),
                    encode_text(label)
                );
            }
        }
        Block::Br => out.push_str("<br>"),
        Block::Unsupported => {}
    }
}

fn wrap(out: &mut String, tag: &str, content: &[Block]) {
    let _ = write!(out, "<{tag}>{}</{tag}>", render_blocks(content));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(story: &str) -> String {
        format!(
            r#"<html><body><script id="__NEXT_DATA__" type="application/json">{{"props":{{"pageProps":{{"story":{story}}}}}}}</script></body></html>"#
        )
    }

    #[test]
    fn test_single_paragraph_single_span() {
        let html = page(
            r#"{"headline":"Oil Jumps","body":{"content":[{"type":"paragraph","content":[{"type":"text","value":"text"}]}]}}"#,
        );
        let result = BloombergExtractor.extract(&html).unwrap();
        assert_eq!(result.headline, "Oil Jumps");
        assert_eq!(result.body_html, "<div><span>text</span></div>");
    }

    #[test]
    fn test_renders_rich_blocks() {
        let html = page(
            r#"{"headline":"Markets","body":{"content":[
                {"type":"paragraph","content":[
                    {"type":"text","value":"Shares of "},
                    {"type":"entity","content":[{"type":"text","value":"Apple","attributes":{"strong":true}}]},
                    {"type":"link","data":{"href":"https://example.com/a?b=1&c=2"},"content":[{"type":"text","value":"rose"}]}
                ]},
                {"type":"ad","data":{"slot":"inline"}},
                {"type":"heading","data":{"level":3},"content":[{"type":"text","value":"Outlook"}]},
                {"type":"list","subType":"ordered","content":[{"type":"list-item","content":[{"type":"text","value":"One"}]}]},
                {"type":"media","data":{"photo":{"src":"https://assets.bwbx.io/x.jpg","alt":"Chart","caption":"Prices <rose>"}}},
                {"type":"embed","data":{"url":"https://twitter.com/x/status/1"}},
                {"type":"br"}
            ]}}"#,
        );
        let body = BloombergExtractor.extract(&html).unwrap().body_html;
        assert!(body.starts_with("<div><span>Shares of </span><span><strong>Apple</strong></span>"));
        assert!(body.contains(r#"<a href="https://example.com/a?b=1&amp;c=2"><span>rose</span></a>"#));
        assert!(body.contains("<h3><span>Outlook</span></h3>"));
        assert!(body.contains("<ol><li><span>One</span></li></ol>"));
        assert!(body.contains(r#"<figure><img src="https://assets.bwbx.io/x.jpg" alt="Chart"><figcaption>Prices &lt;rose&gt;</figcaption></figure>"#));
        assert!(body.contains(r#"<div><a href="https://twitter.com/x/status/1">https://twitter.com/x/status/1</a></div>"#));
        assert!(body.ends_with("<br>"));
        assert!(!body.contains("inline"));
    }

    #[test]
    fn test_missing_script_is_an_extraction_error() {
        let err = BloombergExtractor
            .extract("<html><body><article>Server rendered?</article></body></html>")
            .unwrap_err();
        assert!(matches!(err, ContentError::ExtractionFailed { ref source_id, .. } if source_id == SOURCE_ID));
    }

    #[test]
    fn test_malformed_json_is_an_extraction_error() {
        let html = r#"<html><body><script id="__NEXT_DATA__">{"props": {</script></body></html>"#;
        assert!(BloombergExtractor.extract(html).is_err());
    }

    #[test]
    fn test_story_without_body_yields_empty_body() {
        let result = BloombergExtractor.extract(&page(r#"{"headline":"Brief"}"#)).unwrap();
        assert_eq!(result.headline, "Brief");
        assert!(result.body_html.is_empty());
    }
}
