//! Cleanup-aware HTML serialization.
//!
//! `scraper` trees are read-only, so source-specific cleanup happens while
//! serializing: dropped subtrees are skipped, stripped attributes are
//! omitted, and a per-source rewrite hook may replace an element (typically
//! a lazy-loaded image) with its own markup.

use html_escape::{encode_double_quoted_attribute, encode_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Node, Selector};
use std::fmt::Write;

/// Replacement hook: return `Some(markup)` to emit instead of the element.
pub type RewriteFn = fn(ElementRef<'_>) -> Option<String>;

static ALWAYS_DROPPED: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script, style, template, link, meta").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are serialized verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Cleanup rules applied while serializing an extracted body.
#[derive(Debug, Default)]
pub struct Cleanup {
    pub drop: Vec<Selector>,
    pub strip_attributes: Vec<&'static str>,
    pub rewrite: Option<RewriteFn>,
}

impl Cleanup {
    /// Serialize the children of `container`.
    pub fn inner_html(&self, container: ElementRef<'_>) -> String {
        let mut writer = Writer::new(self, container);
        writer.children(container);
        writer.out
    }

    /// Serialize `element` itself, tags included.
    pub fn outer_html(&self, element: ElementRef<'_>) -> String {
        let mut writer = Writer::new(self, element);
        writer.element(element);
        writer.out
    }
}

struct Writer<'c, 'a> {
    cleanup: &'c Cleanup,
    dropped: Vec<ElementRef<'a>>,
    out: String,
}

impl<'c, 'a> Writer<'c, 'a> {
    fn new(cleanup: &'c Cleanup, root: ElementRef<'a>) -> Self {
        let dropped = cleanup
            .drop
            .iter()
            .chain(std::iter::once(&*ALWAYS_DROPPED))
            .flat_map(|selector| root.select(selector))
            .collect();
        Self {
            cleanup,
            dropped,
            out: String::new(),
        }
    }

    fn children(&mut self, parent: ElementRef<'a>) {
        let raw_text = RAW_TEXT_ELEMENTS.contains(&parent.value().name());
        for child in parent.children() {
            match child.value() {
                Node::Text(text) if raw_text => self.out.push_str(text),
                Node::Text(text) => self.out.push_str(&encode_text(&**text)),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.element(element);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef<'a>) {
        if self.dropped.contains(&element) {
            return;
        }
        if let Some(markup) = self.cleanup.rewrite.and_then(|rewrite| rewrite(element)) {
            self.out.push_str(&markup);
            return;
        }

        let name = element.value().name();
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in element.value().attrs() {
            if self
                .cleanup
                .strip_attributes
                .iter()
                .any(|stripped| stripped.eq_ignore_ascii_case(key))
            {
                continue;
            }
            let _ = write!(self.out, " {}=\"{}\"", key, encode_double_quoted_attribute(value));
        }
        self.out.push('>');
        if VOID_ELEMENTS.contains(&name) {
            return;
        }
        self.children(element);
        let _ = write!(self.out, "</{name}>");
    }
}

/// Standard `<img>` markup for a rewritten lazy image.
pub fn image_tag(src: &str, alt: Option<&str>) -> String {
    match alt.filter(|a| !a.trim().is_empty()) {
        Some(alt) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(alt)
        ),
        None => format!("<img src=\"{}\">", encode_double_quoted_attribute(src)),
    }
}

/// Text content of an element with whitespace runs collapsed.
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
