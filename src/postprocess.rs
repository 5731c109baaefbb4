//! Protocol fixups for images served from the mirror host.
//!
//! Archived pages embed images from the archive's own asset host with a
//! hardcoded or protocol-relative scheme. When the reader is served over a
//! different protocol the browser blocks those loads as mixed content, so
//! every `<img>` pointing at the mirror host gets its scheme rewritten to the
//! display protocol. All other markup is left byte-for-byte intact.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::borrow::Cow;
use tracing::{debug, instrument};
use url::Url;

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// An `<img>` start tag; quoted attribute values may contain `>`.
static IMG_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<img\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap());

static SRC_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(\ssrc\s*=\s*["']?)((?:https?:)?//)([^/"'\s>]+)"#).unwrap()
});

/// Rewrite mirror-hosted image urls in `html` to use `display_protocol`.
///
/// # Arguments
///
/// * `html` - Extracted body HTML
/// * `display_protocol` - `http` or `https` (a trailing `:` is tolerated)
/// * `mirror_host` - Host whose images should be rewritten, e.g. `web.archive.org`
///
/// Best-effort: anything unexpected returns the input unchanged.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn post_process(html: &str, display_protocol: &str, mirror_host: &str) -> String {
    let protocol = display_protocol.trim().trim_end_matches(':').to_ascii_lowercase();
    if !matches!(protocol.as_str(), "http" | "https") || mirror_host.is_empty() {
        debug!(%protocol, "Unsupported display protocol; leaving body untouched");
        return html.to_string();
    }
    if !has_mismatched_images(html, &protocol, mirror_host) {
        return html.to_string();
    }

    let rewritten = IMG_TAG_RE.replace_all(html, |tag: &Captures| -> String {
        rewrite_img_tag(&tag[0], &protocol, mirror_host).into_owned()
    });
    rewritten.into_owned()
}

/// Parse the body and check whether any image actually needs rewriting.
fn has_mismatched_images(html: &str, protocol: &str, mirror_host: &str) -> bool {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&IMG_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .any(|src| needs_rewrite(src, protocol, mirror_host))
}

fn needs_rewrite(src: &str, protocol: &str, mirror_host: &str) -> bool {
    let src = src.trim();
    let absolute = if src.starts_with("//") {
        Cow::Owned(format!("{protocol}:{src}"))
    } else {
        Cow::Borrowed(src)
    };
    match Url::parse(&absolute) {
        Ok(url) => {
            url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(mirror_host))
                && (src.starts_with("//") || url.scheme() != protocol)
        }
        Err(_) => false,
    }
}

fn rewrite_img_tag<'t>(tag: &'t str, protocol: &str, mirror_host: &str) -> Cow<'t, str> {
    SRC_ATTR_RE.replace(tag, |caps: &Captures| {
        if caps[3].eq_ignore_ascii_case(mirror_host) {
            format!("{}{}://{}", &caps[1], protocol, &caps[3])
        } else {
            caps[0].to_string()
        }
    })
}
