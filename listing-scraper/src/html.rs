//! Small CSS-selector helpers over `scraper::Html`.
//!
//! Documents are parsed and dropped inside synchronous functions: `Html` is
//! not `Send` and must never live across an `.await`.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// At most this many image URLs are kept per listing.
pub(crate) const MAX_IMAGES: usize = 5;

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Element text with each text node trimmed and joined by single spaces.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first match, or empty.
pub(crate) fn first_text(doc: &Html, css: &str) -> String {
    selector(css)
        .and_then(|sel| doc.select(&sel).next().map(element_text))
        .unwrap_or_default()
}

/// Non-empty texts of all matches, in document order.
pub(crate) fn all_texts(doc: &Html, css: &str) -> Vec<String> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Value of `attr` on the first match, trimmed, or empty.
pub(crate) fn first_attr(doc: &Html, css: &str, attr: &str) -> String {
    selector(css)
        .and_then(|sel| doc.select(&sel).next())
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// JPEG image URLs from `<img>` tags, first usable attribute wins.
///
/// Relative and protocol-relative sources are resolved against `base` when
/// given. Duplicates are skipped and at most [`MAX_IMAGES`] are returned.
pub(crate) fn jpeg_images(doc: &Html, attrs: &[&str], base: Option<&Url>) -> Vec<String> {
    let Some(sel) = selector("img") else {
        return Vec::new();
    };

    let mut out: Vec<String> = Vec::new();
    for img in doc.select(&sel) {
        let Some(src) = attrs
            .iter()
            .filter_map(|a| img.value().attr(a))
            .map(str::trim)
            .find(|s| !s.is_empty())
        else {
            continue;
        };
        if !src.to_ascii_lowercase().contains("jpg") {
            continue;
        }

        let resolved = match base {
            Some(base) => match base.join(src) {
                Ok(url) => url.to_string(),
                Err(_) => continue,
            },
            None => src.to_string(),
        };
        if !out.contains(&resolved) {
            out.push(resolved);
        }
        if out.len() >= MAX_IMAGES {
            break;
        }
    }
    out
}
