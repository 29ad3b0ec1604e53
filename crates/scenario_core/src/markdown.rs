//! Markdown rendering for scene summaries, notes and memo bodies.
//!
//! # Responsibility
//! - Render CommonMark (tables, strikethrough, task lists) to HTML.
//! - Derive plain-text one-line previews for compact listings.
//!
//! # Invariants
//! - Rendered output never contains raw HTML from the source text.
//! - Script-capable link and image destinations are replaced with `#`.
//! - Rendering never panics out to the caller; failures yield empty output.

use log::warn;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use regex::Regex;

/// Maximum characters kept by [`markdown_preview`].
pub const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!|]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders `text` to sanitized HTML.
///
/// Returns an empty string if the renderer fails.
pub fn render_markdown(text: &str) -> String {
    match std::panic::catch_unwind(|| render_sanitized(text)) {
        Ok(html) => html,
        Err(_) => {
            warn!(
                "event=markdown_render module=markdown status=error error_code=renderer_panicked bytes={}",
                text.len()
            );
            String::new()
        }
    }
}

fn render_sanitized(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(text, options).map(neutralize);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_unsafe_destination(&dest) {
        CowStr::from("#")
    } else {
        dest
    }
}

/// Returns whether a link destination uses a script-capable scheme.
///
/// `data:image/` stays allowed for inline pictures.
pub fn is_unsafe_destination(dest: &str) -> bool {
    let folded = dest
        .chars()
        .filter(|ch| !ch.is_whitespace() && !ch.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if folded.starts_with("javascript:") || folded.starts_with("vbscript:") {
        return true;
    }
    folded.starts_with("data:") && !folded.starts_with("data:image/")
}

/// Plain-text one-line preview: symbols stripped, whitespace collapsed,
/// first [`PREVIEW_MAX_CHARS`] characters.
pub fn markdown_preview(text: &str) -> String {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(text, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    normalized.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}
