//! Markup cleanup for icon sources.
//!
//! Icons are embedded inside a single shared `<svg>` in the iconset, so each
//! source file is flattened to one line and its own outer element is peeled
//! off. This is a text transform only: nothing here checks that the markup is
//! well formed, and malformed input comes back transformed rather than
//! rejected.

use std::sync::LazyLock;

use regex::Regex;

// ── Regex patterns ──────────────────────────────────────────────────────

static RE_LINE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]").expect("static regex must parse"));

/// Everything up to and including the first element start tag. Prologs
/// (`<?xml ...?>`), doctypes and comments do not start with a letter and are
/// swallowed by the lazy prefix.
static RE_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*?<([A-Za-z][A-Za-z0-9:._-]*)[^>]*>").expect("static regex must parse")
});

/// Strip line breaks and tabs, then remove the outer element's start tag
/// (with anything before it) and its matching end tag.
///
/// If no start tag is found the flattened text is returned as is. If the
/// end tag is missing only the start tag is removed.
pub fn sanitize_markup(raw: &str) -> String {
    let flat = RE_LINE_NOISE.replace_all(raw, "");

    let Some(open) = RE_OPEN_TAG.captures(&flat) else {
        return flat.into_owned();
    };
    let start_tag_end = open.get(0).map_or(0, |m| m.end());
    let element = open.get(1).map_or("", |m| m.as_str());
    let body = &flat[start_tag_end..];

    match find_end_tag(body, element) {
        Some((from, to)) => {
            let mut inner = String::with_capacity(body.len() - (to - from));
            inner.push_str(&body[..from]);
            inner.push_str(&body[to..]);
            inner
        }
        None => body.to_string(),
    }
}

/// Byte range of the last `</element>` in `body`.
fn find_end_tag(body: &str, element: &str) -> Option<(usize, usize)> {
    let needle = format!("</{element}");
    let from = body.rfind(&needle)?;
    let after = &body[from + needle.len()..];
    // Reject `</svgx>` style near-misses.
    let rest = after.trim_start();
    if !rest.starts_with('>') {
        return None;
    }
    let to = from + needle.len() + (after.len() - rest.len()) + 1;
    Some((from, to))
}
