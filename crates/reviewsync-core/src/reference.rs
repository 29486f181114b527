use std::sync::LazyLock;

use regex::Regex;

const SITE_MARKER: &str = "openreview.net";

static ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid regex"));

/// Pulls a forum identifier out of a citation, URL, or bare identifier.
///
/// Text that mentions neither the review site nor a path separator is taken
/// to be an identifier already and returned trimmed. Anything else must carry
/// an `id=` query parameter.
#[must_use]
pub fn extract_identifier_from_reference(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if !text.contains(SITE_MARKER) && !text.contains('/') {
        return Some(text.to_string());
    }

    ID_PARAM
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
