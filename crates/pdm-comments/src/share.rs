//! Links to a single comment.
//!
//! The site uses hash routing, so a shared comment link looks like
//! `https://host/path/#/?comment=<id>`. Opening it scrolls to and highlights
//! the comment once the thread has loaded.

use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

const COMMENT_PARAM: &str = "comment";

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Link to `comment_id` on the page at `base` (origin plus path).
///
/// Any fragment already on `base` is replaced.
#[must_use]
pub fn share_url(base: &str, comment_id: &str) -> String {
    let base = base.split_once('#').map_or(base, |(before, _)| before);
    format!(
        "{base}#/?{COMMENT_PARAM}={}",
        utf8_percent_encode(comment_id, URI_COMPONENT)
    )
}

/// The comment id carried by a hash-router fragment, if any.
///
/// Accepts the fragment with or without its leading `#`. Follows form-encoding
/// rules: `+` is a space and the first `comment` parameter wins.
#[must_use]
pub fn comment_id_from_hash(hash: &str) -> Option<String> {
    let (_, query) = hash.split_once('?')?;

    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_form_component(key) == COMMENT_PARAM).then(|| decode_form_component(value))
        })
        .next()
        .filter(|id| !id.is_empty())
}

fn decode_form_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
