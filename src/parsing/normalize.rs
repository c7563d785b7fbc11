//! Text normalization for downstream analytics.
//!
//! The parser never looks at `normalized_body`; it is prepared once so that
//! keyword, topic and sentiment stages all start from the same text. The
//! transform is independent of parser state and safe to call on any string.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+").expect("URL pattern is valid"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern is valid"));

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Prepares a message body for text analytics.
///
/// Steps, in order: emoji become `:name:` tokens, URLs (`http…`, `www…`) and
/// `@mentions` are removed, whitespace is collapsed, everything is lowercased.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::normalize::normalize_text;
///
/// assert_eq!(
///     normalize_text("Hey @bob 😀  see https://example.com NOW"),
///     "hey :grinning_face: see now"
/// );
/// ```
pub fn normalize_text(text: &str) -> String {
    let expanded = expand_emoji(text);
    let without_urls = URL_RE.replace_all(&expanded, "");
    let without_mentions = MENTION_RE.replace_all(&without_urls, "");

    without_mentions
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Replaces every emoji grapheme with a `:snake_case_name:` token.
///
/// Skin tone variants keep their modifier in the name, e.g.
/// `:waving_hand_medium_skin_tone:`. Non-emoji text is copied unchanged.
pub fn expand_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for grapheme in text.graphemes(true) {
        match lookup_emoji(grapheme) {
            Some(emoji) => {
                out.push(':');
                out.push_str(&emoji_token(emoji.name()));
                out.push(':');
            }
            None => out.push_str(grapheme),
        }
    }

    out
}

fn lookup_emoji(grapheme: &str) -> Option<&'static emojis::Emoji> {
    // Plain ASCII is never an emoji on its own; keycaps carry a combining mark.
    if grapheme.is_ascii() {
        return None;
    }

    emojis::get(grapheme).or_else(|| {
        let bare: String = grapheme
            .chars()
            .filter(|&c| c != VARIATION_SELECTOR)
            .collect();
        (bare.len() != grapheme.len())
            .then(|| emojis::get(&bare))
            .flatten()
    })
}

/// `"waving hand: medium skin tone"` -> `"waving_hand_medium_skin_tone"`.
fn emoji_token(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    token
}
