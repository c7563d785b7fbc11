//! System notice detection.
//!
//! Exports interleave real messages with administrative lines: encryption
//! banners, membership changes, deletion placeholders, group icon and name
//! changes. They are recognized by phrase, case-insensitively, anywhere in
//! the message body.

/// Built-in notice phrases, lowercase.
///
/// Matching is by substring, so short phrases like `added` and `left` are
/// deliberately broad: `"I left early"` is treated as a notice too.
pub const SYSTEM_NOTICE_PHRASES: &[&str] = &[
    "you deleted this message",
    "this message was deleted",
    "messages and calls are end-to-end encrypted",
    "added",
    "left",
    "changed the group name to",
    "changed this group's icon",
    "security code changed",
    "created group",
    "changed the group description",
    "deleted this group's icon",
    "joined using this group's invite link",
];

/// Returns `true` if `body` contains a built-in or extra notice phrase.
///
/// `extra` phrases are compared case-insensitively as well.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::system::is_system_notice;
///
/// assert!(is_system_notice("Messages and calls are end-to-end encrypted.", &[]));
/// assert!(!is_system_notice("see you tomorrow", &[]));
/// assert!(is_system_notice("Alice pinned a message", &["Pinned a message".to_string()]));
/// ```
pub fn is_system_notice(body: &str, extra: &[String]) -> bool {
    let body_lower = body.to_lowercase();

    SYSTEM_NOTICE_PHRASES
        .iter()
        .any(|phrase| body_lower.contains(phrase))
        || extra
            .iter()
            .any(|phrase| body_lower.contains(&phrase.to_lowercase()))
}
