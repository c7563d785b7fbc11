//! Building blocks of the chat log parser.
//!
//! Each stage is a free function with no parser state, so it can be tested
//! and reused on its own. [`ChatParser`](crate::parser::ChatParser) wires
//! them together.

pub mod decode;
pub mod header;
pub mod normalize;
pub mod system;
pub mod timestamp;

// Re-export commonly used items
pub use decode::{decode_bytes, read_chat_file};
pub use header::{HeaderMatch, HeaderPattern, LineKind, classify_line, clean_line};
pub use normalize::{expand_emoji, normalize_text};
pub use system::{SYSTEM_NOTICE_PHRASES, is_system_notice};
pub use timestamp::{NormalizedTimestamp, normalize_timestamp, parse_date, parse_time};
