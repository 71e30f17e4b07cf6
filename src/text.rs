//! Text primitives: trimming, cropping, smart truncation, case folding and
//! HTML entity handling.
//!
//! All lengths are counted in `char`s (code points), never bytes, so
//! multi-byte input is never split inside a character.
//!
//! ## Responsibilities by module
//!
//! - `text.rs`: `trim`, `crop`, delimiter splitting.
//! - `case.rs`: `upper`/`lower` with an explicit Cyrillic letter table.
//! - `entities.rs`: `html_encode`/`html_decode`.
//! - `truncate.rs`: `reduce`, the word-boundary-aware truncation.

#[path = "text/case.rs"]
mod case;
#[path = "text/entities.rs"]
mod entities;
#[path = "text/truncate.rs"]
mod truncate;

pub use case::{lower, upper};
pub use entities::{html_decode, html_encode};
pub use truncate::{ReduceFlags, reduce};

/// Characters stripped by `trim` when the caller does not supply a set.
pub const DEFAULT_TRIM: &str = " \t\n\r\0\x0B";

/// Raw control bytes (ordinal 0..=31) are always stripped from both ends.
fn is_control(c: char) -> bool {
    (c as u32) < 32
}

/// Trim `charset` and raw control characters from both ends.
///
/// Both sets are stripped in a single pass, so a charset character hidden
/// behind a control byte is removed too and `trim(trim(s)) == trim(s)`.
pub fn trim(s: &str, charset: &str) -> String {
    s.trim_matches(|c: char| charset.contains(c) || is_control(c)).to_string()
}

/// Trim, then keep the first `length` characters (`0` yields `""`).
///
/// The kept prefix is trimmed again at its end so that cropping is a fixed
/// point: `crop(crop(s, n), n) == crop(s, n)`.
pub fn crop(s: &str, length: usize) -> String {
    let trimmed = trim(s, DEFAULT_TRIM);
    if trimmed.chars().count() <= length {
        return trimmed;
    }
    let prefix: String = trimmed.chars().take(length).collect();
    trim(&prefix, DEFAULT_TRIM)
}

/// Split on `delimiter`, then drop every token present in `remove`.
///
/// An empty delimiter yields the whole string as the only token.
pub fn delimited_list(s: &str, delimiter: &str, remove: &[&str]) -> Vec<String> {
    let tokens: Vec<&str> = if delimiter.is_empty() { vec![s] } else { s.split(delimiter).collect() };
    tokens.into_iter().filter(|t| !remove.contains(t)).map(str::to_string).collect()
}

/// First `n` characters of `s`.
pub(crate) fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
