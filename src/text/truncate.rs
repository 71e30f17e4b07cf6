//! Length-bounded truncation (`reduce`).
//!
//! ```text
//! trim ─▶ [decode entities] ─▶ fits? ──yes──▶ text
//!                                │
//!                                no
//!                                ├─ hard:  first `length` chars + ending
//!                                └─ smart: whole words within
//!                                          `length - len(ending)` + ending
//!                           ─▶ [re-encode entities]
//! ```
//!
//! Smart mode accumulates words while the joined length is still under the
//! budget, so the last accepted word may overshoot it. That overshooting word
//! is dropped again when more than one word is left over (or none is, which
//! means every word was consumed yet the text was still too long). A single
//! first word longer than the budget is cut mid-word.

use super::entities::{html_decode, html_encode};
use super::{DEFAULT_TRIM, take_chars, trim};

bitflags::bitflags! {
    /// Behaviour switches for [`reduce`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReduceFlags: u8 {
        /// Decode entities before measuring, re-encode after cutting.
        const DECODE_ENTITIES = 1 << 0;
        /// Prefer word boundaries over a hard character cut.
        const SMART           = 1 << 1;
    }
}

enum Cut {
    /// The text already fits.
    Whole,
    /// Cut down to this body; the ending is appended.
    Truncated(String),
    /// The ending leaves no room for any text.
    Empty,
}

/// Shorten `s` to `length` characters, appending `ending` when text was cut.
pub fn reduce(s: &str, length: usize, ending: &str, flags: ReduceFlags) -> String {
    let decode = flags.contains(ReduceFlags::DECODE_ENTITIES);
    let text = trim(s, DEFAULT_TRIM);
    let text = if decode { html_decode(&text) } else { text };

    let encode = |body: &str| if decode { html_encode(body) } else { body.to_string() };

    match cut(&text, length, ending, flags.contains(ReduceFlags::SMART)) {
        Cut::Whole => encode(&text),
        Cut::Truncated(body) => encode(&body) + ending,
        Cut::Empty => String::new(),
    }
}

fn cut(text: &str, length: usize, ending: &str, smart: bool) -> Cut {
    if text.chars().count() <= length {
        return Cut::Whole;
    }
    if !smart {
        return Cut::Truncated(take_chars(text, length));
    }

    let budget = match length.checked_sub(ending.chars().count()) {
        Some(b) if b >= 1 => b,
        _ => return Cut::Empty,
    };

    if !text.contains(' ') {
        return Cut::Truncated(take_chars(text, budget));
    }

    let words: Vec<&str> = text.split(' ').collect();
    let mut taken = 0;
    let mut joined = 0;
    while taken < words.len() && joined < budget {
        joined += usize::from(taken > 0) + words[taken].chars().count();
        taken += 1;
    }

    if taken == 1 && joined > budget {
        return Cut::Truncated(take_chars(words[0], budget));
    }

    let left_over = words.len() - taken;
    if taken > 1 && joined > budget && left_over != 1 {
        taken -= 1;
    }

    Cut::Truncated(words[..taken].join(" ").trim_end().to_string())
}
