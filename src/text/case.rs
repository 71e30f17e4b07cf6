//! Locale-aware upper/lower case.
//!
//! The input is percent-decoded first so that already-encoded tokens fold
//! like their plain form (`%D0%B0` → `а` → `А`). A literal `+` survives
//! decoding untouched; it is never read as an encoded space. Invalid
//! percent-encoding leaves the input as-is.
//!
//! After the generic Unicode fold, the Cyrillic alphabet is mapped through an
//! explicit 32-letter table so the result does not depend on how the platform
//! case tables treat that alphabet.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// Lowercase ↔ uppercase pairs of the 32 basic Cyrillic letters (а..я).
const CYRILLIC_PAIRS: [(char, char); 32] = [
    ('а', 'А'),
    ('б', 'Б'),
    ('в', 'В'),
    ('г', 'Г'),
    ('д', 'Д'),
    ('е', 'Е'),
    ('ж', 'Ж'),
    ('з', 'З'),
    ('и', 'И'),
    ('й', 'Й'),
    ('к', 'К'),
    ('л', 'Л'),
    ('м', 'М'),
    ('н', 'Н'),
    ('о', 'О'),
    ('п', 'П'),
    ('р', 'Р'),
    ('с', 'С'),
    ('т', 'Т'),
    ('у', 'У'),
    ('ф', 'Ф'),
    ('х', 'Х'),
    ('ц', 'Ц'),
    ('ч', 'Ч'),
    ('ш', 'Ш'),
    ('щ', 'Щ'),
    ('ъ', 'Ъ'),
    ('ы', 'Ы'),
    ('ь', 'Ь'),
    ('э', 'Э'),
    ('ю', 'Ю'),
    ('я', 'Я'),
];

static TO_UPPER: Lazy<HashMap<char, char>> = Lazy::new(|| CYRILLIC_PAIRS.iter().copied().collect());

static TO_LOWER: Lazy<HashMap<char, char>> = Lazy::new(|| CYRILLIC_PAIRS.iter().map(|&(l, u)| (u, l)).collect());

fn url_decode(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

/// Upper-case `s`.
pub fn upper(s: &str) -> String {
    let decoded = url_decode(s);
    let folded = decoded.to_uppercase();
    let mut out = String::with_capacity(folded.len());
    out.extend(folded.chars().map(|c| TO_UPPER.get(&c).copied().unwrap_or(c)));
    out
}

/// Lower-case `s`.
pub fn lower(s: &str) -> String {
    let decoded = url_decode(s);
    let folded = decoded.to_lowercase();
    let mut out = String::with_capacity(folded.len());
    out.extend(folded.chars().map(|c| TO_LOWER.get(&c).copied().unwrap_or(c)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_cyrillic_both_ways() {
        assert_eq!(upper("привет, мир"), "ПРИВЕТ, МИР");
        assert_eq!(lower("ПРИВЕТ, Мир"), "привет, мир");
    }

    #[test]
    fn table_is_a_bijection() {
        assert_eq!(TO_UPPER.len(), 32);
        assert_eq!(TO_LOWER.len(), 32);
        for (l, u) in CYRILLIC_PAIRS {
            assert_eq!(TO_LOWER[&TO_UPPER[&l]], l);
            assert_eq!(TO_UPPER[&TO_LOWER[&u]], u);
        }
    }

    #[test]
    fn decodes_percent_escapes_but_keeps_plus() {
        assert_eq!(upper("%D0%B0bc"), "АBC");
        assert_eq!(lower("A+B%20C"), "a+b c");
        assert_eq!(upper("100%"), "100%");
    }
}
