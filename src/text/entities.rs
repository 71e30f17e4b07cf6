//! HTML entity encoding and decoding.
//!
//! Encoding escapes the five markup-significant characters. Decoding
//! understands decimal (`&#39;`) and hex (`&#x27;`) references plus a small
//! table of named entities; anything unrecognised is left verbatim.
//!
//! `html_decode(html_encode(s)) == s` for any `s` that does not already
//! contain entity references.

use once_cell::sync::Lazy;
use regex::Captures;
use std::collections::HashMap;

static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{a0}'),
        ("copy", '©'),
        ("reg", '®'),
        ("trade", '™'),
        ("deg", '°'),
        ("euro", '€'),
        ("laquo", '«'),
        ("raquo", '»'),
        ("ndash", '–'),
        ("mdash", '—'),
        ("hellip", '…'),
    ])
});

/// Escape `& < > " '`.
pub fn html_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace entity references with the characters they stand for.
pub fn html_decode(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    regex!(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z][a-zA-Z0-9]{1,31}));")
        .replace_all(s, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| NAMED_ENTITIES.get(name.as_str()).copied())
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_markup_characters() {
        assert_eq!(html_encode(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;");
    }

    #[test]
    fn decodes_numeric_and_named() {
        assert_eq!(html_decode("&#039;&#x41;&amp;&hellip;&nbsp;"), "'A&…\u{a0}");
        assert_eq!(html_decode("&bogus; &#xFFFFFF; & alone"), "&bogus; &#xFFFFFF; & alone");
    }

    #[test]
    fn round_trips_plain_text() {
        let s = "5 < 6 && \"quotes\" 'single' &lt";
        assert_eq!(html_decode(&html_encode(s)), s);
    }
}
