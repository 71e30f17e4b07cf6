/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Patterns are literals, so a failure to compile is a bug caught by the
/// first test that touches the call site.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
