//! Text normalization applied before any pattern matching.

/// Whether `c` separates words.
///
/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
/// Fingerprints depend on this set.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Non-empty words of `text`, split on [`is_separator`]
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|w| !w.is_empty())
}

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Case is preserved; case-insensitivity is handled by the scanner.
pub fn normalize(text: &str) -> String {
    words(text).collect::<Vec<_>>().join(" ")
}
