//! Bounded quote construction.
//!
//! Two quote paths share one word cap:
//! - document-level: the whole normalized text, capped
//! - match-level: a character window around a match, capped
//!
//! Regex offsets are byte offsets; the window is measured in characters so
//! it always lands on UTF-8 boundaries.

use super::normalize::words;

/// Maximum words in any quote
pub const MAX_QUOTE_WORDS: usize = 25;

/// Characters of context kept before a match
pub const CONTEXT_BEFORE_CHARS: usize = 40;

/// Characters of context kept after a match
pub const CONTEXT_AFTER_CHARS: usize = 80;

/// Appended (after a space) when a quote was cut
pub const TRUNCATION_MARKER: &str = "\u{2026}";

/// Cap `text` at `max_words` whitespace-separated words.
///
/// Text within the cap is returned unchanged. Otherwise the kept words are
/// joined by single spaces and followed by ` …`.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = words(text).collect();
    if words.len() <= max_words {
        return text.to_string();
    }

    format!("{} {}", words[..max_words].join(" "), TRUNCATION_MARKER)
}

/// Quote for a match at byte range `start..end` of normalized `text`.
pub fn context_quote(text: &str, start: usize, end: usize) -> String {
    let (lo, hi) = context_window(text, start, end);
    truncate_words(&text[lo..hi], MAX_QUOTE_WORDS)
}

/// Byte range covering the context window around `start..end`.
///
/// Offsets past the text or off a char boundary are clamped first, so any
/// input yields a valid slice range.
pub fn context_window(text: &str, start: usize, end: usize) -> (usize, usize) {
    let end = floor_char_boundary(text, end);
    let start = floor_char_boundary(text, start.min(end));

    let lo = text[..start]
        .char_indices()
        .rev()
        .take(CONTEXT_BEFORE_CHARS)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let hi = text[end..]
        .char_indices()
        .nth(CONTEXT_AFTER_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    (lo, hi)
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_truncate_within_limit_unchanged() {
        let text = words(25);
        assert_eq!(truncate_words(&text, 25), text);
        assert_eq!(truncate_words("", 25), "");
    }

    #[test]
    fn test_truncate_over_limit_adds_marker() {
        let quote = truncate_words(&words(30), 25);
        assert!(quote.ends_with(" \u{2026}"));
        assert!(quote.starts_with("w1 w2"));
        assert!(quote.contains("w25"));
        assert!(!quote.contains("w26"));
        let kept: Vec<&str> = quote.trim_end_matches(TRUNCATION_MARKER).split_whitespace().collect();
        assert_eq!(kept.len(), 25);
    }

    #[test]
    fn test_truncate_splits_on_information_separators() {
        let text = (1..=30).map(|i| format!("w{}", i)).collect::<Vec<_>>().join("\u{1f}");
        let quote = truncate_words(&text, 25);
        assert!(quote.ends_with(TRUNCATION_MARKER));
        assert!(quote.starts_with("w1 w2 w3"));
        assert!(!quote.contains('\u{1f}'));
    }

    #[test]
    fn test_context_window_clamps_to_text() {
        let text = "I heard that he said so";
        assert_eq!(context_window(text, 0, 12), (0, text.len()));
    }

    #[test]
    fn test_context_window_sizes() {
        let text = format!("{}MATCH{}", "a".repeat(100), "b".repeat(100));
        let (lo, hi) = context_window(&text, 100, 105);
        assert_eq!(lo, 60);
        assert_eq!(hi, 185);
    }

    #[test]
    fn test_context_window_counts_characters_not_bytes() {
        // 50 two-byte chars before, 100 three-byte chars after
        let text = format!("{}X{}", "é".repeat(50), "€".repeat(100));
        let start = "é".repeat(50).len();
        let (lo, hi) = context_window(&text, start, start + 1);
        assert_eq!(text[lo..start].chars().count(), 40);
        assert_eq!(text[start + 1..hi].chars().count(), 80);
    }

    #[test]
    fn test_context_window_tolerates_bad_offsets() {
        let text = "héllo";
        let (lo, hi) = context_window(text, 2, 99);
        assert!(lo <= hi && hi <= text.len());
        let _ = &text[lo..hi];
    }

    #[test]
    fn test_context_quote_contains_match() {
        let text = "Report: neighbour says I heard that he said the child was alone at night.";
        let start = text.find("I heard that").unwrap();
        let quote = context_quote(text, start, start + "I heard that".len());
        assert!(quote.contains("I heard that"));
    }
}
