// src/utils/text.rs

//! Text helpers for comment snippets and Markdown table cells.

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to a shortened snippet.
pub const ELLIPSIS: char = '…';

/// Flatten line breaks and keep at most `max` grapheme clusters.
///
/// Appends [`ELLIPSIS`] only when something was cut off.
pub fn snippet(text: &str, max: usize) -> String {
    let flattened = text.replace("\r\n", " ").replace('\n', " ");
    let mut graphemes = flattened.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();

    if graphemes.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

/// Escape characters that break a Markdown table cell or inject HTML.
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "&#124;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(200);
        let result = snippet(&body, 120);
        assert_eq!(result.chars().count(), 121);
        assert!(result.starts_with(&"x".repeat(120)));
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_short_body_unchanged() {
        let body = "y".repeat(50);
        assert_eq!(snippet(&body, 120), body);
    }

    #[test]
    fn test_exact_length_has_no_marker() {
        let body = "z".repeat(120);
        assert_eq!(snippet(&body, 120), body);
    }

    #[test]
    fn test_newlines_flattened() {
        assert_eq!(snippet("line one\nline two\r\nthree", 120), "line one line two three");
    }

    #[test]
    fn test_does_not_split_graphemes() {
        let body = "👍🏽".repeat(3);
        let result = snippet(&body, 2);
        assert_eq!(result, format!("👍🏽👍🏽{ELLIPSIS}"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("[Sandbox] <QHTTPX> | x"), "[Sandbox] &lt;QHTTPX&gt; &#124; x");
    }
}
