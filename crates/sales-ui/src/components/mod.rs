//! Reusable dashboard widgets.

pub mod charts;
pub mod header;
pub mod metrics;
pub mod share_bar;
pub mod sidebar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Fit `text` into exactly `width` display columns, truncating with `…` or
/// padding with spaces as needed.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let fitted = truncate_to_width(text, width);
    let used = UnicodeWidthStr::width(fitted.as_str());
    format!("{}{}", fitted, " ".repeat(width.saturating_sub(used)))
}

/// Cut `text` down to at most `width` display columns, ending in `…` when
/// anything was removed.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("PAIN", 10), "PAIN");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_to_width("TRADITIONAL BAGUETTE", 8), "TRADITI…");
        assert_eq!(truncate_to_width("PAIN", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_to_width("面包面包", 5), "面包…");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("COUPE", 8), "COUPE   ");
        assert_eq!(pad_to_width("ÉCLAIR CAFÉ", 6), "ÉCLAI…");
    }
}
