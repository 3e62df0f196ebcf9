//! Display-width aware text fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Alignment;

pub const ELLIPSIS: char = '…';

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Whitespace-only (or empty) text.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Cut `s` to at most `max` display columns, ending in `…` when anything was dropped.
pub fn truncate(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Truncate and pad `s` so it occupies exactly `width` display columns.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let clipped = truncate(s, width);
    let slack = width.saturating_sub(display_width(&clipped));
    let (left, right) = match align {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack / 2, slack - slack / 2),
    };
    format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(right))
}

/// Group an integer's digits in threes, `1234567` -> `1,234,567`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("abc", 5), "abc");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // each CJK char is two columns wide
        assert_eq!(truncate("日本語", 4), "日…");
    }

    #[test]
    fn fit_pads_by_alignment() {
        assert_eq!(fit("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(fit("ab", 5, Alignment::Right), "   ab");
        assert_eq!(fit("ab", 5, Alignment::Center), " ab  ");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(95), "95");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1000), "-1,000");
    }
}
