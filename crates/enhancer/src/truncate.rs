//! Character-safe truncation helpers.
//!
//! All lengths are counted in Unicode scalar values, never bytes, so CJK
//! text is measured the way a reader sees it and no cut lands inside a
//! multi-byte character.

/// Appended after a hard cut.
pub const ELLIPSIS: &str = "...";

/// Sentence terminators, in search priority order.
const SENTENCE_TERMINATORS: [char; 2] = ['。', '.'];

/// Return the prefix of `text` holding at most `max_chars` characters.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Shorten `text` to `max_length` characters, preferring a sentence boundary.
///
/// - Text within the limit is returned unchanged.
/// - Otherwise the first `max_length` characters are searched for the last
///   full-width period beyond 70% of the limit, then for the last ASCII
///   period beyond it. The first one found becomes the cut point
///   (terminator kept).
/// - Otherwise the text is hard-cut at `max_length` and [`ELLIPSIS`] appended.
///
/// The result never exceeds `max_length + ELLIPSIS.len()` characters.
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let head = take_chars(text, max_length);

    let boundary = SENTENCE_TERMINATORS.iter().find_map(|&terminator| {
        head.char_indices()
            .enumerate()
            .filter(|(_, (_, c))| *c == terminator)
            .last()
            .filter(|(char_pos, _)| char_pos * 10 > max_length * 7)
            .map(|(_, (byte_idx, c))| byte_idx + c.len_utf8())
    });

    if let Some(end) = boundary {
        return head[..end].to_string();
    }

    format!("{head}{ELLIPSIS}")
}

/// Hard-cut `text` to `max_length` characters and append `notice` when it was
/// longer. Returns the text and whether a cut happened.
pub fn truncate_with_notice(text: &str, max_length: usize, notice: &str) -> (String, bool) {
    if text.chars().count() <= max_length {
        return (text.to_string(), false);
    }
    (format!("{}{}", take_chars(text, max_length), notice), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn cuts_at_full_width_period_past_threshold() {
        // '。' is the 7th character (index 6); 6 > 0.7 * 8.
        let out = truncate("今天天气很好。明天也会很好，希望如此。", 8);
        assert_eq!(out, "今天天气很好。");
    }

    #[test]
    fn hard_cuts_when_boundary_too_early() {
        // '。' at index 2 is below the 70% threshold of 8.
        let out = truncate("你好。今天天气很好明天也会很好", 8);
        assert_eq!(out, "你好。今天天气很...");
        assert_eq!(out.chars().count(), 8 + ELLIPSIS.len());
    }

    #[test]
    fn cuts_at_ascii_period() {
        let text = "The parser fails. It drops the last token when input ends";
        let out = truncate(text, 20);
        assert_eq!(out, "The parser fails.");
    }

    #[test]
    fn hard_cut_without_any_terminator() {
        let out = truncate("abcdefghijklmnop", 10);
        assert_eq!(out, "abcdefghij...");
    }

    #[test]
    fn full_width_period_takes_priority() {
        // The ASCII period is later, but the full-width one is searched first.
        let text = "一二三四五六七八九十一二三四五。ab.cdefgh";
        let out = truncate(text, 20);
        assert_eq!(out, "一二三四五六七八九十一二三四五。");
    }

    #[test]
    fn early_full_width_period_falls_through_to_ascii() {
        // '。' at index 1 is below 70% of 20; '.' at index 19 is above it.
        let out = truncate("好。 The parser fails. It drops tokens at the end", 20);
        assert_eq!(out, "好。 The parser fails.");
    }

    #[test]
    fn both_periods_too_early_hard_cuts() {
        let out = truncate("好。 Ok. then the parser drops tokens", 20);
        assert_eq!(out, "好。 Ok. then the pars...");
    }

    #[test]
    fn result_is_bounded() {
        let text = "x".repeat(500);
        for max in [1, 7, 50, 499] {
            let out = truncate(&text, max);
            assert!(out.chars().count() <= max + ELLIPSIS.len());
        }
    }

    #[test]
    fn take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("héllo wörld", 4), "héll");
        assert_eq!(take_chars("短", 10), "短");
    }

    #[test]
    fn notice_only_when_cut() {
        let (out, cut) = truncate_with_notice("short", 10, " [cut]");
        assert_eq!(out, "short");
        assert!(!cut);

        let (out, cut) = truncate_with_notice("a longer text", 4, " [cut]");
        assert_eq!(out, "a lo [cut]");
        assert!(cut);
    }
}
