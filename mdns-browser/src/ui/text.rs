use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns a list row loses to borders, padding and the selection marker
pub const ROW_PADDING: usize = 10;

/// Columns a detail row loses to the pane border and padding
pub const DETAIL_PADDING: usize = 4;

const ELLIPSIS: &str = "...";

/// Fit a single-line field into `max_width` columns of a list row.
///
/// The row padding is taken off first. Text that still fits is returned as is;
/// otherwise it is cut and ends in an ellipsis, or hard-cut when the room is
/// too small for one.
pub fn truncate(text: &str, max_width: usize) -> String {
    let available = max_width.saturating_sub(ROW_PADDING);
    if available == 0 {
        return String::new();
    }

    if text.chars().count() <= available {
        return text.to_string();
    }

    if available <= ELLIPSIS.len() {
        return text.chars().take(available).collect();
    }

    let mut out: String = text.chars().take(available - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Wrap `text` into lines of at most `max_width` display columns.
///
/// Lines are packed greedily. When a line has to break inside a word it breaks
/// at the last space instead, as long as that space sits past the middle of the
/// line. Leading spaces on continuation lines are dropped. A zero width yields
/// the text unwrapped.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let rest = &chars[start..];
        let mut width = 0;
        let mut fitted = 0;
        let mut last_space = None;

        for (i, &c) in rest.iter().enumerate() {
            let w = c.width().unwrap_or(0);
            if width + w > max_width {
                break;
            }
            if c == ' ' {
                last_space = Some(i);
            }
            width += w;
            fitted = i + 1;
        }

        if fitted == rest.len() {
            lines.push(rest.iter().collect());
            break;
        }

        // A glyph wider than the whole line still has to go somewhere
        let breakpoint = fitted.max(1);
        let end = match last_space {
            Some(space) if rest.get(breakpoint) != Some(&' ') && space > breakpoint / 2 => space,
            _ => breakpoint,
        };

        let line: String = rest[..end].iter().collect();
        lines.push(line.trim_end_matches(' ').to_string());

        start += end;
        while chars.get(start) == Some(&' ') {
            start += 1;
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wrap the value of a "Label: value" row to the detail pane.
///
/// Returns `(gutter, text)` pairs: the first gutter is the label, the rest are
/// blank runs of the same width so wrapped text lines up under the first line.
pub fn wrap_labeled(label: &str, value: &str, detail_width: usize) -> Vec<(String, String)> {
    let label_width = label.width();
    let available = detail_width.saturating_sub(label_width + DETAIL_PADDING);
    let indent = " ".repeat(label_width);

    wrap(value, available)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let gutter = if i == 0 { label.to_string() } else { indent.clone() };
            (gutter, line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits_unchanged() {
        assert_eq!(truncate("HelloWorld", 20), "HelloWorld");
    }

    #[test]
    fn test_truncate_no_room_is_empty() {
        assert_eq!(truncate("HelloWorld", 10), "");
        assert_eq!(truncate("HelloWorld", 0), "");
    }

    #[test]
    fn test_truncate_tiny_room_hard_cuts() {
        assert_eq!(truncate("HelloWorld", 12), "He");
        assert_eq!(truncate("HelloWorld", 13), "Hel");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("HelloWorld", 16), "Hel...");
        assert_eq!(truncate("HelloWorld", 16).chars().count(), 6);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Café Lounge", 14), "C...");
        assert_eq!(truncate("Café", 14), "Café");
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap("abcdefghij", 3);
        assert_eq!(lines, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn test_wrap_breaks_at_space_near_boundary() {
        assert_eq!(wrap("hello world", 8), vec!["hello", "world"]);
        assert_eq!(wrap("hello world foo", 12), vec!["hello world", "foo"]);
    }

    #[test]
    fn test_wrap_ignores_space_before_midpoint() {
        assert_eq!(wrap("a bcdefghij", 6), vec!["a bcde", "fghij"]);
    }

    #[test]
    fn test_wrap_skips_leading_spaces_on_continuation() {
        assert_eq!(wrap("abcd    efgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_wrap_drops_trailing_spaces_at_break() {
        assert_eq!(wrap("a  b", 3), vec!["a", "b"]);
        assert_eq!(wrap("ab   cd", 3), vec!["ab", "cd"]);
    }

    #[test]
    fn test_wrap_counts_wide_glyphs() {
        assert_eq!(wrap("日本語テキスト", 4), vec!["日本", "語テ", "キス", "ト"]);
    }

    #[test]
    fn test_wrap_forces_progress_when_nothing_fits() {
        assert_eq!(wrap("日本", 1), vec!["日", "本"]);
    }

    #[test]
    fn test_wrap_zero_width_is_unwrapped() {
        assert_eq!(wrap("no room at all", 0), vec!["no room at all"]);
    }

    #[test]
    fn test_wrap_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_labeled_aligns_continuation() {
        // 6 label columns + 4 padding leaves 6 for the value
        let rows = wrap_labeled("Host: ", "abcdefghijkl", 16);
        assert_eq!(
            rows,
            vec![
                ("Host: ".to_string(), "abcdef".to_string()),
                ("      ".to_string(), "ghijkl".to_string()),
            ]
        );
    }

    #[test]
    fn test_wrap_labeled_without_room_keeps_one_line() {
        let rows = wrap_labeled("Info: ", "a long value", 5);
        assert_eq!(rows, vec![("Info: ".to_string(), "a long value".to_string())]);
    }
}
