use unicode_width::UnicodeWidthChar;

/// Truncates a string to at most `max_width` display columns, appending
/// "..." when anything was cut. Width-aware so CJK question text never
/// splits inside a character.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(1)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(1);
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_display_no_truncation() {
        assert_eq!(truncate_display("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_display_with_truncation() {
        let s = "This is a very long string that should be truncated";
        let result = truncate_display(s, 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_display_exact_width() {
        assert_eq!(truncate_display("Exactly twenty!!", 20), "Exactly twenty!!");
    }

    #[test]
    fn test_truncate_display_empty() {
        assert_eq!(truncate_display("", 20), "");
    }

    #[test]
    fn test_truncate_display_wide_chars() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_display("判断题", 6), "判断题");
        let result = truncate_display("网络层的主要功能是什么", 10);
        assert_eq!(result, "网络层...");
    }

    #[test]
    fn test_truncate_display_never_splits_a_wide_char() {
        // Budget of 8 leaves 5 columns; the third character needs 2 and
        // only 1 remains, so it is dropped rather than split.
        let result = truncate_display("网络层的主要功能", 8);
        assert_eq!(result, "网络...");
    }
}
