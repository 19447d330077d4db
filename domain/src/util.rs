//! Shared utility functions.

/// Single-line preview of `s` for log messages.
///
/// Collapses runs of whitespace (including newlines) to one space and cuts
/// the result to `max_chars` characters, appending `...` when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &collapsed[..idx]),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(preview("a\n\n  b\tc", 20), "a b c");
    }

    #[test]
    fn preview_cuts_on_chars() {
        assert_eq!(preview("héllo world", 5), "héllo...");
    }

    #[test]
    fn preview_no_op_when_short() {
        assert_eq!(preview("hi", 10), "hi");
        assert_eq!(preview("", 10), "");
    }
}
