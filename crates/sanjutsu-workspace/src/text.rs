//! Character-offset helpers.
//!
//! Every position in the workspace API is a character offset. `String`
//! indexes by byte, so all slicing goes through here.

/// Number of characters in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of character `idx`, or `s.len()` past the end.
pub(crate) fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Clamp a position into `[0, char_len(s)]`.
pub(crate) fn clamp(s: &str, pos: usize) -> usize {
    pos.min(char_len(s))
}

/// Clamp both ends and swap so that `start <= end`.
pub(crate) fn clamp_range(s: &str, start: usize, end: usize) -> (usize, usize) {
    let len = char_len(s);
    let (a, b) = (start.min(len), end.min(len));
    if a <= b { (a, b) } else { (b, a) }
}

/// Byte range for an already-clamped character range.
pub(crate) fn byte_range(s: &str, start: usize, end: usize) -> std::ops::Range<usize> {
    byte_offset(s, start)..byte_offset(s, end)
}

/// Slice by character range. Out-of-range ends are clamped.
pub(crate) fn slice(s: &str, start: usize, end: usize) -> &str {
    let (start, end) = clamp_range(s, start, end);
    &s[byte_range(s, start, end)]
}

/// Short single-line preview for log lines and version labels.
pub(crate) fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if char_len(&flat) <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range_swaps_and_clamps() {
        assert_eq!(clamp_range("hello", 1, 3), (1, 3));
        assert_eq!(clamp_range("hello", 3, 1), (1, 3));
        assert_eq!(clamp_range("hello", 2, 99), (2, 5));
        assert_eq!(clamp_range("hello", 99, 2), (2, 5));
        assert_eq!(clamp_range("", 4, 7), (0, 0));
    }

    #[test]
    fn test_multibyte_slicing() {
        let s = "añb→c";
        assert_eq!(char_len(s), 5);
        assert_eq!(slice(s, 1, 4), "ñb→");
        assert_eq!(byte_offset(s, 5), s.len());
        assert_eq!(byte_offset(s, 99), s.len());
    }

    #[test]
    fn test_preview_truncates_and_flattens() {
        assert_eq!(preview("a\nb", 10), "a b");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
