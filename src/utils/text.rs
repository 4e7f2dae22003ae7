/// True when `haystack` contains at least one of `needles` as a substring.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{contains_any, truncate_chars};

    #[test]
    fn test_contains_any() {
        assert!(contains_any("gracias, eres genial", &["genial", "perfecto"]));
        assert!(!contains_any("hola", &["adiós"]));
        assert!(!contains_any("hola", &[]));
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("canción", 6), "canció");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ñññ", 0), "");
    }
}
