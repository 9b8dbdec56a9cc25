//! Small text helpers shared by providers and the CLI.

/// Ellipsis appended to shortened text.
pub const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_chars` characters and append `...` when it was
/// shortened. Counts characters, not bytes, so multi-byte text is never split.
#[must_use]
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Show the first and last four characters of a credential.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else if chars.is_empty() {
        "(not set)".to_string()
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_preview("Paris", 200), "Paris");
        assert_eq!(truncate_preview("", 3), "");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        assert_eq!(truncate_preview("abc", 3), "abc");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_preview("Tour Eiffel à Paris", 13), "Tour Eiffel à...");
        assert_eq!(truncate_preview("日本語のテキスト", 3), "日本語...");
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret("sk-1234567890abcd"), "sk-1...abcd");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "(not set)");
    }
}
