//! Utility functions and helpers

/// Insert `separator` between every group of three digits, counting from the right
pub fn group_digits(digits: &str, separator: &str) -> String {
    if separator.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Escape text for inclusion in HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0", ","), "0");
        assert_eq!(group_digits("999", ","), "999");
        assert_eq!(group_digits("1000", ","), "1,000");
        assert_eq!(group_digits("1234567", "."), "1.234.567");
        assert_eq!(group_digits("1234567", "\u{202f}"), "1\u{202f}234\u{202f}567");
        assert_eq!(group_digits("1234567", ""), "1234567");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry's <b>"), "Tom &amp; Jerry&#39;s &lt;b&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }
}
