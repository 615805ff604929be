//! Shared helper functions for CLI commands

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First line of a multi-line value, for table cells
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("").trim_end()
}

/// Hide all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("ääääää", 5), "ää...");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("443/tcp\r\n80/tcp"), "443/tcp");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdef123456"), "********3456");
        assert_eq!(mask_secret("abc"), "***");
    }
}
