//! Text helpers used to derive comment titles and permlinks.

/// Marker appended to truncated text.
const ELLIPSIS: &str = "...";

/// URL-safe, lowercase, hyphen-separated form of `text`.
///
/// Underscores and whitespace become separators, `@` reads as `at`, and any
/// other punctuation is dropped without introducing a separator.
pub fn slug(text: &str) -> String {
    let normalised = text.replace('_', "-").replace('@', "-at-").to_lowercase();

    let mut slug = String::with_capacity(normalised.len());
    let mut pending_separator = false;
    for c in normalised.chars() {
        if c == '-' || c.is_whitespace() {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }
    slug
}

/// Truncate `text` to `limit` characters, appending `...` when anything was cut.
pub fn limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let truncated: String = text.chars().take(limit).collect();
    format!("{}{}", truncated.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("This is a title!"), "this-is-a-title");
        assert_eq!(slug("this is a body ok?"), "this-is-a-body-ok");
        assert_eq!(
            slug("This is a title made by a @user!"),
            "this-is-a-title-made-by-a-at-user"
        );
        assert_eq!(slug("  snake_case -- and   spaces "), "snake-case-and-spaces");
        assert_eq!(slug("don't"), "dont");
        assert_eq!(slug("!!!"), "");
    }

    #[test]
    fn test_limit() {
        assert_eq!(limit("short", 150), "short");

        let long = "word ".repeat(40);
        let limited = limit(&long, 150);
        assert!(limited.ends_with("word..."));
        assert_eq!(limited.chars().count(), 149 + ELLIPSIS.len());
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(limit(&text, 10), text);
        assert_eq!(limit(&text, 4), "éééé...");
    }
}
