//! Line formatting for everything the fetcher writes to the log.

use crate::model::Post;

pub const BODY_PREVIEW_CHARS: usize = 500;
const INDENT: &str = "     ";

/// Collapses every whitespace run to a single space and trims both ends,
/// so a post always fits on one log line.
pub fn one_line(text: &str) -> String {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// U+0085 (NEL) is kept as text; U+FEFF (BOM) counts as a separator.
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// At most `max` characters of `text`, never splitting a character.
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn status_url(id: &str) -> String {
    format!("https://x.com/i/web/status/{id}")
}

pub fn window(start: Option<&str>, end: Option<&str>) -> String {
    format!("WINDOW: {} → {}", start.unwrap_or("-"), end.unwrap_or("-"))
}

pub fn page_banner(page: u64, items: usize) -> String {
    format!("-- page {page} : {items} items")
}

/// The three lines logged for a post: counters, link, text.
pub fn post_lines(index: u64, post: &Post) -> [String; 3] {
    let m = post.metrics();
    [
        format!(
            "[{index}] {} ♥{} 🔁{} 🔁(qt){} 💬{}",
            post.created_at.as_deref().unwrap_or(""),
            m.like_count,
            m.retweet_count,
            m.quote_count,
            m.reply_count
        ),
        format!("{INDENT}{}", status_url(&post.id)),
        format!("{INDENT}{}", one_line(&post.text)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PublicMetrics;

    #[test]
    fn one_line_collapses_mixed_whitespace() {
        assert_eq!(one_line("  hello\n\n\tworld  \r\n again "), "hello world again");
        assert_eq!(one_line(""), "");
        assert_eq!(one_line(" \n\t "), "");
        assert_eq!(one_line("a\u{3000}b"), "a b");
    }

    #[test]
    fn one_line_treats_bom_as_space_and_keeps_nel() {
        assert_eq!(one_line("\u{feff}hello\u{feff}\u{feff}world"), "hello world");
        assert_eq!(one_line("a\u{85}b"), "a\u{85}b");
        assert_eq!(one_line("a\u{a0}\u{2028}b"), "a b");
    }

    #[test]
    fn one_line_is_idempotent() {
        for text in ["a  b", "\tx\ny\t", "already normal", "  "] {
            let once = one_line(text);
            assert_eq!(one_line(&once), once);
        }
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("server error", 500), "server error");
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ééé", 2), "éé");
        let long = "x".repeat(BODY_PREVIEW_CHARS + 20);
        assert_eq!(truncate(&long, BODY_PREVIEW_CHARS).len(), BODY_PREVIEW_CHARS);
    }

    #[test]
    fn window_uses_dash_for_missing_bound() {
        assert_eq!(
            window(Some("2025-06-01T00:00:00Z"), None),
            "WINDOW: 2025-06-01T00:00:00Z → -"
        );
        assert_eq!(window(None, Some("b")), "WINDOW: - → b");
    }

    #[test]
    fn post_lines_format() {
        let post = Post {
            id: "1790".to_string(),
            created_at: Some("2025-06-02T10:00:00.000Z".to_string()),
            text: "first line\nsecond\tline".to_string(),
            public_metrics: Some(PublicMetrics {
                like_count: 3,
                retweet_count: 2,
                quote_count: 1,
                reply_count: 4,
            }),
        };
        let [head, link, text] = post_lines(7, &post);
        assert_eq!(head, "[7] 2025-06-02T10:00:00.000Z ♥3 🔁2 🔁(qt)1 💬4");
        assert_eq!(link, "     https://x.com/i/web/status/1790");
        assert_eq!(text, "     first line second line");
    }

    #[test]
    fn post_lines_default_missing_fields() {
        let post = Post {
            id: "5".to_string(),
            created_at: None,
            text: String::new(),
            public_metrics: None,
        };
        let [head, _, text] = post_lines(1, &post);
        assert_eq!(head, "[1]  ♥0 🔁0 🔁(qt)0 💬0");
        assert_eq!(text, "     ");
    }
}
