//! Line wrapping for summaries shown in a terminal.

/// Wraps text to `width` columns, keeping blank-line paragraph breaks.
///
/// A width of zero disables wrapping. Words longer than the width get a line
/// of their own and are never split.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    text.split("\n\n")
        .map(|paragraph| {
            paragraph
                .lines()
                .map(|line| {
                    let words: Vec<&str> = line.split_whitespace().collect();
                    if words.is_empty() { String::new() } else { wrap_words(&words, width) }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        let words = vec!["This", "is", "a", "long", "line", "of", "text"];
        let wrapped = wrap_words(&words, 10);
        assert_eq!(wrapped, "This is a\nlong line\nof text");
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let text = "First paragraph here.\n\nSecond one.";
        let wrapped = wrap_text(text, 12);
        assert_eq!(wrapped, "First\nparagraph\nhere.\n\nSecond one.");
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("unchanged  text", 0), "unchanged  text");
    }

    #[test]
    fn test_long_word_on_own_line() {
        assert_eq!(wrap_text("a supercalifragilistic b", 5), "a\nsupercalifragilistic\nb");
    }

    #[test]
    fn test_every_line_fits() {
        let text = "word ".repeat(100);
        let wrapped = wrap_text(&text, 150);
        assert!(wrapped.lines().all(|line| line.len() <= 150));
    }
}
