pub const DEFAULT_WRAP_WIDTH: usize = 20;

/// Greedy word wrap. Text that already fits is returned untouched; words are
/// never split, so a word longer than `width` gets a line of its own.
pub fn wrap_label(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// "WP1: System Design" -> "WP1\System Design", then wrapped.
pub fn format_wp_name(name: &str, width: usize) -> String {
    let formatted = match name.split_once(": ") {
        Some((id, rest)) => format!("{}\\{}", id, rest),
        None => name.to_string(),
    };
    wrap_label(&formatted, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(wrap_label("Go-Live", 20), "Go-Live");
        assert_eq!(wrap_label("exactly twenty chars", 20), "exactly twenty chars");
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        assert_eq!(
            wrap_label("MS3 - Documentation Complete and Signed", 20),
            "MS3 - Documentation\nComplete and Signed"
        );
    }

    #[test]
    fn test_long_word_is_not_split() {
        assert_eq!(
            wrap_label("a Supercalifragilisticexpialidocious b", 20),
            "a\nSupercalifragilisticexpialidocious\nb"
        );
    }

    #[test]
    fn test_format_wp_name_replaces_first_separator() {
        assert_eq!(format_wp_name("WP1: System Design", 20), "WP1\\System Design");
        assert_eq!(format_wp_name("Milestones", 20), "Milestones");
        assert_eq!(
            format_wp_name("WP6: Documentation and Training", 20),
            "WP6\\Documentation\nand Training"
        );
    }
}
