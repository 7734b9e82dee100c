/// Greedy word wrap. Width counts chars; a word wider than `width` is kept
/// whole on its own line. Blank input gives no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn long_word_overflows_on_its_own_line() {
        assert_eq!(wrap_text("abcdef", 3), vec!["abcdef"]);
        assert_eq!(wrap_text("ab abcdef cd", 3), vec!["ab", "abcdef", "cd"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   \n\t ", 10).is_empty());
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(wrap_text("  one \n two  ", 30), vec!["one two"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(wrap_text("é é é", 3), vec!["é é", "é"]);
    }

    #[test]
    fn every_line_fits_unless_single_word() {
        let text = "Teardrop, Massive Attack, Mezzanine (Remastered 2019 Deluxe Edition)";
        for line in wrap_text(text, 12) {
            assert!(line.chars().count() <= 12 || !line.contains(' '), "{line}");
        }
    }
}
