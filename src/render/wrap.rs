//! Whitespace-only word wrapping.

/// Wrap `text` so that no line exceeds `width` characters, breaking only
/// at spaces.
///
/// Existing line breaks are kept and restart the column count.  A word
/// longer than `width` is never split; it overflows on a line of its own.
pub fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width.max(1));
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        wrap_line(line.strip_suffix('\r').unwrap_or(line), width, &mut out);
    }
    out
}

fn wrap_line(line: &str, width: usize, out: &mut String) {
    let mut column = 0;
    for (i, word) in line.split(' ').enumerate() {
        let len = word.chars().count();
        if i == 0 {
            column = len;
        } else if column + 1 + len <= width {
            out.push(' ');
            column += 1 + len;
        } else {
            out.push('\n');
            column = len;
        }
        out.push_str(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_last_fitting_space() {
        let text = "This is the description for a DocBlock. This text may contain multiple lines and even some _markdown_.";
        assert_eq!(
            wrap(text, 67),
            "This is the description for a DocBlock. This text may contain\nmultiple lines and even some _markdown_."
        );
    }

    #[test]
    fn keeps_existing_line_breaks() {
        assert_eq!(wrap("one\n\ntwo", 10), "one\n\ntwo");
    }

    #[test]
    fn long_words_are_not_cut() {
        assert_eq!(wrap("a verylongword b", 5), "a\nverylongword\nb");
    }

    #[test]
    fn line_of_exact_width_stays() {
        assert_eq!(wrap("abc def", 7), "abc def");
    }
}
