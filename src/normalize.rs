//! Whitespace post-processing applied after comment removal.

/// Trim trailing whitespace from every line and collapse runs of blank
/// lines down to a single blank line.
///
/// A trailing newline on the input is kept on the output.
pub fn normalize(text: &str) -> String {
    let (body, trailing_newline) = match text.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (text, false),
    };

    let mut out = String::with_capacity(text.len());
    let mut previous_blank = false;
    let mut first = true;
    for line in body.split('\n') {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        if !first {
            out.push('\n');
        }
        out.push_str(line);
        previous_blank = blank;
        first = false;
    }
    if trailing_newline {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(normalize("a  \nb\t\nc \r\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_four_blank_lines_collapse_to_one() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        assert_eq!(normalize("a\n  \n\t\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_single_blank_line_kept() {
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_trailing_newline_structure() {
        assert_eq!(normalize("a"), "a");
        assert_eq!(normalize("a\n"), "a\n");
        assert_eq!(normalize("a\n\n\n"), "a\n\n");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("x  \n\n\n\ny \n\n");
        assert_eq!(normalize(&once), once);
    }
}
