//! HTML markup: only `<!-- -->` spans are comments.

use regex::Regex;

use crate::policy::PreservationPolicy;

use super::sink::LineSink;
use super::strip_blocks;

pub(super) fn strip(source: &str, blocks: Option<&Regex>, policy: &PreservationPolicy) -> String {
    let mut sink = LineSink::with_capacity(source.len());
    strip_blocks(source, blocks, policy, &mut sink, |text, sink| sink.push_str(text));
    sink.finish()
}

#[cfg(test)]
mod tests {
    use crate::engine::strip_comments;
    use crate::language::LanguageId;
    use crate::policy::PreservationPolicy;

    #[test]
    fn test_html_comments_removed() {
        let src = "<!-- banner -->\n<p>hi <!-- inline --> there</p>\n<!--\n  multi\n-->\n<a href=\"#top\">//x</a>\n";
        assert_eq!(
            strip_comments(src, LanguageId::Html, &PreservationPolicy::new()),
            "<p>hi  there</p>\n<a href=\"#top\">//x</a>\n"
        );
    }

    #[test]
    fn test_html_conditional_comment_preserved_by_pattern() {
        let policy = PreservationPolicy::new().patterns([r"\[if IE"]);
        let src = "<!--[if IE]><p>old</p><![endif]-->\n<!-- gone -->\n<body>\n";
        assert_eq!(
            strip_comments(src, LanguageId::Html, &policy),
            "<!--[if IE]><p>old</p><![endif]-->\n<body>\n"
        );
    }

    #[test]
    fn test_unterminated_html_comment_runs_to_end() {
        let src = "<p>a</p>\n<!-- open\n<p>b</p>\n";
        assert_eq!(
            strip_comments(src, LanguageId::Html, &PreservationPolicy::new()),
            "<p>a</p>\n"
        );
    }
}
