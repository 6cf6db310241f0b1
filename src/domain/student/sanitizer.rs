//! Markup stripping for user supplied free text.
//!
//! Script and style elements are removed together with their content, every
//! other tag (and HTML comments) is removed while the text between tags is
//! kept. Stripping repeats until the text stops changing, so markup that only
//! appears after a first pass (`<scr<b></b>ipt>`) is removed as well and the
//! function is idempotent.

use regex::Regex;
use std::sync::LazyLock;

static EXECUTABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("executable block pattern is valid")
});

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!][^<>]*>").expect("markup pattern is valid")
});

/// Removes HTML tags and script content from `input`, keeping plain text
///
/// # Example
/// ```
/// use student_records_api::domain::student::sanitizer::sanitize_text;
///
/// assert_eq!(sanitize_text("<script>alert(1)</script>Jane"), "Jane");
/// assert_eq!(sanitize_text("<b>Lima</b>"), "Lima");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let without_blocks = EXECUTABLE_BLOCK.replace_all(&current, "");
        let next = MARKUP.replace_all(&without_blocks, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Sanitizes an optional field; absent values pass through unchanged
pub fn sanitize_optional(input: Option<String>) -> Option<String> {
    input.map(|value| sanitize_text(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_with_content() {
        assert_eq!(sanitize_text("<script>alert(1)</script>Jane"), "Jane");
    }

    #[test]
    fn strips_script_case_insensitive_multiline() {
        assert_eq!(
            sanitize_text("Ann<SCRIPT type=\"text/javascript\">\nsteal()\n</Script >a"),
            "Anna"
        );
    }

    #[test]
    fn strips_style_block() {
        assert_eq!(sanitize_text("<style>body{}</style>Lima"), "Lima");
    }

    #[test]
    fn keeps_text_inside_plain_tags() {
        assert_eq!(sanitize_text("<b>New</b> <i>York</i>"), "New York");
    }

    #[test]
    fn strips_comments() {
        assert_eq!(sanitize_text("Pe<!-- x > y -->ru"), "Peru");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_text("John Doe"), "John Doe");
        assert_eq!(sanitize_text("3 < 4 and 5 > 2"), "3 < 4 and 5 > 2");
    }

    #[test]
    fn nested_markup_is_removed_completely() {
        assert_eq!(sanitize_text("<scr<b></b>ipt>x</script>"), "x");
    }

    #[test]
    fn sanitization_is_idempotent() {
        let samples = [
            "<script>alert(1)</script>Jane",
            "<<b>script>alert(1)<</b>/script>",
            "<scr<script></script>ipt>evil()</script>",
            "a <img src=x onerror=alert(1)> b",
            "plain",
            "",
        ];
        for sample in samples {
            let once = sanitize_text(sample);
            assert_eq!(sanitize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn optional_none_passes_through() {
        assert_eq!(sanitize_optional(None), None);
        assert_eq!(
            sanitize_optional(Some("<i>x</i>".to_string())),
            Some("x".to_string())
        );
    }
}
