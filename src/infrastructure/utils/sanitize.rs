use std::collections::HashSet;

use ammonia::Builder;

/// Strips every HTML tag from user-supplied text. The submission ends up in
/// an HTML email body, so markup must not survive. Text content of dropped
/// tags is kept, except for `<script>`/`<style>` whose content is removed
/// outright (ammonia's default clean-content set).
pub fn strip_markup(input: &str) -> String {
    Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_script_tags_and_their_content() {
        let cleaned = strip_markup("hello <script>alert('x')</script>world");
        assert!(!cleaned.contains("<script"));
        assert!(!cleaned.contains("alert"));
        assert!(cleaned.contains("hello"));
    }

    #[test]
    fn strips_tags_but_keeps_text() {
        let cleaned = strip_markup("<b>bold</b> move");
        assert!(!cleaned.contains('<'));
        assert!(cleaned.contains("bold"));
        assert!(cleaned.contains("move"));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Hi there"), "Hi there");
    }
}
