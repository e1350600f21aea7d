use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to HTML, appending the result to `w`. Headings keep
/// their level so that `## Intro` renders as the `<h2>` block that
/// [`crate::extract::excerpt`] drops from summaries.
pub fn to_html(w: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    html::push_html(w, Parser::new_ext(markdown, options));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html_appends() {
        let mut out = String::from("<!-- head -->");
        to_html(&mut out, "~~old~~ *new*");
        assert_eq!("<!-- head --><p><del>old</del> <em>new</em></p>\n", out);
    }
}
