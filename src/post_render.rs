use std::io;
use std::io::ErrorKind;

use markdown::Options;

/// Renders markdown content to HTML. The content is passed through
/// unmodified; the title line is expected to have been split off already.
pub fn render_markdown(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraphs() {
        let html = render_markdown("First paragraph.\n\nSecond paragraph.").unwrap();
        assert_eq!(html, "<p>First paragraph.</p>\n<p>Second paragraph.</p>\n");
    }

    #[test]
    fn test_render_gfm_extensions() {
        let html = render_markdown("~~gone~~").unwrap();
        assert_eq!(html, "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_render_empty_body() {
        let html = render_markdown("").unwrap();
        assert_eq!(html, "");
    }
}
