use std::io;
use std::io::ErrorKind;

use chrono::NaiveDate;
use ramhorns::Template;

use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct PostView<'a> {
    title: &'a str,
    date: &'a str,
    content: &'a str,
}

/// Renders a single post with the `post.tpl` template. The content field
/// is already-rendered HTML; the template must use triple braces for it.
pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(post_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(post_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, title: &str, date: &NaiveDate, post_html: &str) -> String {
        let date = format_date(date);
        self.template.render(&PostView {
            title,
            date: date.as_str(),
            content: post_html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_post() {
        let template_src = r##"
TITLE=[{{title}}]
DATE=[{{date}}]
CONTENT=[{{{content}}}]
"##;
        let renderer = PostRenderer::new(template_src).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let res = renderer.render("A <Title>", &date, "<p>body</p>");
        assert_eq!(res, r##"
TITLE=[A &lt;Title&gt;]
DATE=[2024-01-02]
CONTENT=[<p>body</p>]"##);
    }
}
