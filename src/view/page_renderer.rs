use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

#[derive(ramhorns::Content)]
struct PageView<'a> {
    content: &'a str,
}

/// Renders a standalone page with the `page.tpl` template. Pages carry no
/// date or slug metadata; the whole file is rendered as content.
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    pub fn render(&self, page_html: &str) -> String {
        self.template.render(&PageView {
            content: page_html,
        })
    }
}
