use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::PostRecord;
use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct HomePage {
    posts: Vec<PostItem>,
}

#[derive(ramhorns::Content)]
struct PostItem {
    date: String,
    title: String,
    href: String,
}

/// Renders the post list with the `home.tpl` template. Records arrive
/// already sorted newest first.
pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str) -> io::Result<HomeRenderer> {
        let template = match Template::new(home_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing home template: {}", e)));
            }
        };

        Ok(HomeRenderer {
            template,
        })
    }

    pub fn render(&self, records: &[PostRecord]) -> String {
        let mut posts = vec![];
        for record in records {
            posts.push(PostItem {
                date: format_date(&record.date),
                title: record.title.clone(),
                href: record.href.clone(),
            });
        }

        self.template.render(&HomePage {
            posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn render_home() {
        let template_src = r##"{{#posts}}[{{date}}|{{title}}|{{href}}]{{/posts}}"##;
        let renderer = HomeRenderer::new(template_src).unwrap();

        let records = vec![
            PostRecord::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                "spring".to_string(),
                "Spring".to_string(),
            ),
            PostRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                "new-year".to_string(),
                "New <Year>".to_string(),
            ),
        ];

        let res = renderer.render(&records);
        assert_eq!(res, "[2024-03-05|Spring|posts/2024-03-05/spring]\
[2024-01-01|New &lt;Year&gt;|posts/2024-01-01/new-year]");
    }

    #[test]
    fn render_home_empty() {
        let renderer = HomeRenderer::new("{{#posts}}x{{/posts}}").unwrap();
        assert_eq!(renderer.render(&[]), "");
    }
}
