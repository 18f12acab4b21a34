use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use crate::text_utils::format_date;

/// Metadata of a single blog post, derived from its file name and the first
/// line of its content. Records are built fresh on every request or export
/// and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub date: NaiveDate,
    pub slug: String,
    pub title: String,
    pub href: String,
}

impl PostRecord {
    pub fn new(date: NaiveDate, slug: String, title: String) -> PostRecord {
        let href = format!("posts/{}/{}", format_date(&date), slug);
        PostRecord {
            date,
            slug,
            title,
            href,
        }
    }
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "date={}, slug={}, title={}", self.date, self.slug, self.title)
    }
}

/// Date and slug parsed out of a post file name, before the content is read.
#[derive(Debug, Clone, PartialEq)]
pub struct PostName {
    pub date: NaiveDate,
    pub slug: String,
}

/// Parses a post file name of the form `YYYY-MM-DD-slug.md`.
///
/// The leading 10 characters of the stem must form a valid calendar date;
/// the slug is whatever follows the date and one separator character.
/// Returns `None` when the date does not parse, which marks the file as
/// "not a post" rather than an error.
pub fn parse_post_file_name(file_name: &str) -> Option<PostName> {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let date_part = stem.get(..10)?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let slug = stem.get(11..).unwrap_or("").to_string();

    Some(PostName {
        date,
        slug,
    })
}

/// Builds the file name for a `(date, slug)` pair. Inverse of
/// [`parse_post_file_name`].
pub fn post_file_name(date: &NaiveDate, slug: &str) -> String {
    format!("{}-{}.md", format_date(date), slug)
}
