use std::io;
use std::io::ErrorKind;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Extracts the display title from post content.
///
/// The title is the first non-empty line with any leading run of `#`
/// heading markers and surrounding whitespace stripped. The remainder of
/// the content after that line is returned alongside it, ready for the
/// markdown renderer.
///
/// Content that is empty or contains only blank lines is an error; callers
/// doing bulk collection treat it as a per-file failure and skip the file.
pub fn extract_title(content: &str) -> io::Result<(String, &str)> {
    lazy_static! {
        static ref HEADING_MARKERS: Regex = Regex::new(r"^#+").unwrap();
    }

    let mut rest = content;
    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, tail),
            None => (rest, ""),
        };

        if !line.trim().is_empty() {
            let title = HEADING_MARKERS.replace(line, "").trim().to_string();
            return Ok((title, tail));
        }

        if tail.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidData, "Content has no title line"));
        }
        rest = tail;
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
