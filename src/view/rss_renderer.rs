use std::io::Cursor;

use chrono::{NaiveDateTime, TimeZone, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::PostRecord;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>A blog</title>
  <link>https://blog.example.com</link>
  <description>Posts about software</description>
  <item>
    <title>Hello world</title>
    <link>https://blog.example.com/posts/2016-02-23/hello-world</link>
    <pubDate>Tue, 23 Feb 2016 00:00:00 +0000</pubDate>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, records: &[PostRecord]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for record in records {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", record.title.as_str())?;

            let link = full_link(self.ch_link, record.href.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            // <guid isPermaLink="false">posts/2016-02-23/hello-world</guid>
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "false"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(record.href.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            // Posts carry a calendar date only; the feed publishes midnight UTC
            let dt = NaiveDateTime::from(record.date);
            let dt = TimeZone::from_utc_datetime(Utc::now().offset(), &dt);
            push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, href: &str) -> String {
    if base_url.ends_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use chrono::NaiveDate;

    use super::*;

    fn create_record(day: u32, slug: &str) -> PostRecord {
        PostRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            slug.to_string(),
            format!("title-of-{}", slug),
        )
    }

    #[test]
    fn render_xml() {
        let records = vec![create_record(2, "second"), create_record(1, "first")];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://blog.example.com",
            ch_desc: "My blog feed",
        };
        let xml = rss.render(&records).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://blog.example.com</link><description>My blog feed</description><item><title>title-of-second</title><link>https://blog.example.com/posts/2024-01-02/second</link><guid isPermaLink="false">posts/2024-01-02/second</guid><pubDate>Tue, 2 Jan 2024 00:00:00 +0000</pubDate></item><item><title>title-of-first</title><link>https://blog.example.com/posts/2024-01-01/first</link><guid isPermaLink="false">posts/2024-01-01/first</guid><pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate></item></channel></rss>"##;
}
