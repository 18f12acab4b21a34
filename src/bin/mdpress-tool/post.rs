use std::fmt::Write;
use std::fs;

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use unidecode::unidecode;

use mdpress::post::post_file_name;

use crate::PostArgs;

fn slug_from_title(title: &str) -> String {
    let ascii = unidecode(title);

    let mut slug = String::new();
    let mut prev_dash = true;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

fn render_post(title: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

pub(crate) fn post_cmd(args: PostArgs) -> Result<()> {
    let date = match args.date {
        Some(ref date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
        None => Utc::now().date_naive(),
    };

    let slug = match args.slug {
        Some(slug) => slug,
        None => slug_from_title(&args.title),
    };
    if slug.is_empty() {
        bail!("Could not derive a slug from the title. Please pass --slug");
    }

    let file_name = post_file_name(&date, &slug);
    let content = render_post(&args.title);

    match args.out_dir {
        Some(out_dir) => {
            let path = out_dir.join(&file_name);
            if path.exists() {
                bail!("Post file {} already exists", path.display());
            }
            fs::write(&path, content)?;
            println!("Created {}", path.display());
        }
        None => {
            println!("{}", file_name);
            println!();
            print!("{}", content);
        }
    }

    Ok(())
}
