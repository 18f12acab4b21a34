use std::fs;

use anyhow::Result;
use serde::Serialize;

use mdpress::post::PostRecord;
use mdpress::post_list::PostList;

use crate::ExportArgs;

#[derive(Serialize)]
struct PostData {
    posts: Vec<PostRecord>,
}

/// Writes the post index JSON the static build consumes:
/// `{"posts": [{"date", "slug", "title", "href"}, ...]}`, newest first.
pub(crate) fn export_cmd(args: ExportArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let posts = runtime.block_on(PostList::new(&args.posts_dir).collect())?;

    let data = PostData {
        posts,
    };
    let json = serde_json::to_string_pretty(&data)?;

    match args.out_file {
        Some(out_file) => {
            fs::write(&out_file, json)?;
            println!("Wrote {}", out_file.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
