use std::path::{Path, PathBuf};
use std::{fs, io};

use futures::future::join_all;
use spdlog::warn;

use crate::post::{parse_post_file_name, PostRecord};
use crate::text_utils::extract_title;

/// Collects post metadata from a directory of `YYYY-MM-DD-slug.md` files.
pub struct PostList {
    pub posts_dir: PathBuf,
}

impl PostList {
    pub fn new(posts_dir: &Path) -> PostList {
        PostList {
            posts_dir: posts_dir.to_path_buf(),
        }
    }

    /// Lists the regular `.md` files in the posts directory. A failure to
    /// read the directory itself is fatal for the listing and propagates.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = vec![];
        let entries = fs::read_dir(self.posts_dir.as_path())?;
        for entry in entries {
            if let Ok(entry) = entry {
                if let Ok(file_type) = entry.file_type() {
                    if !file_type.is_file() {
                        continue;
                    }
                    let file_name = entry.file_name();
                    if let Some(file_name) = file_name.to_str() {
                        if file_name.ends_with(".md") {
                            files.push(entry.path());
                        }
                    }
                }
            }
        }
        Ok(files)
    }

    /// Builds the post records for every matching file, newest first.
    ///
    /// Each file is read independently and the reads run concurrently; the
    /// results are joined before sorting. A file that cannot be read, or
    /// whose content yields no title, is logged and left out without
    /// aborting the rest of the collection. Files whose names do not carry
    /// a valid leading date are skipped silently.
    pub async fn collect(&self) -> io::Result<Vec<PostRecord>> {
        let files = self.retrieve_files()?;

        let reads = files.into_iter().map(read_post);
        let mut posts: Vec<PostRecord> = join_all(reads)
            .await
            .into_iter()
            .flatten()
            .collect();

        // Stable sort: insertion order is preserved among equal dates
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }
}

async fn read_post(path: PathBuf) -> Option<PostRecord> {
    let file_name = path.file_name()?.to_str()?;
    let post_name = parse_post_file_name(file_name)?;

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Skipping unreadable post {}: {}", path.display(), e);
            return None;
        }
    };

    let (title, _body) = match extract_title(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Skipping post {}: {}", path.display(), e);
            return None;
        }
    };

    Some(PostRecord::new(post_name.date, post_name.slug, title))
}
