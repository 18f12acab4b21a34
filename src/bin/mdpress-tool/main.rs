use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::export::export_cmd;
use crate::post::post_cmd;

mod export;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Create a new post file
    Post(PostArgs),
    /// Export the post index as JSON
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Post date as YYYY-MM-DD. Defaults to today
    #[arg(short, long)]
    date: Option<String>,

    /// Slug used in the file name. Defaults to one derived from the title
    #[arg(short, long)]
    slug: Option<String>,

    /// Directory the post file is written to. If empty, writes to stdout
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ExportArgs {
    /// Directory containing the post files
    #[arg(short, long)]
    posts_dir: PathBuf,

    /// File the JSON is written to. If empty, writes to stdout
    #[arg(short, long)]
    out_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::Post(post_args) => post_cmd(post_args),
        Args::Export(export_args) => export_cmd(export_args),
    }
}
