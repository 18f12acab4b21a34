use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub pages_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Feed {
    pub title: String,
    pub site_url: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub server: Server,
    pub feed: Option<Feed>,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        posts_dir: parse_path(cfg.paths.posts_dir),
        pages_dir: parse_path(cfg.paths.pages_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_SRC: &str = r##"
[server]
address = "127.0.0.1"
port = 8080

[paths]
template_dir = "res/templates"
public_dir = "res/public"
posts_dir = "res/posts"
pages_dir = "res/pages"

[feed]
title = "A blog"
site_url = "https://blog.example.com"
description = "Posts about software"

[log]
level = "Info"
log_to_console = true
"##;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str(CONFIG_SRC).unwrap();
        assert_eq!(cfg.server.address, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("res/posts"));

        let feed = cfg.feed.unwrap();
        assert_eq!(feed.title, "A blog");
        assert_eq!(feed.site_url, "https://blog.example.com");

        let log = cfg.log.unwrap();
        assert!(log.log_to_console);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_parse_path_expands_exe_dir() {
        let path = parse_path(PathBuf::from("${exe_dir}/res/posts"));
        assert!(!path.starts_with("${exe_dir}"));
        assert!(path.ends_with("res/posts"));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_feed_and_log_are_optional() {
        let cfg_src = r##"
[server]
address = "0.0.0.0"
port = 8000

[paths]
template_dir = "templates"
public_dir = "public"
posts_dir = "posts"
pages_dir = "pages"
"##;
        let cfg: Config = toml::from_str(cfg_src).unwrap();
        assert!(cfg.feed.is_none());
        assert!(cfg.log.is_none());
    }
}
