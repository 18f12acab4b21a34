use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use chrono::NaiveDate;
use ntex::web;
use ntex_files::NamedFile;
use spdlog::info;

use crate::config::Config;
use crate::post::post_file_name;
use crate::post_list::PostList;
use crate::post_render::render_markdown;
use crate::text_utils::extract_title;
use crate::view::home_renderer::HomeRenderer;
use crate::view::page_renderer::PageRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

struct AppState {
    config: Config,
}

fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    fs::read_to_string(tpl_dir.join(file_name))
}

async fn render_home(config: &Config) -> io::Result<String> {
    let posts = PostList::new(&config.paths.posts_dir).collect().await?;

    let template_src = read_template(&config.paths.template_dir, "home.tpl")?;
    let home = HomeRenderer::new(&template_src)?;
    Ok(home.render(&posts))
}

fn render_post(config: &Config, date: &NaiveDate, content: &str) -> io::Result<String> {
    let (title, body) = extract_title(content)?;
    let post_html = render_markdown(body)?;

    let template_src = read_template(&config.paths.template_dir, "post.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(&title, date, &post_html))
}

fn render_page(config: &Config, content: &str) -> io::Result<String> {
    let page_html = render_markdown(content)?;

    let template_src = read_template(&config.paths.template_dir, "page.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render(&page_html))
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_home(&state.config).await {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    }
}

#[web::get("/posts")]
async fn post_index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_home(&state.config).await {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    }
}

#[web::get("/posts/{date}/{slug}")]
async fn view_post(path: web::types::Path<(String, String)>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (date, slug) = path.into_inner();

    let date = match NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return web::HttpResponse::NotFound().body("Post not found"),
    };
    if slug.contains('/') || slug.contains('\\') {
        return web::HttpResponse::NotFound().body("Post not found");
    }

    let file_path = state.config.paths.posts_dir.join(post_file_name(&date, &slug));
    let content = match tokio::fs::read_to_string(&file_path).await {
        Ok(content) => content,
        Err(_) => return web::HttpResponse::NotFound().body("Post not found"),
    };

    match render_post(&state.config, &date, &content) {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => web::HttpResponse::BadRequest()
            .body(format!("Error loading post {}: {}", slug, e)),
    }
}

#[web::get("/pages/{slug}")]
async fn page(slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = slug.into_inner();

    if slug.contains('/') || slug.contains('\\') || slug.contains("..") {
        return web::HttpResponse::NotFound().body("Page not found");
    }

    let file_path = state.config.paths.pages_dir.join(format!("{}.md", slug));
    let content = match tokio::fs::read_to_string(&file_path).await {
        Ok(content) => content,
        Err(_) => return web::HttpResponse::NotFound().body("Page not found"),
    };

    match render_page(&state.config, &content) {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => web::HttpResponse::BadRequest()
            .body(format!("Error loading page {}: {}", slug, e)),
    }
}

#[web::get("/feed.xml")]
async fn feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let feed_cfg = match state.config.feed {
        Some(ref feed_cfg) => feed_cfg,
        None => return web::HttpResponse::NotFound().body("Feed not configured"),
    };

    let posts = match PostList::new(&state.config.paths.posts_dir).collect().await {
        Ok(posts) => posts,
        Err(e) => return web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    };

    let channel = RssChannel {
        ch_title: feed_cfg.title.as_str(),
        ch_link: feed_cfg.site_url.as_str(),
        ch_desc: feed_cfg.description.as_str(),
    };
    match channel.render(&posts) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering feed: {}", e)),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let post_files = PostList::new(&config.paths.posts_dir).retrieve_files()?;
    for file in post_files.iter() {
        info!("Post file: {:?}", file);
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(post_index)
            .service(view_post)
            .service(page)
            .service(feed)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::config::{Paths, Server};
    use crate::test_data::{PAGE_DATA, POST_DATA};

    use super::*;

    fn test_config(root: &Path) -> Config {
        Config {
            paths: Paths {
                template_dir: root.join("templates"),
                public_dir: root.join("public"),
                posts_dir: root.join("posts"),
                pages_dir: root.join("pages"),
            },
            server: Server {
                address: "127.0.0.1".to_string(),
                port: 8080,
            },
            feed: None,
            log: None,
        }
    }

    fn write_blog_fixture(root: &Path) {
        for dir in ["templates", "public", "posts", "pages"] {
            fs::create_dir(root.join(dir)).unwrap();
        }
        fs::write(root.join("templates/home.tpl"),
                  "{{#posts}}<a href=\"/{{href}}\">{{title}}</a>\n{{/posts}}").unwrap();
        fs::write(root.join("templates/post.tpl"),
                  "<h1>{{title}}</h1>\n<em>{{date}}</em>\n{{{content}}}").unwrap();
        fs::write(root.join("templates/page.tpl"), "{{{content}}}").unwrap();

        fs::write(root.join("posts/2024-03-05-tiny-engine.md"), POST_DATA).unwrap();
        fs::write(root.join("posts/2024-01-01-new-year.md"), "# New Year\nbody").unwrap();
        fs::write(root.join("pages/about.md"), PAGE_DATA).unwrap();
    }

    #[tokio::test]
    async fn test_render_home() {
        let tmp = TempDir::new().unwrap();
        write_blog_fixture(tmp.path());
        let config = test_config(tmp.path());

        let body = render_home(&config).await.unwrap();
        assert!(body.contains("<a href=\"/posts/2024-03-05/tiny-engine\">Writing a tiny blog engine</a>"));
        assert!(body.contains("<a href=\"/posts/2024-01-01/new-year\">New Year</a>"));

        // Newest first
        let newer = body.find("tiny-engine").unwrap();
        let older = body.find("new-year").unwrap();
        assert!(newer < older);
    }

    #[tokio::test]
    async fn test_render_home_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        write_blog_fixture(tmp.path());
        let mut config = test_config(tmp.path());
        config.paths.posts_dir = PathBuf::from("does/not/exist");

        assert!(render_home(&config).await.is_err());
    }

    #[test]
    fn test_render_post() {
        let tmp = TempDir::new().unwrap();
        write_blog_fixture(tmp.path());
        let config = test_config(tmp.path());

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let body = render_post(&config, &date, POST_DATA).unwrap();
        assert!(body.starts_with("<h1>Writing a tiny blog engine</h1>\n<em>2024-03-05</em>\n"));
        assert!(body.contains("<del>Databases</del>"));
        // The title line is consumed, not rendered twice
        assert_eq!(body.matches("Writing a tiny blog engine").count(), 1);
    }

    #[test]
    fn test_render_page() {
        let tmp = TempDir::new().unwrap();
        write_blog_fixture(tmp.path());
        let config = test_config(tmp.path());

        let body = render_page(&config, PAGE_DATA).unwrap();
        assert!(body.contains("<h1>About</h1>"));
        assert!(body.contains("directory of markdown files"));
    }
}
