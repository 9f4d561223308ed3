// Tests for crawl functionality

use async_trait::async_trait;
use sitemapper_core::crawl::{CrawlOptions, execute_crawl, extract_url_path, title_pages};
use sitemapper_core::{OutputMode, SiteMapError};
use sitemapper_scanner::{FetchError, FetchedPage, PageFetcher, PageMap};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// ============================================================================
// URL Path Extraction Tests
// ============================================================================

#[test]
fn test_extract_url_path_root() {
    assert_eq!(extract_url_path("http://example.com/"), "/");
}

#[test]
fn test_extract_url_path_empty_path() {
    assert_eq!(extract_url_path("http://example.com"), "/");
}

#[test]
fn test_extract_url_path_nested() {
    let path = extract_url_path("http://example.com/docs/v1/intro.html");
    assert_eq!(path, "/docs/v1/intro.html");
}

#[test]
fn test_extract_url_path_with_query_and_fragment() {
    let path = extract_url_path("http://example.com/search?q=rust#top");
    assert_eq!(path, "/search");
}

#[test]
fn test_extract_url_path_invalid_url() {
    assert_eq!(extract_url_path("not a url"), "not a url");
}

// ============================================================================
// Options Tests
// ============================================================================

#[test]
fn test_crawl_options_defaults() {
    let options = CrawlOptions::new("http://example.com/");

    assert_eq!(options.base_url, "http://example.com/");
    assert!(options.input.is_none());
    assert_eq!(options.max_urls, 500);
    assert_eq!(options.mode, OutputMode::Simple);
    assert_eq!(options.timeout_secs, 10);
    assert!(!options.show_progress);
}

// ============================================================================
// Title Fetching Tests
// ============================================================================

/// Serves canned titles; URLs it does not know fail with a 404.
struct TitleServer {
    titles: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl TitleServer {
    fn new(titles: &[(&str, &str)]) -> Self {
        Self {
            titles: titles
                .iter()
                .map(|(url, title)| (url.to_string(), title.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for TitleServer {
    async fn fetch(&self, url: &str) -> sitemapper_scanner::error::Result<FetchedPage> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.titles.get(url) {
            Some(title) => Ok(FetchedPage {
                final_url: url.to_string(),
                title: Some(title.clone()),
                links: Vec::new(),
            }),
            None => Err(FetchError::NonSuccess {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[tokio::test]
async fn test_title_pages_fills_known_titles() {
    let server = TitleServer::new(&[("http://x/", "Home"), ("http://x/a.html", "A")]);
    let mut pages: PageMap = vec![
        ("http://x/a.html".to_string(), None),
        ("http://x/missing.html".to_string(), None),
    ]
    .into_iter()
    .collect();

    let root_title = title_pages(&server, "http://x/", &mut pages, None).await;

    assert_eq!(root_title, "Home");
    assert_eq!(pages.get("http://x/a.html"), Some(Some("A")));
    assert_eq!(pages.get("http://x/missing.html"), Some(None));
    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_title_pages_fetches_each_page_once() {
    let server = TitleServer::new(&[("http://x/", "Home")]);
    let mut pages: PageMap = vec![
        ("http://x/a.html".to_string(), None),
        ("http://x/b/".to_string(), None),
    ]
    .into_iter()
    .collect();

    title_pages(&server, "http://x/", &mut pages, None).await;

    let requested = server.requested.lock().unwrap().clone();
    assert_eq!(requested, vec!["http://x/", "http://x/a.html", "http://x/b/"]);
}

#[tokio::test]
async fn test_title_pages_root_index_is_normalized() {
    let server = TitleServer::new(&[("http://x/docs/", "Docs")]);
    let mut pages = PageMap::new();

    let root_title = title_pages(&server, "http://x/docs/index.html", &mut pages, None).await;

    assert_eq!(root_title, "Docs");
}

#[tokio::test]
async fn test_title_pages_unreachable_root_gives_empty_title() {
    let server = TitleServer::new(&[]);
    let mut pages = PageMap::new();

    let root_title = title_pages(&server, "http://x/", &mut pages, None).await;

    assert_eq!(root_title, "");
}

// ============================================================================
// Crawl Execution Tests
// ============================================================================

#[tokio::test]
async fn test_execute_crawl_from_input_list() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "http://example.com/index.html")?;
    writeln!(temp_file, "http://example.com/docs/index.html")?;
    writeln!(temp_file, "http://example.com/docs/guide.html")?;
    writeln!(temp_file, "http://elsewhere.com/ignored.html")?;

    let mut options = CrawlOptions::new("http://example.com/");
    options.input = Some(temp_file.path().to_path_buf());

    let outcome = execute_crawl(&options).await?;

    let urls: Vec<&str> = outcome.pages.urls().collect();
    assert_eq!(
        urls,
        vec!["http://example.com/docs/", "http://example.com/docs/guide.html"]
    );
    assert_eq!(outcome.root_title, "");
    assert_eq!(outcome.visited_count, 2);
    assert_eq!(outcome.root_url, "http://example.com/");

    Ok(())
}

#[tokio::test]
async fn test_execute_crawl_canonicalizes_input_root() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "http://example.com/")?;
    writeln!(temp_file, "http://example.com/about.html")?;

    let mut options = CrawlOptions::new("http://example.com/index.html#top");
    options.input = Some(temp_file.path().to_path_buf());

    let outcome = execute_crawl(&options).await?;

    assert_eq!(outcome.root_url, "http://example.com/");
    let urls: Vec<&str> = outcome.pages.urls().collect();
    assert_eq!(urls, vec!["http://example.com/about.html"]);

    Ok(())
}

#[tokio::test]
async fn test_execute_crawl_missing_input_file() {
    let mut options = CrawlOptions::new("http://example.com/");
    options.input = Some("/nonexistent/urls.txt".into());

    let result = execute_crawl(&options).await;

    assert!(matches!(result, Err(SiteMapError::Input { .. })));
}

#[tokio::test]
async fn test_execute_crawl_invalid_base_url() {
    let options = CrawlOptions::new("not a url");

    let result = execute_crawl(&options).await;

    assert!(matches!(
        result,
        Err(SiteMapError::Fetch(FetchError::InvalidUrl(_)))
    ));
}
