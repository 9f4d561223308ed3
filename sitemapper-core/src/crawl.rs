use crate::error::{Result, SiteMapError};
use crate::input::load_page_list;
use crate::render::OutputMode;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_scanner::resolver::{canonical, normalize_index};
use sitemapper_scanner::{
    CrawlMode, CrawlOutcome, Frontier, HttpFetcher, PageFetcher, PageMap, ProgressCallback,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Options for producing the flat page map
pub struct CrawlOptions {
    pub base_url: String,
    /// URL list to use instead of crawling
    pub input: Option<PathBuf>,
    pub max_urls: usize,
    pub mode: OutputMode,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl CrawlOptions {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            input: None,
            max_urls: 500,
            mode: OutputMode::Simple,
            timeout_secs: 10,
            show_progress: false,
        }
    }

    fn crawl_mode(&self) -> CrawlMode {
        if self.mode.wants_titles() {
            CrawlMode::Titles
        } else {
            CrawlMode::Presence
        }
    }
}

/// Extract the path component from a URL, for progress messages
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() { "/".to_string() } else { path }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Produce the page map, either by crawling from `base_url` or from the
/// URL list in `input`.
pub async fn execute_crawl(options: &CrawlOptions) -> Result<CrawlOutcome> {
    let fetcher = HttpFetcher::with_timeout(options.timeout_secs)?;

    match options.input {
        Some(ref input) => {
            let root_url = canonical(&options.base_url)
                .ok_or_else(|| SiteMapError::InvalidUrl(options.base_url.clone()))?;
            let mut pages = load_page_list(input, &root_url, options.max_urls)?;
            info!("Loaded {} URLs from {}", pages.len(), input.display());

            let root_title = if options.mode.wants_titles() {
                let progress_bar = options
                    .show_progress
                    .then(|| title_progress_bar(pages.len() as u64 + 1));
                let title =
                    title_pages(&fetcher, &root_url, &mut pages, progress_bar.as_ref())
                        .await;
                if let Some(pb) = progress_bar {
                    pb.finish_and_clear();
                }
                title
            } else {
                String::new()
            };

            Ok(CrawlOutcome {
                root_url,
                visited_count: pages.len(),
                pages,
                root_title,
            })
        }
        None => {
            let progress_bar = options.show_progress.then(crawl_spinner);

            let mut frontier = Frontier::new(fetcher, &options.base_url)?
                .with_max_urls(options.max_urls)
                .with_mode(options.crawl_mode());

            if let Some(ref pb) = progress_bar {
                let pb = pb.clone();
                let max_urls = options.max_urls;
                let callback: ProgressCallback = Arc::new(move |count: usize, url: String| {
                    pb.set_message(format!(
                        "Crawling... {}/{} {}",
                        count,
                        max_urls,
                        extract_url_path(&url)
                    ));
                });
                frontier = frontier.with_progress_callback(callback);
            }

            let outcome = frontier.run().await;

            if let Some(pb) = progress_bar {
                pb.finish_with_message(format!(
                    "Crawl complete! {} URLs visited, {} pages found",
                    outcome.visited_count,
                    outcome.pages.len()
                ));
            }

            Ok(outcome)
        }
    }
}

/// Fetch every listed page once (and the root) to learn its title.
///
/// Failures leave the title unknown; nothing here aborts. Returns the
/// root's title, or an empty string.
pub async fn title_pages<F: PageFetcher>(
    fetcher: &F,
    root_url: &str,
    pages: &mut PageMap,
    progress_bar: Option<&ProgressBar>,
) -> String {
    let root_title = fetch_title(fetcher, &normalize_index(root_url))
        .await
        .unwrap_or_default();
    if let Some(pb) = progress_bar {
        pb.inc(1);
    }

    let urls: Vec<String> = pages.urls().map(str::to_string).collect();
    for url in urls {
        if let Some(pb) = progress_bar {
            pb.set_message(extract_url_path(&url));
        }
        let title = fetch_title(fetcher, &url).await;
        pages.set_title(&url, title);
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
    }

    root_title
}

async fn fetch_title<F: PageFetcher>(fetcher: &F, url: &str) -> Option<String> {
    match fetcher.fetch(url).await {
        Ok(page) => page.title,
        Err(e) => {
            debug!("No title for {}: {}", url, e);
            None
        }
    }
}

fn crawl_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Starting crawl...");
    pb
}

fn title_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
