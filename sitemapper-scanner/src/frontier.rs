use crate::error::{FetchError, Result};
use crate::fetcher::PageFetcher;
use crate::resolver::{authority, canonicalize, normalize_index, with_index_file};
use crate::result::{CrawlOutcome, PageMap};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Called once per dequeued URL with the running visit count.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Whether page titles are collected along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlMode {
    /// Only record that a page exists.
    #[default]
    Presence,
    /// Record each page's `<title>`.
    Titles,
}

/// Breadth-first, single-domain crawl bounded by a visit budget.
///
/// One fetch is in flight at a time, so visit order is exactly the order in
/// which links were discovered.
pub struct Frontier<F: PageFetcher> {
    fetcher: F,
    root_url: String,
    root_index: String,
    domain: String,
    max_urls: usize,
    mode: CrawlMode,
    progress_callback: Option<ProgressCallback>,
    queue: VecDeque<String>,
    visited: HashSet<String>,
    visited_count: usize,
    pages: PageMap,
    root_title: Option<String>,
}

impl<F: PageFetcher> Frontier<F> {
    pub fn new(fetcher: F, root_url: &str) -> Result<Self> {
        let mut root = Url::parse(root_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", root_url, e)))?;
        if root.host_str().is_none() {
            return Err(FetchError::InvalidUrl(format!("{}: missing host", root_url)));
        }
        canonicalize(&mut root);

        let domain = authority(&root);
        let root_url = root.to_string();
        let root_index = normalize_index(&root_url);

        let mut queue = VecDeque::new();
        queue.push_back(root_url.clone());
        queue.push_back(with_index_file(&root));

        Ok(Self {
            fetcher,
            root_url,
            root_index,
            domain,
            max_urls: 500,
            mode: CrawlMode::default(),
            progress_callback: None,
            queue,
            visited: HashSet::new(),
            visited_count: 0,
            pages: PageMap::new(),
            root_title: None,
        })
    }

    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    pub fn with_mode(mut self, mode: CrawlMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Drive the crawl until the queue drains or the budget is spent.
    pub async fn run(mut self) -> CrawlOutcome {
        info!(
            "Starting crawl of {} (domain {}, budget {} URLs)",
            self.root_url, self.domain, self.max_urls
        );

        while self.visited_count < self.max_urls {
            let Some(url) = self.queue.pop_front() else {
                break;
            };
            self.visited_count += 1;

            if let Some(ref callback) = self.progress_callback {
                callback(self.visited_count, url.clone());
            }

            self.visit(url).await;
        }

        info!(
            "Crawl complete. Visited {} URLs, recorded {} pages ({} still queued)",
            self.visited_count,
            self.pages.len(),
            self.queue.len()
        );

        CrawlOutcome {
            root_url: self.root_url,
            pages: self.pages,
            root_title: self.root_title.unwrap_or_default(),
            visited_count: self.visited_count,
        }
    }

    async fn visit(&mut self, url: String) {
        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(FetchError::NonSuccess { status, .. }) => {
                debug!("Skipping {} (HTTP {})", url, status);
                return;
            }
            Err(e) => {
                warn!("Crawl error for {}: {}", url, e);
                return;
            }
        };

        let mut final_url = match Url::parse(&page.final_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Unparseable final URL {} for {}: {}", page.final_url, url, e);
                return;
            }
        };
        canonicalize(&mut final_url);
        let canonical = final_url.to_string();

        self.visited.insert(url);
        self.visited.insert(page.final_url);
        self.visited.insert(canonical.clone());

        // Only the last hop is checked; intermediate redirect hosts are not seen here.
        if authority(&final_url) != self.domain {
            debug!("{} left the domain, ignoring its links", canonical);
            return;
        }

        let discovered = page.links.len();
        let queued = page
            .links
            .into_iter()
            .filter(|link| self.enqueue(link))
            .count();
        debug!("{}: {} links, {} newly queued", canonical, discovered, queued);

        let title = match self.mode {
            CrawlMode::Titles => page.title,
            CrawlMode::Presence => None,
        };

        if canonical == self.root_url || canonical == self.root_index {
            if self.root_title.is_none() {
                self.root_title = title;
            }
            return;
        }

        self.pages.insert(canonical, title);
    }

    /// Queue a discovered link if it is on-domain and unseen. Marks it visited
    /// immediately so a second referrer cannot queue it again.
    fn enqueue(&mut self, link: &str) -> bool {
        let Ok(mut parsed) = Url::parse(link) else {
            return false;
        };
        canonicalize(&mut parsed);

        if authority(&parsed) != self.domain {
            return false;
        }

        let link = parsed.to_string();
        if self.visited.contains(&link) {
            return false;
        }

        self.visited.insert(link.clone());
        self.queue.push_back(link);
        true
    }
}
