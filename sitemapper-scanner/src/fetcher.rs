use crate::error::{FetchError, Result};
use crate::extract::extract;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// What a successful fetch yields: where we ended up, and what the page says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects, exactly as the transport reported it.
    pub final_url: String,
    pub title: Option<String>,
    /// Absolute, fragment-free, index-normalized hrefs in document order.
    pub links: Vec<String>,
}

impl FetchedPage {
    /// A page that loaded but had nothing to parse (not HTML).
    pub fn empty(final_url: String) -> Self {
        Self {
            final_url,
            title: None,
            links: Vec::new(),
        }
    }
}

/// The frontier's only view of the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sitemapper/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let final_url = response.url().to_string();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::NonSuccess {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        if !is_html {
            debug!("{} is not HTML, treating as empty page", final_url);
            return Ok(FetchedPage::empty(final_url));
        }

        let body = response.text().await?;
        let (title, links) = extract(&body, &final_url);

        Ok(FetchedPage {
            final_url,
            title,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=UTF-8")
                    .set_body_bytes(
                        b"<html><head><title>Home</title></head><body>\
                          <a href=\"/a.html\">A</a><a href=\"sub/\">Sub</a></body></html>"
                            .as_slice(),
                    ),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let root = format!("{}/", mock_server.uri());
        let page = fetcher.fetch(&root).await.unwrap();

        assert_eq!(page.final_url, root);
        assert_eq!(page.title, Some("Home".to_string()));
        assert_eq!(
            page.links,
            vec![format!("{}/a.html", mock_server.uri()), format!("{}/sub/", mock_server.uri())]
        );
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/missing", mock_server.uri())).await;

        match result {
            Err(FetchError::NonSuccess { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected NonSuccess, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_html_is_empty_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.4 <a href=\"/hidden\">".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/report.pdf", mock_server.uri());
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page, FetchedPage::empty(url));
    }

    #[tokio::test]
    async fn test_fetch_reports_final_url_after_redirect() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new/", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/new/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html><head><title>New</title></head></html>".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let page = fetcher.fetch(&format!("{}/old", mock_server.uri())).await.unwrap();

        assert_eq!(page.final_url, format!("{}/new/", mock_server.uri()));
        assert_eq!(page.title, Some("New".to_string()));
    }
}
