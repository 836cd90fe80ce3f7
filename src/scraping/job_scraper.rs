// src/scraping/job_scraper.rs
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;
use tracing::{info, warn};

use super::extractor::JobPostingExtractor;
use super::types::JobPosting;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Failed to fetch the URL.")]
    Unreachable(#[source] reqwest::Error),
    #[error("Failed to fetch the URL.")]
    Status(StatusCode),
    #[error("Failed to scrape the URL.")]
    Internal(String),
}

impl ScrapeError {
    /// Bad input and unreachable pages are the caller's problem; anything
    /// else is ours.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ScrapeError::Internal(_))
    }
}

/// Source of raw page HTML.
#[rocket::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[rocket::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ScrapeError::Unreachable)?;

        if !response.status().is_success() {
            warn!("Job post {} answered with {}", url, response.status());
            return Err(ScrapeError::Status(response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::Internal(format!("Failed to read response body: {}", e)))
    }
}

/// Accept only absolute http(s) URLs.
pub fn parse_job_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw.trim()).map_err(|_| ScrapeError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ScrapeError::InvalidUrl),
    }
}

/// One-shot scrape: fetch, parse, extract. Nothing is cached or retried.
pub struct JobScraper {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<JobPostingExtractor>,
}

impl JobScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: JobPostingExtractor) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
        }
    }

    pub async fn scrape(&self, raw_url: &str) -> Result<JobPosting, ScrapeError> {
        let url = parse_job_url(raw_url)?;
        let html = self.fetcher.fetch(&url).await?;

        // Html is !Send; parse and extract off the async path.
        let extractor = Arc::clone(&self.extractor);
        let posting = tokio::task::spawn_blocking(move || extractor.extract(&html))
            .await
            .map_err(|e| ScrapeError::Internal(format!("Parser task failed: {}", e)))?;

        info!(
            "Extracted job from {}: {} at {}",
            url,
            posting.title.as_deref().unwrap_or("<no title>"),
            posting.company.as_deref().unwrap_or("<no company>")
        );
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::cleanup::TextCleaner;
    use std::sync::Mutex;

    struct StubFetcher {
        html: Option<String>,
        requested: Mutex<Vec<String>>,
    }

    #[rocket::async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.html
                .clone()
                .ok_or(ScrapeError::Status(StatusCode::NOT_FOUND))
        }
    }

    fn scraper_with(html: Option<&str>) -> (JobScraper, Arc<StubFetcher>) {
        let fetcher = Arc::new(StubFetcher {
            html: html.map(str::to_string),
            requested: Mutex::new(Vec::new()),
        });
        let extractor = JobPostingExtractor::new(TextCleaner::new(&[]).unwrap()).unwrap();
        (JobScraper::new(fetcher.clone(), extractor), fetcher)
    }

    #[test]
    fn test_parse_job_url() {
        assert!(parse_job_url("https://jobs.example.com/123").is_ok());
        assert!(parse_job_url("  http://example.com  ").is_ok());
        assert!(matches!(parse_job_url(""), Err(ScrapeError::InvalidUrl)));
        assert!(matches!(parse_job_url("not a url"), Err(ScrapeError::InvalidUrl)));
        assert!(matches!(
            parse_job_url("ftp://example.com/file"),
            Err(ScrapeError::InvalidUrl)
        ));
        assert!(matches!(
            parse_job_url("file:///etc/passwd"),
            Err(ScrapeError::InvalidUrl)
        ));
    }

    #[test]
    fn test_error_classification() {
        assert!(ScrapeError::InvalidUrl.is_client_error());
        assert!(ScrapeError::Status(StatusCode::FORBIDDEN).is_client_error());
        assert!(!ScrapeError::Internal("boom".into()).is_client_error());
        assert_eq!(
            ScrapeError::Status(StatusCode::FORBIDDEN).to_string(),
            "Failed to fetch the URL."
        );
    }

    #[tokio::test]
    async fn test_scrape_extracts_posting() {
        let (scraper, fetcher) =
            scraper_with(Some("<html><body><h1>Site Reliability Engineer</h1></body></html>"));
        let posting = scraper.scrape("https://jobs.example.com/42").await.unwrap();
        assert_eq!(posting.title.as_deref(), Some("Site Reliability Engineer"));
        assert_eq!(
            fetcher.requested.lock().unwrap().as_slice(),
            ["https://jobs.example.com/42"]
        );
    }

    #[tokio::test]
    async fn test_every_call_fetches_again() {
        let (scraper, fetcher) = scraper_with(Some("<h1>Engineer</h1>"));
        scraper.scrape("https://jobs.example.com/1").await.unwrap();
        scraper.scrape("https://jobs.example.com/1").await.unwrap();
        assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_url_skips_fetch() {
        let (scraper, fetcher) = scraper_with(Some("<h1>x</h1>"));
        let err = scraper.scrape("jobs.example.com").await.unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let (scraper, _) = scraper_with(None);
        let err = scraper.scrape("https://jobs.example.com/gone").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Status(StatusCode::NOT_FOUND)));
    }

    mod http {
        use super::*;
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const TEST_AGENT: &str = "coverly-test/1.0";

        fn job_url(server: &MockServer, route: &str) -> Url {
            Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
        }

        #[tokio::test]
        async fn test_fetch_sends_configured_user_agent() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/jobs/42"))
                .and(header("user-agent", TEST_AGENT))
                .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Data Engineer</h1>"))
                .expect(1)
                .mount(&server)
                .await;

            let fetcher = HttpPageFetcher::new(TEST_AGENT).unwrap();
            let html = fetcher.fetch(&job_url(&server, "/jobs/42")).await.unwrap();
            assert_eq!(html, "<h1>Data Engineer</h1>");
        }

        #[tokio::test]
        async fn test_fetch_error_status() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let fetcher = HttpPageFetcher::new(TEST_AGENT).unwrap();
            let err = fetcher.fetch(&job_url(&server, "/jobs/gone")).await.unwrap_err();
            assert!(matches!(err, ScrapeError::Status(StatusCode::NOT_FOUND)));
            assert!(err.is_client_error());
            assert_eq!(err.to_string(), "Failed to fetch the URL.");
        }

        #[tokio::test]
        async fn test_fetch_connection_refused() {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let url = Url::parse(&format!("http://{}/jobs/1", listener.local_addr().unwrap())).unwrap();
            drop(listener);

            let fetcher = HttpPageFetcher::new(TEST_AGENT).unwrap();
            let err = fetcher.fetch(&url).await.unwrap_err();
            assert!(matches!(err, ScrapeError::Unreachable(_)));
            assert!(err.is_client_error());
        }

        #[tokio::test]
        async fn test_scrape_through_http_fetcher() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/jobs/7"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string("<html><body><h1>Platform Engineer</h1></body></html>"),
                )
                .mount(&server)
                .await;

            let extractor = JobPostingExtractor::new(TextCleaner::new(&[]).unwrap()).unwrap();
            let scraper = JobScraper::new(Arc::new(HttpPageFetcher::new(TEST_AGENT).unwrap()), extractor);
            let posting = scraper
                .scrape(job_url(&server, "/jobs/7").as_str())
                .await
                .unwrap();
            assert_eq!(posting.title.as_deref(), Some("Platform Engineer"));
        }
    }
}
