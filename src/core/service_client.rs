// src/core/service_client.rs
//! HTTP client the front-end uses for `/api/generate` and `/api/scrape-url`

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::app_log;
use crate::scraping::JobPosting;

const GENERATE_ENDPOINT: &str = "/api/generate";
const SCRAPE_ENDPOINT: &str = "/api/scrape-url";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

/// `{ "result": ... }` envelope shared by every API route.
#[derive(Debug, Deserialize)]
struct ResultEnvelope<T> {
    result: Option<T>,
}

/// The scrape route answers with a posting on success and a message otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScrapeReply {
    Posting(JobPosting),
    Message(String),
}

/// The service answered with an error status and this message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceRejection {
    pub status: StatusCode,
    pub message: String,
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the generation backend for a letter. `Ok(None)` means the backend
    /// answered without a usable `result`. An error status carrying a
    /// `{ result }` message becomes a [`ServiceRejection`].
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let (status, envelope) = self
            .post_envelope::<_, String>(GENERATE_ENDPOINT, &GenerateRequest { prompt })
            .await?;
        let result = envelope.result.filter(|text| !text.is_empty());

        if !status.is_success() {
            let message = result.unwrap_or_else(|| format!("HTTP {} error", status));
            return Err(ServiceRejection { status, message }.into());
        }
        Ok(result)
    }

    /// Scrape a job posting through the service. Error statuses still carry a
    /// `{ result }` message, so they are returned as `ScrapeReply::Message`.
    pub async fn scrape(&self, url: &str) -> Result<Option<ScrapeReply>> {
        let (status, envelope) = self
            .post_envelope::<_, ScrapeReply>(SCRAPE_ENDPOINT, &ScrapeRequest { url })
            .await?;
        app_log!(debug, "Scrape service status: {}", status);

        Ok(envelope.result)
    }

    /// POST JSON and read the `{ result }` envelope whatever the status. A
    /// body that is not an envelope is an error.
    async fn post_envelope<T, R>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<(StatusCode, ResultEnvelope<R>)>
    where
        T: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        app_log!(debug, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", url))?;

        let envelope = serde_json::from_str(&body)
            .with_context(|| format!("HTTP {} from {}: unexpected body", status, url))?;
        Ok((status, envelope))
    }
}
