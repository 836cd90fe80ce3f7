// src/web/handlers/scrape_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::scraping::{JobPosting, ScrapeError};
use crate::web::types::{error_reply, ErrorReply, ResultResponse};
use crate::web::AppState;

pub const INVALID_URL: &str = "Invalid URL";
pub const SCRAPE_FAILED: &str = "Failed to scrape the URL.";

/// Pull a non-empty string `url` out of a request body.
pub fn requested_url(body: &Value) -> Option<&str> {
    body.get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

pub async fn scrape_url_handler(
    body: String,
    state: &State<AppState>,
) -> Result<Json<ResultResponse<JobPosting>>, ErrorReply> {
    let request_id = Uuid::new_v4();

    let payload: Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("[{}] Unreadable scrape request body: {}", request_id, e);
            return Err(error_reply(Status::InternalServerError, SCRAPE_FAILED));
        }
    };

    let Some(url) = requested_url(&payload) else {
        warn!("[{}] Scrape request without a usable url", request_id);
        return Err(error_reply(Status::BadRequest, INVALID_URL));
    };

    info!("[{}] Scraping {}", request_id, url);

    match state.scraper.scrape(url).await {
        Ok(posting) => {
            info!("[{}] Scrape succeeded", request_id);
            Ok(ResultResponse::new(posting))
        }
        Err(e) => {
            let status = if e.is_client_error() {
                Status::BadRequest
            } else {
                Status::InternalServerError
            };
            match &e {
                ScrapeError::Internal(detail) => {
                    error!("[{}] Scrape failed: {}", request_id, detail)
                }
                other => warn!("[{}] Scrape rejected: {:?}", request_id, other),
            }
            Err(error_reply(status, e.to_string()))
        }
    }
}
