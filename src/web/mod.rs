// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::core::ConfigManager;
use crate::letter::PageLayout;
use crate::scraping::{HttpPageFetcher, JobPosting, JobPostingExtractor, JobScraper, PageFetcher, TextCleaner};
use crate::wizard::{configured_steps, FormStep};

/// Everything the routes share.
pub struct AppState {
    pub scraper: JobScraper,
    pub steps: Vec<FormStep>,
    pub layout: PageLayout,
}

impl AppState {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: JobPostingExtractor,
        steps: Vec<FormStep>,
    ) -> Self {
        Self {
            scraper: JobScraper::new(fetcher, extractor),
            steps,
            layout: PageLayout::default(),
        }
    }

    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let cleaner = TextCleaner::new(&config.scraper.extra_boilerplate)?;
        let extractor = JobPostingExtractor::new(cleaner)?;
        let fetcher = HttpPageFetcher::new(&config.scraper.user_agent)?;
        let steps = configured_steps(config.wizard.steps_file.as_deref())
            .context("Failed to load wizard steps")?;

        Ok(Self::new(Arc::new(fetcher), extractor, steps))
    }
}

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/scrape-url", data = "<body>")]
pub async fn scrape_url(
    body: String,
    state: &State<AppState>,
) -> Result<Json<ResultResponse<JobPosting>>, ErrorReply> {
    handlers::scrape_url_handler(body, state).await
}

#[post("/export", data = "<request>")]
pub async fn export_letter(
    request: Json<ExportRequest>,
    state: &State<AppState>,
) -> Result<PdfResponse, ErrorReply> {
    handlers::export_letter_handler(request, state).await
}

#[get("/form-steps")]
pub async fn form_steps(state: &State<AppState>) -> Json<ResultResponse<Vec<FormStep>>> {
    handlers::form_steps_handler(state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ResultResponse<String>> {
    ResultResponse::new("Invalid request format".to_string())
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ResultResponse<String>> {
    ResultResponse::new("Not found".to_string())
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ResultResponse<String>> {
    ResultResponse::new("Invalid request format".to_string())
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ResultResponse<String>> {
    ResultResponse::new("Internal server error".to_string())
}

/// Assemble the Rocket instance with default configuration.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![scrape_url, export_letter, form_steps, health, options],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let state = AppState::from_config(&config)?;

    info!("Starting cover letter API server");
    info!(
        "Server: http://{}:{}",
        config.server.address, config.server.port
    );
    info!("Wizard steps loaded: {}", state.steps.len());

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address))
        .merge(("port", config.server.port));

    build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
