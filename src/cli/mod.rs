// src/cli/mod.rs
pub mod frontend;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use crate::app_log;
use crate::core::{ConfigManager, ServiceClient};
use crate::letter::{export_pdf, LetterViewer, PageLayout, SystemClipboard, DEFAULT_FILENAME};
use crate::web::start_web_server;
use crate::wizard::{build_detail_prompt, configured_steps, FormWizard};
use frontend::{generate_letter, Frontend};

#[derive(Parser)]
#[command(name = "coverly")]
#[command(about = "Cover letter studio: job posting scraper API and terminal front-end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the API the front-end talks to
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
    /// Generate a letter from a free-text description
    Prompt { text: String },
    /// Fill in the detailed form step by step, then generate
    Wizard,
    /// Scrape a job posting through the API
    Scrape { url: String },
    /// Render a plain-text letter to PDF
    Export {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.frontend.api_base_url.clone());

    match cli.command {
        Command::Serve => start_web_server(config).await,

        Command::Prompt { text } => {
            if text.trim().is_empty() {
                anyhow::bail!("Please describe the job or yourself first");
            }
            let client = ServiceClient::new(api_url)?;
            generate_and_view(&client, &config, &text).await
        }

        Command::Wizard => {
            let steps = configured_steps(config.wizard.steps_file.as_deref())?;
            let mut wizard = FormWizard::new(steps)?;

            let answers = {
                let stdin = io::stdin();
                let mut ui = Frontend::new(stdin.lock(), io::stdout());
                ui.run_wizard(&mut wizard)?
            };
            let Some(answers) = answers else {
                app_log!(info, "Wizard closed without submitting");
                return Ok(());
            };

            let client = ServiceClient::new(api_url)?;
            generate_and_view(&client, &config, &build_detail_prompt(&answers)).await
        }

        Command::Scrape { url } => {
            let client = ServiceClient::new(api_url)?;
            let stdin = io::stdin();
            let mut ui = Frontend::new(stdin.lock(), io::stdout());
            match client.scrape(&url).await {
                Ok(reply) => ui.show_posting(reply),
                Err(e) => {
                    app_log!(error, "Scrape request failed: {:#}", e);
                    println!("Error scraping the URL.");
                    Ok(())
                }
            }
        }

        Command::Export { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let output = output.unwrap_or_else(|| config.export.output_dir.join(DEFAULT_FILENAME));
            let bytes = export_pdf(&text, &PageLayout::default())?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            app_log!(info, "Wrote {}", output.display());
            Ok(())
        }
    }
}

async fn generate_and_view(client: &ServiceClient, config: &ConfigManager, prompt: &str) -> Result<()> {
    config.ensure_directories().await?;

    let mut viewer = LetterViewer::new();
    println!("Generating your cover letter...");
    let outcome = generate_letter(client, &mut viewer, prompt).await;

    let stdin = io::stdin();
    let mut ui = Frontend::new(stdin.lock(), io::stdout());
    ui.show_generation(&viewer, &outcome)?;
    ui.run_viewer(
        &mut viewer,
        &mut SystemClipboard,
        &PageLayout::default(),
        &config.export.output_dir,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::parse_from(["coverly", "scrape", "https://jobs.example.com/1"]);
        assert!(matches!(cli.command, Command::Scrape { ref url } if url == "https://jobs.example.com/1"));
        assert!(cli.api_url.is_none());

        let cli = Cli::parse_from([
            "coverly",
            "export",
            "letter.txt",
            "-o",
            "out.pdf",
            "--api-url",
            "http://localhost:9000",
        ]);
        assert!(matches!(
            cli.command,
            Command::Export { ref output, .. } if output.as_deref() == Some(std::path::Path::new("out.pdf"))
        ));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_prompt_requires_text() {
        assert!(Cli::try_parse_from(["coverly", "prompt"]).is_err());
    }
}
