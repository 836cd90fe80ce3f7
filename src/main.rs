use anyhow::Result;
use clap::Parser;
use cover_letter::app_log;
use cover_letter::cli::{handle_command, Cli};
use cover_letter::core::ConfigManager;
use cover_letter::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration using unified ConfigManager
    let config = ConfigManager::load()?;
    init_logging(config.logging.file.as_deref())?;

    app_log!(
        debug,
        "Environment: {}",
        std::env::var("COVERLY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    );

    handle_command(cli, config).await
}
