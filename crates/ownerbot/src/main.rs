use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use ownerbot::cli::{Cli, Commands};
use ownerbot::core::{init_logger, log_configuration, web_server, Config};
use ownerbot::telegram::{bootstrap, create_bot, require_webhook, unregister_webhook, HandlerDeps, TelegramApi};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if configuration is missing or invalid, or if the HTTP
/// server cannot start.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger();

    // Fatal here, before anything is served
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    match cli.command {
        Some(Commands::Run) | None => run_bot(config).await,
        Some(Commands::SetWebhook) => run_set_webhook(config).await,
        Some(Commands::DeleteWebhook) => run_delete_webhook(config).await,
    }
}

/// Bootstrap, then serve webhook updates until Ctrl-C
async fn run_bot(config: Config) -> Result<()> {
    log::info!("Starting bot...");
    log_configuration(&config);

    let api: Arc<dyn TelegramApi> = Arc::new(create_bot(&config)?);
    let bot_username = bootstrap(api.as_ref(), &config).await;

    let port = config.port;
    let deps = HandlerDeps::new(api, Arc::new(config), bot_username);
    web_server::start_web_server(deps, port).await?;

    Ok(())
}

async fn run_set_webhook(config: Config) -> Result<()> {
    let bot = create_bot(&config)?;
    require_webhook(&bot, &config).await?;
    log::info!(
        "Webhook set successfully to {}",
        config.redacted_webhook_url().unwrap_or_default()
    );
    Ok(())
}

async fn run_delete_webhook(config: Config) -> Result<()> {
    let bot = create_bot(&config)?;
    unregister_webhook(&bot).await?;
    log::info!("Webhook deleted");
    Ok(())
}
