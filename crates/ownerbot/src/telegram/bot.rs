//! Bot initialization and startup registration
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Bootstrap: bot identity, command menu and webhook registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::{Config, ConfigError};
use crate::core::error::AppResult;
use crate::telegram::api::TelegramApi;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "الأوامر المتاحة:")]
pub enum Command {
    #[command(description = "عرض أزرار التحكم")]
    Start,
    #[command(description = "معلومات عن البوت")]
    Info,
}

impl Command {
    /// Parses the leading `/command` token of a message.
    ///
    /// Matching ignores case, for the command and the `@botname` mention alike.
    /// Arguments after the command are ignored, so `/start payload` (deep links)
    /// still counts as `/start`. A mention of another bot (`/start@other_bot`)
    /// does not parse.
    pub fn from_text(text: &str, bot_username: &str) -> Option<Self> {
        let head = text.split_whitespace().next()?.to_lowercase();
        Self::parse(&head, &bot_username.to_lowercase()).ok()
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Failed to build the HTTP client
pub fn create_bot(config: &Config) -> AppResult<Bot> {
    let client = ClientBuilder::new().timeout(config.http_timeout).build()?;
    let bot = Bot::with_client(config.token(), client);

    Ok(match &config.bot_api_url {
        Some(url) => bot.set_api_url(url.clone()),
        None => bot,
    })
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(api: &dyn TelegramApi) -> ResponseResult<()> {
    api.set_commands(Command::bot_commands()).await
}

/// Registers `{RENDER_EXTERNAL_URL}/webhook/{token}` with Telegram.
///
/// # Returns
/// * `Ok(true)` - Webhook registered
/// * `Ok(false)` - No external URL configured, nothing to do
/// * `Err(RequestError)` - Telegram rejected the registration
pub async fn register_webhook(api: &dyn TelegramApi, config: &Config) -> ResponseResult<bool> {
    let Some(url) = config.webhook_url() else {
        return Ok(false);
    };

    api.set_webhook(url.clone(), config.webhook_secret().map(str::to_string))
        .await?;
    Ok(true)
}

/// `set-webhook` subcommand: like [`register_webhook`], but a missing external URL is an error.
pub async fn require_webhook(api: &dyn TelegramApi, config: &Config) -> AppResult<()> {
    if register_webhook(api, config).await? {
        Ok(())
    } else {
        Err(ConfigError::MissingWebhookUrl.into())
    }
}

/// `delete-webhook` subcommand
pub async fn unregister_webhook(api: &dyn TelegramApi) -> AppResult<()> {
    api.delete_webhook().await?;
    Ok(())
}

/// Startup sequence run before the HTTP server starts
///
/// Every step is best-effort: failures are logged and the server starts anyway.
///
/// # Returns
/// The bot's username if `getMe` succeeded
pub async fn bootstrap(api: &dyn TelegramApi, config: &Config) -> Option<String> {
    let bot_username = match api.bot_username().await {
        Ok(username) => {
            log::info!("Bot username: {:?}", username);
            username
        }
        Err(e) => {
            log::warn!("Failed to fetch bot identity: {}", e);
            None
        }
    };

    if let Err(e) = setup_bot_commands(api).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let redacted = config.redacted_webhook_url().unwrap_or_default();
    match register_webhook(api, config).await {
        Ok(true) => log::info!("Webhook set successfully to {}", redacted),
        Ok(false) => log::info!("RENDER_EXTERNAL_URL not set, webhook was not registered automatically"),
        Err(e) => log::error!("Failed to set webhook to {}: {}", redacted, e),
    }

    bot_username
}
