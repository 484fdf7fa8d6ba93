//! Process configuration
//!
//! Read once at startup from the environment, then shared read-only as `Arc<Config>`. Nothing mutates it afterwards.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use teloxide::types::{ChatId, Recipient, UserId};
use thiserror::Error;
use url::Url;

/// Owner allowed to use the bot when `OWNER_ID` is not set
pub const DEFAULT_OWNER_ID: u64 = 5_581_457_665;

/// Channel checked for subscription when `CHANNEL_USERNAME` is not set
pub const DEFAULT_CHANNEL: &str = "@qd3qd";

/// HTTP port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Outbound Bot API request timeout when `HTTP_TIMEOUT_SECS` is not set
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_TOKEN is not set")]
    MissingToken,

    #[error("RENDER_EXTERNAL_URL is not set, there is no webhook URL to register")]
    MissingWebhookUrl,

    #[error("OWNER_ID must be a positive integer, got {0:?}")]
    InvalidOwnerId(String),

    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

pub struct Config {
    token: SecretString,
    /// The single user allowed past the authorization gate
    pub owner_id: UserId,
    /// Channel as `@name` or a numeric chat ID. A bare `name` gets its `@` at load time.
    pub channel: String,
    /// Full webhook URL (`{base}/webhook/{token}`), present when an external base URL is configured
    webhook_url: Option<Url>,
    pub port: u16,
    /// Custom Bot API server, e.g. a local `telegram-bot-api` instance
    pub bot_api_url: Option<Url>,
    pub http_timeout: Duration,
    webhook_secret: Option<SecretString>,
}

impl Config {
    /// Reads the process environment. `main` loads `.env` before calling this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = var("TELEGRAM_TOKEN")
            .or_else(|| var("BOT_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let owner_id = match var("OWNER_ID") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidOwnerId(raw))?,
            None => DEFAULT_OWNER_ID,
        };

        let channel = normalize_channel(var("CHANNEL_USERNAME").as_deref().unwrap_or(DEFAULT_CHANNEL));

        let webhook_url = var("RENDER_EXTERNAL_URL")
            .or_else(|| var("WEBHOOK_BASE_URL"))
            .map(|base| build_webhook_url(&base, &token))
            .transpose()?;

        let port = match var("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let bot_api_url = var("BOT_API_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                    name: "BOT_API_URL",
                    source,
                })
            })
            .transpose()?;

        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                name: "HTTP_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            token: SecretString::from(token),
            owner_id: UserId(owner_id),
            channel,
            webhook_url,
            port,
            bot_api_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            webhook_secret: var("WEBHOOK_SECRET").map(SecretString::from),
        })
    }

    /// Overrides the listen port (from the `--port` flag).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Checks a token taken from the webhook path against the configured one.
    pub fn token_matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.token.expose_secret().as_bytes(), candidate.as_bytes())
    }

    pub fn webhook_url(&self) -> Option<&Url> {
        self.webhook_url.as_ref()
    }

    /// Webhook URL safe for logs: the token segment is replaced.
    pub fn redacted_webhook_url(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|url| url.as_str().replace(self.token.expose_secret(), "<token>"))
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_ref().map(|s| s.expose_secret())
    }

    /// Checks the secret token header. Always true when no secret is configured.
    pub fn webhook_secret_matches(&self, provided: Option<&str>) -> bool {
        match (self.webhook_secret(), provided) {
            (None, _) => true,
            (Some(expected), Some(provided)) => constant_time_eq(expected.as_bytes(), provided.as_bytes()),
            (Some(_), None) => false,
        }
    }

    /// The configured channel as a Bot API chat reference.
    ///
    /// Numeric identifiers (`-100...`) address the chat by ID, everything else by `@username`.
    pub fn channel_recipient(&self) -> Recipient {
        match self.channel.parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(self.channel.clone()),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token)
            .field("owner_id", &self.owner_id)
            .field("channel", &self.channel)
            .field("webhook_url", &self.redacted_webhook_url())
            .field("port", &self.port)
            .field("bot_api_url", &self.bot_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("webhook_secret", &self.webhook_secret)
            .finish()
    }
}

fn build_webhook_url(base: &str, token: &str) -> Result<Url, ConfigError> {
    let raw = format!("{}/webhook/{}", base.trim_end_matches('/'), token);
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
        name: "RENDER_EXTERNAL_URL",
        source,
    })
}

fn normalize_channel(raw: &str) -> String {
    if raw.starts_with('@') || raw.parse::<i64>().is_ok() {
        raw.to_string()
    } else {
        format!("@{}", raw)
    }
}

/// Equality whose running time depends only on the lengths
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}
