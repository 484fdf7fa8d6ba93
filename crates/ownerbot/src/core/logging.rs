//! Logging initialization and startup diagnostics

use crate::core::config::Config;

/// Log filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize the console logger
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL`, then [`DEFAULT_LOG_LEVEL`].
/// Calling this twice is harmless, which keeps tests simple.
pub fn init_logger() {
    let filter = ["RUST_LOG", "LOG_LEVEL"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.parse_filters(&filter);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Logs the effective configuration at startup, without secrets
pub fn log_configuration(config: &Config) {
    log::info!("Owner ID: {}", config.owner_id.0);
    log::info!("Subscription channel: {}", config.channel);
    log::info!("Listening port: {}", config.port);
    match config.redacted_webhook_url() {
        Some(url) => log::info!("Webhook URL: {}", url),
        None => log::info!("RENDER_EXTERNAL_URL not set, webhook will not be registered automatically"),
    }
    if let Some(api) = &config.bot_api_url {
        log::info!("Using custom Bot API URL: {}", api);
    }
    if config.webhook_secret().is_some() {
        log::info!("Webhook secret header check enabled");
    }
}
