//! ownerbot - single-owner Telegram control bot
//!
//! Receives Telegram updates over a webhook, lets exactly one user through and
//! gates the menu behind a channel subscription.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the webhook HTTP server
//! - `telegram`: Bot API access, authorization, subscription checks and handlers
//! - `cli`: command-line interface

pub mod cli;
pub mod core;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, Config, ConfigError};
pub use crate::telegram::{HandlerDeps, TelegramApi};
