//! Telegram bot integration and handlers

pub mod api;
pub mod auth;
pub mod bot;
pub mod handlers;
pub mod messages;
pub mod subscription;
pub mod update;

// Re-exports for convenience
pub use api::TelegramApi;
pub use bot::{bootstrap, create_bot, register_webhook, require_webhook, unregister_webhook, Command};
pub use handlers::{dispatch, handle_update, HandlerDeps};
pub use subscription::{LookupFailure, MembershipStatus, SubscriptionChecker};
pub use update::{Action, Incoming, Origin};
