//! Handler types and dependencies

use std::sync::Arc;

use crate::core::config::Config;
use crate::telegram::api::TelegramApi;
use crate::telegram::auth::OwnerGate;
use crate::telegram::subscription::SubscriptionChecker;

/// Dependencies required by handlers
///
/// Cheap to clone; shared read-only by every request.
#[derive(Clone)]
pub struct HandlerDeps {
    pub api: Arc<dyn TelegramApi>,
    pub config: Arc<Config>,
    pub gate: OwnerGate,
    pub subscriptions: SubscriptionChecker,
    /// Learned from `getMe` at startup; empty when unknown
    pub bot_username: String,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(api: Arc<dyn TelegramApi>, config: Arc<Config>, bot_username: Option<String>) -> Self {
        Self {
            gate: OwnerGate::new(config.owner_id),
            subscriptions: SubscriptionChecker::new(Arc::clone(&api), &config),
            api,
            config,
            bot_username: bot_username.unwrap_or_default(),
        }
    }
}
