//! Channel subscription checks
//!
//! A user counts as subscribed when their membership status in the configured
//! channel is creator, administrator, member or restricted. Lookup failures
//! (private channel, unknown user, network) are logged and treated as
//! "not subscribed".

use std::sync::Arc;

use teloxide::types::{ChatMemberStatus, Recipient, UserId};
use teloxide::{ApiError, RequestError};

use crate::core::config::Config;
use crate::telegram::api::TelegramApi;

/// Why a membership lookup produced no status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Channel does not exist or the bot cannot see it
    ChatNotFound,
    /// Telegram does not know this user in the channel
    UserNotFound,
    /// Flood control kicked in
    RateLimited,
    /// Transport failure talking to the Bot API
    Network,
    /// Any other Bot API error, with its description
    Api(String),
}

impl From<&RequestError> for LookupFailure {
    fn from(err: &RequestError) -> Self {
        match err {
            RequestError::Api(ApiError::ChatNotFound) => LookupFailure::ChatNotFound,
            RequestError::Api(ApiError::UserNotFound) => LookupFailure::UserNotFound,
            RequestError::RetryAfter(_) => LookupFailure::RateLimited,
            RequestError::Network(_) | RequestError::Io(_) => LookupFailure::Network,
            other => LookupFailure::Api(other.to_string()),
        }
    }
}

/// Membership state of a user in the subscription channel
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MembershipStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    /// The lookup failed; carries the reason
    Unknown(LookupFailure),
}

impl MembershipStatus {
    pub fn is_subscribed(&self) -> bool {
        matches!(
            self,
            MembershipStatus::Creator
                | MembershipStatus::Administrator
                | MembershipStatus::Member
                | MembershipStatus::Restricted
        )
    }
}

impl From<ChatMemberStatus> for MembershipStatus {
    fn from(status: ChatMemberStatus) -> Self {
        match status {
            ChatMemberStatus::Owner => MembershipStatus::Creator,
            ChatMemberStatus::Administrator => MembershipStatus::Administrator,
            ChatMemberStatus::Member => MembershipStatus::Member,
            ChatMemberStatus::Restricted => MembershipStatus::Restricted,
            ChatMemberStatus::Left => MembershipStatus::Left,
            ChatMemberStatus::Banned => MembershipStatus::Kicked,
        }
    }
}

impl From<ResultStatus> for MembershipStatus {
    fn from(result: ResultStatus) -> Self {
        match result {
            Ok(status) => status.into(),
            Err(err) => MembershipStatus::Unknown(LookupFailure::from(&err)),
        }
    }
}

type ResultStatus = Result<ChatMemberStatus, RequestError>;

/// Checks membership of users in the configured channel
#[derive(Clone)]
pub struct SubscriptionChecker {
    api: Arc<dyn TelegramApi>,
    channel: Recipient,
    channel_label: String,
}

impl SubscriptionChecker {
    pub fn new(api: Arc<dyn TelegramApi>, config: &Config) -> Self {
        Self {
            api,
            channel: config.channel_recipient(),
            channel_label: config.channel.clone(),
        }
    }

    /// Fetches the user's status. Never fails: errors become [`MembershipStatus::Unknown`].
    pub async fn status(&self, user_id: UserId) -> MembershipStatus {
        let result = self.api.chat_member_status(self.channel.clone(), user_id).await;
        if let Err(e) = &result {
            log::warn!(
                "Failed to check subscription of user {} in {}: {}",
                user_id.0,
                self.channel_label,
                e
            );
        }

        let status = MembershipStatus::from(result);
        log::info!(
            "user {} subscription status in {}: {}",
            user_id.0,
            self.channel_label,
            status
        );
        status
    }

    pub async fn is_subscribed(&self, user_id: UserId) -> bool {
        self.status(user_id).await.is_subscribed()
    }
}
