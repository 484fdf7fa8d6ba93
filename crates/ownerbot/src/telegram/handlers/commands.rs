//! Replies to typed commands (`/start`, `/info`)

use teloxide::types::{ChatId, InlineKeyboardMarkup, UserId};

use super::types::HandlerDeps;
use crate::telegram::auth::Access;
use crate::telegram::messages::{self, MSG_FORBIDDEN, MSG_INFO_COMMAND, MSG_WELCOME};

/// A message to send back
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

/// Builds the `/start` reply: forbidden, please-subscribe, or the welcome menu.
pub async fn start_reply(deps: &HandlerDeps, user_id: UserId) -> Reply {
    if deps.gate.check(user_id) == Access::Denied {
        return Reply::text(MSG_FORBIDDEN);
    }

    if !deps.subscriptions.is_subscribed(user_id).await {
        return Reply::text(messages::not_subscribed(&deps.config.channel));
    }

    Reply {
        text: MSG_WELCOME.to_string(),
        keyboard: Some(messages::main_keyboard()),
    }
}

/// Builds the `/info` reply. No subscription check.
pub fn info_reply(deps: &HandlerDeps, user_id: UserId) -> Reply {
    match deps.gate.check(user_id) {
        Access::Allowed => Reply::text(MSG_INFO_COMMAND),
        Access::Denied => Reply::text(MSG_FORBIDDEN),
    }
}

pub(super) async fn send_reply(deps: &HandlerDeps, chat_id: ChatId, reply: Reply) {
    if let Err(e) = deps.api.send_text(chat_id, &reply.text, reply.keyboard).await {
        log::warn!("Failed to send reply to chat {}: {}", chat_id.0, e);
    }
}
