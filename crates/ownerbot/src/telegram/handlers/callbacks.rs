//! Inline button presses (`check_sub`, `info`)

use teloxide::types::{CallbackQuery, UserId};
use teloxide::{ApiError, RequestError};

use super::types::HandlerDeps;
use crate::telegram::auth::Access;
use crate::telegram::messages::{self, MSG_FORBIDDEN, MSG_INFO_CALLBACK};
use crate::telegram::update::Action;

/// Text the pressed message should be edited to, or `None` to leave it alone.
pub async fn callback_text(deps: &HandlerDeps, user_id: UserId, action: Action) -> Option<String> {
    if deps.gate.check(user_id) == Access::Denied {
        return Some(MSG_FORBIDDEN.to_string());
    }

    match action {
        Action::CheckSubCallback => {
            let channel = &deps.config.channel;
            if deps.subscriptions.is_subscribed(user_id).await {
                Some(messages::subscription_verified(channel))
            } else {
                Some(messages::not_subscribed(channel))
            }
        }
        Action::InfoCallback => Some(MSG_INFO_CALLBACK.to_string()),
        Action::StartCommand | Action::InfoCommand | Action::Unknown => None,
    }
}

/// Acknowledges the press first, whatever comes next, then edits the message.
pub async fn handle_callback(deps: &HandlerDeps, user_id: UserId, query: &CallbackQuery, action: Action) {
    if let Err(e) = deps.api.answer_callback(query).await {
        log::warn!("Failed to answer callback query from user {}: {}", user_id.0, e);
    }

    let Some(text) = callback_text(deps, user_id, action).await else {
        log::debug!("Ignoring callback {:?} from user {}", query.data, user_id.0);
        return;
    };

    let Some((chat_id, message_id)) = query.message.as_ref().map(|m| (m.chat().id, m.id())) else {
        log::debug!("Callback from user {} has no message to edit", user_id.0);
        return;
    };

    match deps.api.edit_text(chat_id, message_id, &text).await {
        Ok(()) => {}
        // Pressing the same button twice yields identical text
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            log::debug!("Message {} in chat {} already up to date", message_id.0, chat_id.0);
        }
        Err(e) => log::warn!("Failed to edit message {} in chat {}: {}", message_id.0, chat_id.0, e),
    }
}
