//! Decoding of raw Telegram updates into the actions the bot understands
//!
//! Commands and callback payloads are matched against strings exactly once,
//! here. Everything downstream matches on [`Action`].

use teloxide::types::{CallbackQuery, ChatId, Update, UpdateKind, UserId};

use crate::telegram::bot::Command;
use crate::telegram::messages::{CALLBACK_CHECK_SUB, CALLBACK_INFO};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartCommand,
    InfoCommand,
    CheckSubCallback,
    InfoCallback,
    Unknown,
}

impl Action {
    pub fn from_command_text(text: Option<&str>, bot_username: &str) -> Self {
        match text.and_then(|t| Command::from_text(t, bot_username)) {
            Some(Command::Start) => Action::StartCommand,
            Some(Command::Info) => Action::InfoCommand,
            None => Action::Unknown,
        }
    }

    pub fn from_callback_data(data: Option<&str>) -> Self {
        match data {
            Some(CALLBACK_CHECK_SUB) => Action::CheckSubCallback,
            Some(CALLBACK_INFO) => Action::InfoCallback,
            _ => Action::Unknown,
        }
    }
}

/// Where the reply for an update goes
#[derive(Debug, Clone)]
pub enum Origin {
    /// A typed message: reply with a new message in this chat
    Chat(ChatId),
    /// A button press: acknowledge it and edit the message carrying the button
    Callback(Box<CallbackQuery>),
}

/// One decoded update
#[derive(Debug, Clone)]
pub struct Incoming {
    pub user_id: UserId,
    pub action: Action,
    pub origin: Origin,
}

impl Incoming {
    /// Returns `None` for update kinds the bot ignores (channel posts, edits,
    /// messages without a sender, ...).
    pub fn from_update(update: Update, bot_username: &str) -> Option<Self> {
        match update.kind {
            UpdateKind::Message(msg) => {
                let user_id = msg.from.as_ref()?.id;
                Some(Self {
                    user_id,
                    action: Action::from_command_text(msg.text(), bot_username),
                    origin: Origin::Chat(msg.chat.id),
                })
            }
            UpdateKind::CallbackQuery(query) => Some(Self {
                user_id: query.from.id,
                action: Action::from_callback_data(query.data.as_deref()),
                origin: Origin::Callback(Box::new(query)),
            }),
            _ => None,
        }
    }
}
