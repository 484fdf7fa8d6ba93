//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use teloxide::types::{
    BotCommand, CallbackQuery, ChatId, ChatMemberStatus, InlineKeyboardMarkup, MessageId, Recipient, Update, UserId,
};
use teloxide::{ApiError, RequestError};
use url::Url;

use ownerbot::telegram::api::TelegramApi;
use ownerbot::{Config, HandlerDeps};

pub const OWNER: u64 = 1000;
pub const STRANGER: u64 = 2000;
pub const TOKEN: &str = "123456:TEST-token";
pub const CHANNEL: &str = "@news";

/// One outbound Bot API call recorded by [`FakeTelegram`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SendText {
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    EditText {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
    },
    AnswerCallback,
    ChatMember {
        chat: Recipient,
        user_id: UserId,
    },
    SetWebhook {
        url: String,
        secret_token: Option<String>,
    },
    DeleteWebhook,
    GetMe,
    SetCommands(usize),
}

/// Recording stand-in for the Bot API
///
/// Membership lookups answer with the configured status; `None` makes them
/// fail with "chat not found".
pub struct FakeTelegram {
    calls: Mutex<Vec<Call>>,
    membership: Mutex<Option<ChatMemberStatus>>,
    edits_not_modified: AtomicBool,
    webhook_fails: AtomicBool,
}

impl FakeTelegram {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            membership: Mutex::new(Some(ChatMemberStatus::Member)),
            edits_not_modified: AtomicBool::new(false),
            webhook_fails: AtomicBool::new(false),
        })
    }

    pub fn with_membership(status: Option<ChatMemberStatus>) -> Arc<Self> {
        let fake = Self::new();
        fake.set_membership(status);
        fake
    }

    pub fn set_membership(&self, status: Option<ChatMemberStatus>) {
        *self.membership.lock().unwrap() = status;
    }

    /// Every edit after this fails with "message is not modified"
    pub fn fail_edits_as_not_modified(&self) {
        self.edits_not_modified.store(true, Ordering::SeqCst);
    }

    pub fn fail_webhook_registration(&self) {
        self.webhook_fails.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn membership_lookups(&self) -> usize {
        self.count(|c| matches!(c, Call::ChatMember { .. }))
    }

    pub fn answers(&self) -> usize {
        self.count(|c| matches!(c, Call::AnswerCallback))
    }

    pub fn sent_texts(&self) -> Vec<(String, Option<InlineKeyboardMarkup>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendText { text, keyboard, .. } => Some((text, keyboard)),
                _ => None,
            })
            .collect()
    }

    pub fn edited_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::EditText { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TelegramApi for FakeTelegram {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError> {
        self.record(Call::SendText {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn edit_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<(), RequestError> {
        self.record(Call::EditText {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        if self.edits_not_modified.load(Ordering::SeqCst) {
            return Err(RequestError::Api(ApiError::MessageNotModified));
        }
        Ok(())
    }

    async fn answer_callback(&self, _query: &CallbackQuery) -> Result<(), RequestError> {
        self.record(Call::AnswerCallback);
        Ok(())
    }

    async fn chat_member_status(&self, chat: Recipient, user_id: UserId) -> Result<ChatMemberStatus, RequestError> {
        self.record(Call::ChatMember { chat, user_id });
        match self.membership.lock().unwrap().clone() {
            Some(status) => Ok(status),
            None => Err(RequestError::Api(ApiError::ChatNotFound)),
        }
    }

    async fn set_webhook(&self, url: Url, secret_token: Option<String>) -> Result<(), RequestError> {
        self.record(Call::SetWebhook {
            url: url.to_string(),
            secret_token,
        });
        if self.webhook_fails.load(Ordering::SeqCst) {
            return Err(RequestError::Api(ApiError::Unknown("Bad Request: bad webhook".into())));
        }
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<(), RequestError> {
        self.record(Call::DeleteWebhook);
        Ok(())
    }

    async fn bot_username(&self) -> Result<Option<String>, RequestError> {
        self.record(Call::GetMe);
        Ok(Some("owner_test_bot".to_string()))
    }

    async fn set_commands(&self, commands: Vec<BotCommand>) -> Result<(), RequestError> {
        self.record(Call::SetCommands(commands.len()));
        Ok(())
    }
}

/// Configuration with [`OWNER`], [`TOKEN`] and [`CHANNEL`], plus `extra` variables
pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let owner = OWNER.to_string();
    let mut vars: Vec<(String, String)> = vec![
        ("TELEGRAM_TOKEN".into(), TOKEN.into()),
        ("OWNER_ID".into(), owner),
        ("CHANNEL_USERNAME".into(), CHANNEL.into()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
        .expect("test config must be valid")
}

pub fn deps_with(api: Arc<dyn TelegramApi>, config: Config) -> HandlerDeps {
    HandlerDeps::new(api, Arc::new(config), Some("owner_test_bot".to_string()))
}

pub fn test_deps(fake: &Arc<FakeTelegram>) -> HandlerDeps {
    deps_with(Arc::clone(fake) as Arc<dyn TelegramApi>, test_config(&[]))
}

/// Update JSON for a private text message
pub fn message_update_json(user_id: u64, text: &str) -> serde_json::Value {
    json!({
        "update_id": 100,
        "message": {
            "message_id": 1,
            "date": 1_735_992_000,
            "chat": {"id": user_id, "type": "private", "first_name": "Test"},
            "from": {"id": user_id, "is_bot": false, "first_name": "Test", "username": "tester"},
            "text": text
        }
    })
}

/// Update JSON for a button press on message 42
pub fn callback_update_json(user_id: u64, data: &str) -> serde_json::Value {
    json!({
        "update_id": 101,
        "callback_query": {
            "id": "4382bfdwdsb323b2d9",
            "from": {"id": user_id, "is_bot": false, "first_name": "Test"},
            "chat_instance": "-123456789",
            "data": data,
            "message": {
                "message_id": 42,
                "date": 1_735_992_000,
                "chat": {"id": user_id, "type": "private", "first_name": "Test"},
                "from": {"id": 987654321, "is_bot": true, "first_name": "TestBot"},
                "text": "menu"
            }
        }
    })
}

pub fn message_update(user_id: u64, text: &str) -> Update {
    serde_json::from_str(&message_update_json(user_id, text).to_string()).expect("valid message update")
}

pub fn callback_update(user_id: u64, data: &str) -> Update {
    serde_json::from_str(&callback_update_json(user_id, data).to_string()).expect("valid callback update")
}
