//! Outbound Bot API calls used by the bot
//!
//! Handlers talk to Telegram only through [`TelegramApi`]. The production
//! implementation is `teloxide::Bot`; tests plug in a recording fake.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ChatMemberStatus, InlineKeyboardMarkup, MessageId, Recipient};
use url::Url;

#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Sends a text message, optionally with an inline keyboard attached.
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> ResponseResult<()>;

    /// Replaces the text of an existing message. Any keyboard on it is removed.
    async fn edit_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> ResponseResult<()>;

    /// Acknowledges a button press so the client stops showing its spinner.
    async fn answer_callback(&self, query: &CallbackQuery) -> ResponseResult<()>;

    /// Looks up `user_id`'s membership status in `chat`.
    async fn chat_member_status(&self, chat: Recipient, user_id: UserId) -> ResponseResult<ChatMemberStatus>;

    async fn set_webhook(&self, url: Url, secret_token: Option<String>) -> ResponseResult<()>;

    async fn delete_webhook(&self) -> ResponseResult<()>;

    /// The bot's own username, used to accept `/start@botname`.
    async fn bot_username(&self) -> ResponseResult<Option<String>>;

    async fn set_commands(&self, commands: Vec<BotCommand>) -> ResponseResult<()>;
}

#[async_trait]
impl TelegramApi for Bot {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> ResponseResult<()> {
        let mut request = self.send_message(chat_id, text);
        if let Some(markup) = keyboard {
            request = request.reply_markup(markup);
        }
        request.await?;
        Ok(())
    }

    async fn edit_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> ResponseResult<()> {
        self.edit_message_text(chat_id, message_id, text).await?;
        Ok(())
    }

    async fn answer_callback(&self, query: &CallbackQuery) -> ResponseResult<()> {
        self.answer_callback_query(query.id.clone()).await?;
        Ok(())
    }

    async fn chat_member_status(&self, chat: Recipient, user_id: UserId) -> ResponseResult<ChatMemberStatus> {
        let member = self.get_chat_member(chat, user_id).await?;
        Ok(member.status())
    }

    async fn set_webhook(&self, url: Url, secret_token: Option<String>) -> ResponseResult<()> {
        let mut request = Requester::set_webhook(self, url);
        if let Some(secret) = secret_token {
            request = request.secret_token(secret);
        }
        request.await?;
        Ok(())
    }

    async fn delete_webhook(&self) -> ResponseResult<()> {
        Requester::delete_webhook(self).await?;
        Ok(())
    }

    async fn bot_username(&self) -> ResponseResult<Option<String>> {
        let me = self.get_me().await?;
        Ok(me.user.username.clone())
    }

    async fn set_commands(&self, commands: Vec<BotCommand>) -> ResponseResult<()> {
        self.set_my_commands(commands).await?;
        Ok(())
    }
}
