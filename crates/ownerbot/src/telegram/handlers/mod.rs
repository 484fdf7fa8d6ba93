//! Update dispatch
//!
//! One hop per update: decode, gate, optionally check subscription, reply.

pub mod callbacks;
pub mod commands;
pub mod types;

use teloxide::types::Update;

pub use callbacks::{callback_text, handle_callback};
pub use commands::{info_reply, start_reply, Reply};
pub use types::HandlerDeps;

use crate::telegram::update::{Action, Incoming, Origin};

/// Routes one decoded update to its handler.
///
/// Unknown commands and plain messages get no reply at all.
pub async fn dispatch(deps: &HandlerDeps, incoming: Incoming) {
    let Incoming {
        user_id,
        action,
        origin,
    } = incoming;

    match origin {
        Origin::Chat(chat_id) => {
            let reply = match action {
                Action::StartCommand => {
                    log::info!("/start from user {}", user_id.0);
                    start_reply(deps, user_id).await
                }
                Action::InfoCommand => {
                    log::info!("/info from user {}", user_id.0);
                    info_reply(deps, user_id)
                }
                Action::CheckSubCallback | Action::InfoCallback | Action::Unknown => return,
            };
            commands::send_reply(deps, chat_id, reply).await;
        }
        Origin::Callback(query) => handle_callback(deps, user_id, &query, action).await,
    }
}

/// Decodes a raw update and dispatches it; ignored kinds are dropped.
pub async fn handle_update(deps: &HandlerDeps, update: Update) {
    let update_id = update.id;
    match Incoming::from_update(update, &deps.bot_username) {
        Some(incoming) => dispatch(deps, incoming).await,
        None => log::debug!("Ignoring update {:?}", update_id),
    }
}
