//! Command and callback-query handlers for the onboarding flow.
//!
//! Handlers parse the inbound trigger, run the transition under the session
//! store's write lock, and render the resulting [`Reply`] back to Telegram.

use crate::bot::views;
use crate::config::Settings;
use crate::flow::action::Action;
use crate::flow::engine::{self, Reply};
use crate::flow::session::SessionStore;
use crate::flow::steps::StepTable;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, InlineKeyboardMarkup, ParseMode, User};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info};

/// Telegram rejects an edit that changes nothing; the clamp on the final
/// step legitimately re-renders the same view, so this error is expected.
const ERROR_NOT_MODIFIED: &str = "message is not modified";

/// Supported commands for the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start onboarding from the welcome view
    #[command(description = "Start onboarding.")]
    Start,
    /// Restart onboarding from the beginning
    #[command(description = "Restart onboarding from the beginning.")]
    Restart,
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

// Public handle shown to the operator: @username when set, otherwise the
// first name, otherwise a placeholder.
fn get_user_handle(user: &User) -> String {
    if let Some(ref username) = user.username {
        return format!("@{username}");
    }
    if !user.first_name.is_empty() {
        return user.first_name.clone();
    }
    "Unknown".to_string()
}

/// Handle /start and /restart: reset the session and send the welcome view.
///
/// # Errors
///
/// Returns an error if the welcome message fails to send.
pub async fn start(bot: Bot, msg: Message, store: Arc<SessionStore>) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    store.reset(user_id).await;

    bot.send_message(msg.chat.id, views::welcome_text())
        .parse_mode(ParseMode::Html)
        .reply_markup(views::welcome_keyboard())
        .await?;
    Ok(())
}

/// Handle a button press: parse the payload, apply the transition, render.
///
/// # Errors
///
/// Returns an error if a Telegram API call fails.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    store: Arc<SessionStore>,
    table: Arc<StepTable>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let action = Action::parse(data);
    if action == Action::Ignored {
        // Unrecognized payload: release the client spinner, emit nothing.
        debug!(payload = data, "Ignoring unrecognized callback payload");
        let _ = bot.answer_callback_query(q.id.clone()).await;
        return Ok(());
    }

    let user_id = q.from.id.0.cast_signed();
    let reply = store
        .update(user_id, |session| engine::apply(&table, session, &action))
        .await;

    render_reply(&bot, &q, &table, &settings, reply).await
}

async fn render_reply(
    bot: &Bot,
    q: &CallbackQuery,
    table: &StepTable,
    settings: &Settings,
    reply: Reply,
) -> Result<()> {
    match reply {
        Reply::Welcome => {
            let _ = bot.answer_callback_query(q.id.clone()).await;
            edit_view(bot, q, views::welcome_text(), views::welcome_keyboard(), false).await
        }
        Reply::Step(index) => {
            let _ = bot.answer_callback_query(q.id.clone()).await;
            let text = table.get(index).map_or("", |def| def.text);
            edit_view(bot, q, text, views::step_keyboard(table, index), true).await
        }
        Reply::SelectionSaved { partner } => {
            bot.answer_callback_query(q.id.clone())
                .text(views::selection_saved_text(partner))
                .await?;
            Ok(())
        }
        Reply::Rejected(reject) => {
            bot.answer_callback_query(q.id.clone())
                .text(reject.warning())
                .show_alert(true)
                .await?;
            Ok(())
        }
        Reply::Completed { choice } => {
            let _ = bot.answer_callback_query(q.id.clone()).await;
            // Best-effort: a failed notification never blocks the
            // completion view.
            notify_operator(bot, settings, &q.from, &choice).await;
            edit_view(
                bot,
                q,
                &views::completion_text(&choice),
                views::completion_keyboard(),
                false,
            )
            .await
        }
        Reply::Ignored => {
            let _ = bot.answer_callback_query(q.id.clone()).await;
            Ok(())
        }
    }
}

// Replace the originating message's content and buttons in place.
async fn edit_view(
    bot: &Bot,
    q: &CallbackQuery,
    text: &str,
    keyboard: InlineKeyboardMarkup,
    disable_preview: bool,
) -> Result<()> {
    let Some((chat_id, message_id)) = q.message.as_ref().map(|m| (m.chat().id, m.id())) else {
        debug!("Callback without an accessible message; nothing to edit");
        return Ok(());
    };

    let mut req = bot
        .edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard);
    if disable_preview {
        req = req.link_preview_options(views::disabled_link_preview());
    }

    match req.await {
        Ok(_) => Ok(()),
        // Clamped re-render of an unchanged view
        Err(e) if e.to_string().contains(ERROR_NOT_MODIFIED) => {
            debug!("Edit skipped: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn notify_operator(bot: &Bot, settings: &Settings, user: &User, choice: &str) {
    let handle = get_user_handle(user);
    let text = views::operator_notification(&handle, choice);

    match bot.send_message(ChatId(settings.admin_chat_id), text).await {
        Ok(_) => info!(user = %handle, choice, "Operator notified of completed onboarding"),
        // No retry; the user-facing completion view renders regardless.
        Err(e) => error!("Failed to notify operator: {e}"),
    }
}
