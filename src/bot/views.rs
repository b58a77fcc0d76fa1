//! Onboarding UI components
//!
//! Contains inline keyboards and message texts for the onboarding flow.
//! All bodies are rendered with `ParseMode::Html`; the operator notification
//! is plain text.

use crate::flow::action::{CALLBACK_BEGIN, CALLBACK_DONE, CALLBACK_NEXT, CALLBACK_RESTART};
use crate::flow::steps::{StepKeyboard, StepTable};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, LinkPreviewOptions};
use url::Url;

// ─────────────────────────────────────────────────────────────────────────────
// Texts
// ─────────────────────────────────────────────────────────────────────────────

/// Welcome message shown on /start, /restart and flow restart.
#[must_use]
pub fn welcome_text() -> &'static str {
    "👋 <b>Welcome to the Free Trading Community!</b>\n\n\
     Here you’ll learn how to:\n\
     • Join our free signals group 📊\n\
     • Follow chart markups and signals 📈\n\
     • Occasionally join live trading sessions 🎥\n\n\
     Ready to get started?"
}

/// Toast confirming a recorded partner selection.
#[must_use]
pub fn selection_saved_text(partner: &str) -> String {
    format!("✅ Saved: {partner} selected")
}

/// Completion message shown after the final step.
#[must_use]
pub fn completion_text(choice: &str) -> String {
    format!(
        "🎉 Awesome! You’ve completed all steps.\n\n\
         👉 Don’t forget to DM @AbelMelendez with your screenshot so you can be added!\n\n\
         📌 Broker you chose: <b>{}</b>",
        html_escape::encode_text(choice)
    )
}

/// Plain-text direct message sent to the operator on completion.
#[must_use]
pub fn operator_notification(handle: &str, choice: &str) -> String {
    format!("🆕 New signup!\nUser: {handle}\nBroker: {choice}\nCompleted onboarding ✅")
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyboards
// ─────────────────────────────────────────────────────────────────────────────

/// Create the welcome keyboard
///
/// # Examples
///
/// ```
/// use onboard_bot::bot::views::welcome_keyboard;
/// let keyboard = welcome_keyboard();
/// assert!(!keyboard.inline_keyboard.is_empty());
/// ```
#[must_use]
pub fn welcome_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🚀 Get Started",
        CALLBACK_BEGIN,
    )]])
}

/// Create the keyboard for the step at `index`.
///
/// Step 0 renders partner rows (select + external link) plus an advance
/// button; intermediate steps a single advance button; the final step a
/// single finish button.
#[must_use]
pub fn step_keyboard(table: &StepTable, index: usize) -> InlineKeyboardMarkup {
    match table.get(index).map(|def| def.keyboard) {
        Some(StepKeyboard::PartnerSelection) => partner_selection_keyboard(table),
        Some(StepKeyboard::Done) => InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("✅ Done", CALLBACK_DONE),
        ]]),
        _ => InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "➡️ Next",
            CALLBACK_NEXT,
        )]]),
    }
}

/// Create the completion keyboard
#[must_use]
pub fn completion_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🔄 Start Over",
        CALLBACK_RESTART,
    )]])
}

fn partner_selection_keyboard(table: &StepTable) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::with_capacity(table.partners().len() + 1);

    for partner in table.partners() {
        let mut row = vec![InlineKeyboardButton::callback(
            format!("✅ Select {}", partner.name),
            partner.callback_id,
        )];
        // The signup link opens externally and is not state-changing.
        if let Ok(url) = Url::parse(partner.signup_url) {
            row.push(InlineKeyboardButton::url("🌐 Open Link", url));
        }
        rows.push(row);
    }

    rows.push(vec![InlineKeyboardButton::callback(
        "➡️ Next",
        CALLBACK_NEXT,
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// Link previews are suppressed on step views so the partner URLs don't
/// expand under the message.
#[must_use]
pub fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}
