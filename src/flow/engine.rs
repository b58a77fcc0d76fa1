//! Transition engine for the onboarding flow.
//!
//! [`apply`] is a pure function from (step table, session, action) to a
//! [`Reply`]; it performs no I/O. The transport layer renders replies into
//! Telegram calls, so every transition and gating rule is testable without a
//! network.

use super::action::Action;
use super::session::{Session, Stage};
use super::steps::StepTable;

/// Recorded choice shown to the operator when the user finished without
/// selecting a partner.
pub const NO_SELECTION: &str = "No broker selected 🤔";

/// Why an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// `next` at a gated step before a partner was selected
    ChoiceRequired,
    /// `done` before reaching the final step
    StepsRemaining,
}

impl Reject {
    /// Warning text surfaced to the user as an alert toast.
    #[must_use]
    pub const fn warning(self) -> &'static str {
        match self {
            Self::ChoiceRequired => "⚠️ Please select a broker before continuing!",
            Self::StepsRemaining => "⚠️ Please finish all steps first!",
        }
    }
}

/// Outcome of applying an action to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Render the welcome view (restart)
    Welcome,
    /// Render the step at this index
    Step(usize),
    /// Acknowledge a recorded selection with a toast; no re-render
    SelectionSaved {
        /// Short partner name for the toast text
        partner: &'static str,
    },
    /// Surface a warning toast; nothing changed
    Rejected(Reject),
    /// Render the completion view and notify the operator
    Completed {
        /// Recorded partner label, or [`NO_SELECTION`]
        choice: String,
    },
    /// No transition matched; emit nothing
    Ignored,
}

/// Apply `action` to `session`, mutating it in place.
///
/// Invariants upheld: the stage only ever moves to `Welcome` (restart) or
/// forward by one step; it never leaves `[0, N)`; an advance past the final
/// step clamps to a re-render of that step.
pub fn apply(table: &StepTable, session: &mut Session, action: &Action) -> Reply {
    match action {
        Action::Begin => {
            // A stale welcome view can re-send this from any stage; it always
            // lands on step 0.
            session.stage = Stage::Step(0);
            Reply::Step(0)
        }
        Action::Next => advance(table, session),
        Action::Done => {
            if session.stage == Stage::Step(table.last_index()) && !table.is_empty() {
                Reply::Completed {
                    choice: session
                        .choice
                        .clone()
                        .unwrap_or_else(|| NO_SELECTION.to_string()),
                }
            } else {
                Reply::Rejected(Reject::StepsRemaining)
            }
        }
        Action::SelectPartner(callback_id) => select_partner(table, session, callback_id),
        Action::Restart => {
            *session = Session::default();
            Reply::Welcome
        }
        Action::Ignored => Reply::Ignored,
    }
}

fn advance(table: &StepTable, session: &mut Session) -> Reply {
    let Some(current) = session.stage.step_index() else {
        // `next` from a stale welcome view behaves like `begin`.
        session.stage = Stage::Step(0);
        return Reply::Step(0);
    };

    if let Some(def) = table.get(current) {
        if def.requires_choice && session.choice.is_none() {
            return Reply::Rejected(Reject::ChoiceRequired);
        }
    }

    let next = current + 1;
    if next < table.len() {
        session.stage = Stage::Step(next);
        Reply::Step(next)
    } else {
        // Already on the final step: clamp and re-render instead of faulting.
        Reply::Step(current)
    }
}

fn select_partner(table: &StepTable, session: &mut Session, callback_id: &str) -> Reply {
    // Selection buttons only render at step 0; a payload arriving at any
    // other stage is stale and must not record anything.
    if session.stage != Stage::Step(0) {
        return Reply::Ignored;
    }

    match table.partner(callback_id) {
        Some(partner) => {
            session.choice = Some(partner.label.to_string());
            Reply::SelectionSaved {
                partner: partner.name,
            }
        }
        None => Reply::Ignored,
    }
}
