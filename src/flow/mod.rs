//! Transport-agnostic onboarding flow core.
//!
//! Holds the per-user session store, the ordered step table, and the pure
//! transition engine. Nothing in this module performs I/O; the Telegram
//! transport in [`crate::bot`] renders the engine's replies.

/// Callback payload parsing
pub mod action;
/// Transition engine
pub mod engine;
/// Per-user sessions and the session store
pub mod session;
/// Step definitions and the partner roster
pub mod steps;

pub use action::Action;
pub use engine::{apply, Reject, Reply};
pub use session::{Session, SessionStore, Stage, UserId};
pub use steps::{Partner, StepDef, StepKeyboard, StepTable};
