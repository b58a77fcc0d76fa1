//! Callback payload parsing.
//!
//! Every inline button carries one of the payloads below. Parsing produces a
//! closed [`Action`] enum; anything unrecognized maps to [`Action::Ignored`]
//! instead of falling through silently.

// ─────────────────────────────────────────────────────────────────────────────
// Callback constants
// ─────────────────────────────────────────────────────────────────────────────

/// Callback data for leaving the welcome view
pub const CALLBACK_BEGIN: &str = "begin";
/// Callback data for advancing to the next step
pub const CALLBACK_NEXT: &str = "next";
/// Callback data for finishing the final step
pub const CALLBACK_DONE: &str = "done";
/// Callback data for resetting the flow from the completion view
pub const CALLBACK_RESTART: &str = "restart";
/// Prefix shared by all partner-selection payloads
pub const PARTNER_CALLBACK_PREFIX: &str = "broker_";

/// A recognized button-press action.
///
/// `SelectPartner` carries the raw partner payload; the transition engine
/// resolves it against the step table, so a stale or unknown partner id
/// degrades to an ignore rather than a panic or a bogus selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the welcome view for step 0
    Begin,
    /// Advance one step
    Next,
    /// Finish the flow at the final step
    Done,
    /// Reset to the welcome view
    Restart,
    /// Record a partner selection (payload includes the prefix)
    SelectPartner(String),
    /// Unrecognized payload; no transition, no response
    Ignored,
}

impl Action {
    /// Parse a callback payload into an action.
    #[must_use]
    pub fn parse(data: &str) -> Self {
        match data {
            CALLBACK_BEGIN => Self::Begin,
            CALLBACK_NEXT => Self::Next,
            CALLBACK_DONE => Self::Done,
            CALLBACK_RESTART => Self::Restart,
            other if other.starts_with(PARTNER_CALLBACK_PREFIX) => {
                Self::SelectPartner(other.to_string())
            }
            _ => Self::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_payloads() {
        assert_eq!(Action::parse("begin"), Action::Begin);
        assert_eq!(Action::parse("next"), Action::Next);
        assert_eq!(Action::parse("done"), Action::Done);
        assert_eq!(Action::parse("restart"), Action::Restart);
    }

    #[test]
    fn test_partner_payloads_keep_raw_id() {
        assert_eq!(
            Action::parse("broker_hanko"),
            Action::SelectPartner("broker_hanko".to_string())
        );
        // Unknown partner ids still parse; the engine resolves them later.
        assert_eq!(
            Action::parse("broker_unknown"),
            Action::SelectPartner("broker_unknown".to_string())
        );
    }

    #[test]
    fn test_unrecognized_payloads_are_ignored() {
        assert_eq!(Action::parse(""), Action::Ignored);
        assert_eq!(Action::parse("BEGIN"), Action::Ignored);
        assert_eq!(Action::parse("next "), Action::Ignored);
        assert_eq!(Action::parse("cancel_task"), Action::Ignored);
    }
}
