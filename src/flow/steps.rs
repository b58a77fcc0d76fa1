//! Ordered step definitions and the partner roster.
//!
//! The onboarding sequence is a read-only table: each entry carries its
//! display content, which keyboard layout the view renders, and whether
//! advancing past it requires a recorded partner selection. Gating is driven
//! by the table, not by hardcoded step indices.

/// One of the external partner brokers selectable during step 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partner {
    /// Callback payload carried by the selection button
    pub callback_id: &'static str,
    /// Short name used in acknowledgment toasts and buttons
    pub name: &'static str,
    /// Full label recorded as the user's choice
    pub label: &'static str,
    /// External signup link (not state-changing)
    pub signup_url: &'static str,
}

/// Keyboard layout attached to a step view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKeyboard {
    /// Partner selection rows plus an advance button (step 0)
    PartnerSelection,
    /// A single advance button
    Next,
    /// A single finish button (final step)
    Done,
}

/// A single onboarding step.
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    /// Display content (HTML)
    pub text: &'static str,
    /// Which keyboard the view renders under this step
    pub keyboard: StepKeyboard,
    /// Whether advancing past this step requires a recorded selection
    pub requires_choice: bool,
}

/// The configured partner brokers.
pub const PARTNERS: &[Partner] = &[
    Partner {
        callback_id: "broker_hanko",
        name: "Hankotrade",
        label: "Hankotrade - ACT Trader",
        signup_url: "https://login.hankotrade.com/register?refLink=NTc=&refRm=11",
    },
    Partner {
        callback_id: "broker_aaafx",
        name: "AAAFX",
        label: "AAAFX - MT4/5",
        signup_url: "https://app.aaafx.com/register?refLink=NTI0OA==&refRm=11",
    },
];

/// The standard four-step onboarding sequence.
pub const STANDARD_STEPS: &[StepDef] = &[
    StepDef {
        text: "✅ <b>Step 1: Choose Your Broker</b>\n\n\
               Pick one of the brokers below to sign up and create your account.",
        keyboard: StepKeyboard::PartnerSelection,
        requires_choice: true,
    },
    StepDef {
        text: "✅ <b>Step 2: Open a Live Account</b>\n\n\
               Once logged in, go to <b>Open Live Account</b> and set your leverage to <b>200X</b>.",
        keyboard: StepKeyboard::Next,
        requires_choice: false,
    },
    StepDef {
        text: "✅ <b>Step 3: Make Your Deposit</b>\n\n\
               1. Fund your account with a minimum of <b>$100</b> to get started.\n\
               2. Recommended: at least $1000 to see decent profit.",
        keyboard: StepKeyboard::Next,
        requires_choice: false,
    },
    StepDef {
        text: "✅ <b>Step 4: DM Me on Telegram</b>\n\n\
               Send me a message 👉 @AbelMelendez with a screenshot once you’re done.\n\n\
               I’ll add you into the <b>Free Trading Signals Group</b> 🚀",
        keyboard: StepKeyboard::Done,
        requires_choice: false,
    },
];

/// Ordered, immutable table of onboarding steps plus the partner roster.
#[derive(Debug, Clone, Copy)]
pub struct StepTable {
    steps: &'static [StepDef],
    partners: &'static [Partner],
}

impl Default for StepTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl StepTable {
    /// The standard table: four steps, two partners.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            steps: STANDARD_STEPS,
            partners: PARTNERS,
        }
    }

    /// Build a table from custom definitions (used by tests).
    #[must_use]
    pub const fn new(steps: &'static [StepDef], partners: &'static [Partner]) -> Self {
        Self { steps, partners }
    }

    /// Number of steps in the sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the table has no steps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step.
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Step definition at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StepDef> {
        self.steps.get(index)
    }

    /// The configured partners.
    #[must_use]
    pub const fn partners(&self) -> &'static [Partner] {
        self.partners
    }

    /// Resolve a partner-selection payload against the roster.
    #[must_use]
    pub fn partner(&self, callback_id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.callback_id == callback_id)
    }
}
