//! Per-user onboarding progress and the owned session store.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// Opaque user handle from the messaging platform.
pub type UserId = i64;

/// Where a user currently is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Welcome view, before the first step
    #[default]
    Welcome,
    /// Onboarding step `i`, `0 <= i < N`
    Step(usize),
}

impl Stage {
    /// Step index, if the user has left the welcome view.
    #[must_use]
    pub const fn step_index(self) -> Option<usize> {
        match self {
            Self::Welcome => None,
            Self::Step(i) => Some(i),
        }
    }
}

/// Per-user record of onboarding progress and the recorded partner choice.
///
/// Created (or reset) when the user starts the flow, mutated only by
/// button-press handling for the same user, never evicted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Current position in the flow
    pub stage: Stage,
    /// Full label of the selected partner, once one is recorded
    pub choice: Option<String>,
}

/// Owned store of all user sessions.
///
/// Constructed once at startup and handed to the dispatcher; transitions run
/// under the write lock via [`SessionStore::update`]. Unbounded by design —
/// entries live for the process lifetime.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Session>>,
}

impl SessionStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the session for `id`, or a fresh default if none exists.
    pub async fn get(&self, id: UserId) -> Session {
        let sessions = self.sessions.read().await;
        sessions.get(&id).cloned().unwrap_or_default()
    }

    /// Reset the session for `id` back to the welcome view, clearing the
    /// recorded choice.
    pub async fn reset(&self, id: UserId) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Session::default());
        info!(user_id = id, "Session reset");
    }

    /// Run a mutation on the session for `id` under the write lock.
    ///
    /// A missing session starts from the default (welcome) state, so a
    /// callback arriving before any /start still behaves sensibly.
    pub async fn update<F, T>(&self, id: UserId, action: F) -> T
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.write().await;
        action(sessions.entry(id).or_default())
    }

    /// Number of tracked sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        let sessions = self.sessions.read().await;
        sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_session_defaults_to_welcome() {
        let store = SessionStore::new();
        let session = store.get(1).await;
        assert_eq!(session.stage, Stage::Welcome);
        assert!(session.choice.is_none());
        // get() does not create an entry
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_creates_and_mutates() {
        let store = SessionStore::new();
        store
            .update(7, |s| {
                s.stage = Stage::Step(2);
                s.choice = Some("AAAFX - MT4/5".to_string());
            })
            .await;

        let session = store.get(7).await;
        assert_eq!(session.stage, Stage::Step(2));
        assert_eq!(session.choice.as_deref(), Some("AAAFX - MT4/5"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_reset_clears_progress_and_choice() {
        let store = SessionStore::new();
        store
            .update(7, |s| {
                s.stage = Stage::Step(3);
                s.choice = Some("Hankotrade - ACT Trader".to_string());
            })
            .await;

        store.reset(7).await;

        let session = store.get(7).await;
        assert_eq!(session, Session::default());
    }

    #[tokio::test]
    async fn test_sessions_are_independent_per_user() {
        let store = SessionStore::new();
        store.update(1, |s| s.stage = Stage::Step(1)).await;
        store.update(2, |s| s.stage = Stage::Step(3)).await;

        assert_eq!(store.get(1).await.stage, Stage::Step(1));
        assert_eq!(store.get(2).await.stage, Stage::Step(3));
    }
}
