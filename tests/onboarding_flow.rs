//! End-to-end walk of the onboarding flow against the session store and the
//! transition engine, driven exactly the way the callback handler drives them.

use onboard_bot::bot::views;
use onboard_bot::flow::{apply, Action, Reject, Reply, SessionStore, Stage, StepTable};
use teloxide::types::InlineKeyboardButtonKind;

const USER: i64 = 1001;

async fn press(store: &SessionStore, table: &StepTable, payload: &str) -> Reply {
    let action = Action::parse(payload);
    store
        .update(USER, |session| apply(table, session, &action))
        .await
}

#[tokio::test]
async fn test_full_onboarding_scenario() {
    let store = SessionStore::new();
    let table = StepTable::standard();

    // 1. /start: session reset to the welcome view.
    store.reset(USER).await;
    let session = store.get(USER).await;
    assert_eq!(session.stage, Stage::Welcome);
    assert!(session.choice.is_none());
    assert_eq!(views::welcome_keyboard().inline_keyboard.len(), 1);

    // 2. Get Started: step 0 with partner selection + next.
    assert_eq!(press(&store, &table, "begin").await, Reply::Step(0));
    assert_eq!(views::step_keyboard(&table, 0).inline_keyboard.len(), 3);

    // 3. Select AAAFX: ephemeral ack, no step change.
    assert_eq!(
        press(&store, &table, "broker_aaafx").await,
        Reply::SelectionSaved { partner: "AAAFX" }
    );
    let session = store.get(USER).await;
    assert_eq!(session.stage, Stage::Step(0));
    assert_eq!(session.choice.as_deref(), Some("AAAFX - MT4/5"));

    // 4. Next three times: steps 1, 2, 3; the final view offers Done.
    for expected in 1..=3 {
        assert_eq!(press(&store, &table, "next").await, Reply::Step(expected));
    }
    let final_keyboard = views::step_keyboard(&table, 3);
    assert_eq!(
        final_keyboard.inline_keyboard[0][0].kind,
        InlineKeyboardButtonKind::CallbackData("done".to_string())
    );

    // 5. Done at the final step: completion carries the recorded choice.
    let reply = press(&store, &table, "done").await;
    assert_eq!(
        reply,
        Reply::Completed {
            choice: "AAAFX - MT4/5".to_string()
        }
    );
    let notification = views::operator_notification("@user", "AAAFX - MT4/5");
    assert!(notification.contains("Broker: AAAFX - MT4/5"));

    // 6. Start Over: back to the welcome view, choice cleared.
    assert_eq!(press(&store, &table, "restart").await, Reply::Welcome);
    let session = store.get(USER).await;
    assert_eq!(session.stage, Stage::Welcome);
    assert!(session.choice.is_none());
}

#[tokio::test]
async fn test_gating_rejects_then_allows_advance() {
    let store = SessionStore::new();
    let table = StepTable::standard();

    store.reset(USER).await;
    press(&store, &table, "begin").await;

    // Next before selecting a partner: rejected, step unchanged.
    assert_eq!(
        press(&store, &table, "next").await,
        Reply::Rejected(Reject::ChoiceRequired)
    );
    assert_eq!(store.get(USER).await.stage, Stage::Step(0));

    // Done straight from step 0: rejected as well.
    assert_eq!(
        press(&store, &table, "done").await,
        Reply::Rejected(Reject::StepsRemaining)
    );
    assert_eq!(store.get(USER).await.stage, Stage::Step(0));

    // After a selection the same press advances exactly once.
    press(&store, &table, "broker_hanko").await;
    assert_eq!(press(&store, &table, "next").await, Reply::Step(1));
    assert_eq!(store.get(USER).await.stage, Stage::Step(1));
}

#[tokio::test]
async fn test_reselection_overwrites_and_completion_reflects_it() {
    let store = SessionStore::new();
    let table = StepTable::standard();

    store.reset(USER).await;
    press(&store, &table, "begin").await;
    press(&store, &table, "broker_hanko").await;
    press(&store, &table, "broker_aaafx").await;

    for _ in 0..3 {
        press(&store, &table, "next").await;
    }

    // Extra Next on the final step clamps to a re-render.
    assert_eq!(press(&store, &table, "next").await, Reply::Step(3));
    assert_eq!(store.get(USER).await.stage, Stage::Step(3));

    assert_eq!(
        press(&store, &table, "done").await,
        Reply::Completed {
            choice: "AAAFX - MT4/5".to_string()
        }
    );
}

#[tokio::test]
async fn test_unrecognized_payloads_touch_nothing() {
    let store = SessionStore::new();
    let table = StepTable::standard();

    store.reset(USER).await;
    press(&store, &table, "begin").await;

    for payload in ["", "noop", "broker_bogus", "NEXT"] {
        let reply = press(&store, &table, payload).await;
        assert_eq!(reply, Reply::Ignored, "payload {payload:?}");
    }

    let session = store.get(USER).await;
    assert_eq!(session.stage, Stage::Step(0));
    assert!(session.choice.is_none());
}
