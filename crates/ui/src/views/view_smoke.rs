use lesson_core::LessonConfig;
use lesson_core::model::{LessonEvent, ListenTicket, TimerToken};

use super::test_harness::{
    ViewHarness, setup_view_harness, setup_view_harness_unreachable,
    setup_view_harness_without_speech,
};
use crate::vm::LessonIntent;

async fn ready_harness() -> ViewHarness {
    let mut harness = setup_view_harness(LessonConfig::default());
    harness.rebuild();
    harness.settle().await;
    harness
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_offers_demo_entry() {
    let harness = ready_harness().await;
    let html = harness.render();
    assert!(html.contains("Enter demo mode"), "missing entry in {html}");
    assert!(html.contains("lesson-preview"), "missing preview in {html}");
    assert!(!html.contains("SAY IT"), "mic shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_shows_word_after_demo_entry() {
    let mut harness = ready_harness().await;
    harness.handles.dispatch().call(LessonIntent::EnterDemo);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("apple"), "missing word in {html}");
    assert!(html.contains("SAY IT"), "missing mic in {html}");
    assert!(html.contains("1 / 3"), "missing progress in {html}");
    assert!(!html.contains("Enter demo mode"), "entry still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_listening_offers_cancel() {
    let mut harness = ready_harness().await;
    let dispatch = harness.handles.dispatch();
    dispatch.call(LessonIntent::EnterDemo);
    dispatch.call(LessonIntent::StartListening);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("отмена"), "missing cancel in {html}");
    assert!(html.contains("box listening"), "missing listening class in {html}");

    dispatch.call(LessonIntent::StopListening);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("SAY IT"), "mic not restored in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_success_then_next_word() {
    let mut harness = ready_harness().await;
    let dispatch = harness.handles.dispatch();
    dispatch.call(LessonIntent::EnterDemo);
    dispatch.call(LessonIntent::StartListening);
    harness.settle().await;

    let events = harness.handles.events();
    events.send(LessonEvent::RecognitionResult {
        ticket: ListenTicket::new(1),
        transcript: "Яблоко".to_string(),
        is_final: true,
    });
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("box success"), "missing success class in {html}");
    assert!(html.contains("You said: Яблоко"), "missing transcript in {html}");
    assert!(!html.contains("SAY IT"), "mic shown during feedback in {html}");

    events.send(LessonEvent::TimerElapsed(TimerToken::new(1)));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("house"), "missing next word in {html}");
    assert!(html.contains("box idle"), "missing idle class in {html}");
    assert!(!html.contains("You said"), "transcript not cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_unsupported_speech_shows_notice() {
    let mut harness = setup_view_harness_without_speech();
    harness.rebuild();
    harness.settle().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(LessonIntent::EnterDemo);
    dispatch.call(LessonIntent::StartListening);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Speech recognition is not supported"),
        "missing notice in {html}"
    );
    assert!(html.contains("box idle"), "status changed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_unreachable_platform_offers_retry() {
    let mut harness = setup_view_harness_unreachable();
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Could not reach the camera and speech services"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Enter demo mode"), "lesson shown in {html}");
}
