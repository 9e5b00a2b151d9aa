mod common;

use common::{face_with, relaxed_face, Harness};
use gesto_models::{EngagementState, EngineEvent};

fn changed(state: EngagementState, observation: &str) -> EngineEvent {
    EngineEvent::EngagementChanged {
        state,
        observation: observation.to_string(),
    }
}

#[test]
fn test_missing_face_reports_distracted_once() {
    let mut harness = Harness::new();
    harness.set_face(Some(relaxed_face()));
    harness.tick_at(0);

    harness.set_face(None);
    harness.tick_at(2000);
    harness.tick_at(4000);

    assert_eq!(
        harness.engagement_changes(),
        vec![
            changed(EngagementState::Focused, "Focused on content"),
            changed(EngagementState::Distracted, "No face detected"),
        ]
    );
}

#[test]
fn test_confusion_reported_on_first_of_repeated_samples() {
    let mut harness = Harness::new();
    harness.set_face(Some(relaxed_face()));
    harness.tick_at(0);
    harness.sink.drain();

    harness.set_face(Some(face_with(&[
        ("browDownLeft", "browDownRight", 0.7),
        ("eyeLookOutLeft", "eyeLookOutRight", 0.1),
    ])));
    let sampled_changes: Vec<bool> = [2000, 4000, 6000]
        .into_iter()
        .map(|t| {
            harness
                .tick_at(t)
                .report()
                .is_some_and(|report| report.engagement_change.is_some())
        })
        .collect();

    assert_eq!(sampled_changes, vec![true, false, false]);
    assert_eq!(
        harness.engagement_changes(),
        vec![changed(
            EngagementState::Confused,
            "Facial expression indicates confusion"
        )]
    );
}

#[test]
fn test_repeated_state_emits_single_event() {
    let mut harness = Harness::new();
    harness.set_face(Some(face_with(&[("eyeBlinkLeft", "eyeBlinkRight", 0.9)])));
    harness.run(0, 20_000, 16);

    assert_eq!(
        harness.engagement_changes(),
        vec![changed(EngagementState::Bored, "Eyes closed / Drowsy")]
    );
    assert_eq!(harness.engine.snapshot().engagement, EngagementState::Bored);
}

#[test]
fn test_face_sampled_only_at_interval() {
    let mut harness = Harness::new();
    harness.set_face(Some(relaxed_face()));
    harness.run(0, 6000, 16);

    assert_eq!(
        *harness.face_calls.lock().unwrap(),
        vec![0, 2000, 4000, 6000]
    );
}

#[test]
fn test_engagement_samples_without_hand() {
    let mut harness = Harness::new();
    harness.set_hand(None);
    harness.set_face(None);

    let report = harness.tick_at(0).report().cloned().unwrap();
    assert!(!report.hand_present);
    assert!(report.engagement_sampled);
    assert_eq!(
        report.engagement_change.map(|entry| entry.state),
        Some(EngagementState::Distracted)
    );
}

#[test]
fn test_history_records_transitions() {
    let mut harness = Harness::new();
    let looking_away = face_with(&[("eyeLookOutLeft", "eyeLookOutRight", 0.8)]);

    for (t, face) in [
        (0, Some(relaxed_face())),
        (2000, Some(looking_away.clone())),
        (4000, Some(looking_away)),
        (6000, None),
        (8000, Some(relaxed_face())),
    ] {
        harness.set_face(face);
        harness.tick_at(t);
    }

    let history = harness.engine.engagement_history();
    let summary: Vec<(u64, EngagementState, &str)> = history
        .iter()
        .map(|entry| (entry.timestamp_ms, entry.state, entry.observation.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, EngagementState::Focused, "Focused on content"),
            (2000, EngagementState::Distracted, "Looking away from screen"),
            (8000, EngagementState::Focused, "Focused on content"),
        ]
    );
}
