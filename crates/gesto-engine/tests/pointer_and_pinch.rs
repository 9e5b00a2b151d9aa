mod common;

use common::{fist_at, hand_at, pinch_hand, Harness};
use gesto_engine::EngineConfig;
use gesto_models::{EngineEvent, Point3};

#[test]
fn test_pinch_edges_within_debounce_click_once() {
    let mut harness = Harness::new();

    harness.set_hand(Some(pinch_hand(0.01)));
    harness.tick_at(0);
    harness.set_hand(Some(pinch_hand(0.2)));
    harness.tick_at(150);
    harness.set_hand(Some(pinch_hand(0.01)));
    harness.tick_at(300);

    let clicks = harness.clicks();
    assert_eq!(clicks.len(), 1);

    // The single click is the one at t=0, at the cursor of that tick
    let first_pointer = harness
        .events()
        .into_iter()
        .find(|event| matches!(event, EngineEvent::Pointer { .. }));
    match (first_pointer, &clicks[0]) {
        (Some(EngineEvent::Pointer { x, y, pinching }), EngineEvent::Click { x: cx, y: cy }) => {
            assert!(pinching);
            assert_eq!((x, y), (*cx, *cy));
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[test]
fn test_pinch_after_debounce_clicks_again() {
    let mut harness = Harness::new();
    for (t, distance) in [(0, 0.01), (200, 0.2), (600, 0.01), (700, 0.2), (800, 0.01)] {
        harness.set_hand(Some(pinch_hand(distance)));
        harness.tick_at(t);
    }
    // Clicks at 0 and 600; 800 is inside the window of 600
    assert_eq!(harness.clicks().len(), 2);
}

#[test]
fn test_sustained_pinch_clicks_once() {
    let mut harness = Harness::new();
    harness.set_hand(Some(pinch_hand(0.01)));
    harness.run(0, 3000, 16);
    assert_eq!(harness.clicks().len(), 1);
    assert!(harness.engine.snapshot().pinching);
}

#[test]
fn test_pointer_reported_every_tick_with_hand() {
    let mut harness = Harness::new();
    harness.set_hand(Some(pinch_hand(0.3)));
    harness.run(0, 160, 16);
    harness.set_hand(None);
    harness.run(176, 320, 16);

    let pointers: Vec<EngineEvent> = harness
        .events()
        .into_iter()
        .filter(|event| matches!(event, EngineEvent::Pointer { .. }))
        .collect();
    assert_eq!(pointers.len(), 11);
    assert!(!harness.engine.snapshot().hand_present);
}

#[test]
fn test_cursor_holds_position_without_hand() {
    let mut harness = Harness::new();
    harness.set_hand(Some(hand_at(
        Point3::planar(0.1, 0.9),
        Point3::planar(0.5, 0.5),
        None,
    )));
    harness.run(0, 100, 10);
    let before = harness.engine.cursor();

    harness.set_hand(None);
    harness.run(110, 500, 10);
    assert_eq!(harness.engine.cursor(), before);
}

#[test]
fn test_cursor_mirrors_and_smooths() {
    let mut harness = Harness::new();
    harness.set_hand(Some(hand_at(
        Point3::planar(0.1, 0.5),
        Point3::planar(0.5, 0.5),
        None,
    )));
    harness.tick_at(0);

    // Mirrored target 0.9, one step of 0.2 from the 0.5 center
    let cursor = harness.engine.cursor();
    assert!((cursor.x - 0.58).abs() < 1e-5);
    assert!((cursor.y - 0.5).abs() < 1e-5);

    let mut unmirrored = Harness::with_config(EngineConfig {
        mirror_x: false,
        ..Default::default()
    });
    unmirrored.set_hand(Some(hand_at(
        Point3::planar(0.1, 0.5),
        Point3::planar(0.5, 0.5),
        None,
    )));
    unmirrored.tick_at(0);
    assert!((unmirrored.engine.cursor().x - 0.42).abs() < 1e-5);
}

#[test]
fn test_fist_scroll_deltas() {
    let mut harness = Harness::new();
    for (t, y) in [(0, 0.50), (16, 0.52), (32, 0.55), (48, 0.55)] {
        harness.set_hand(Some(fist_at(y)));
        harness.tick_at(t);
    }
    harness.set_hand(None);
    harness.tick_at(64);
    harness.set_hand(Some(fist_at(0.9)));
    harness.tick_at(80);

    let deltas: Vec<f32> = harness
        .events()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::Scroll { delta_pixels } => Some(delta_pixels),
            _ => None,
        })
        .collect();

    assert_eq!(deltas.len(), 3);
    assert!((deltas[0] - 20.0).abs() < 1e-2);
    assert!((deltas[1] - 30.0).abs() < 1e-2);
    assert!(deltas[2].abs() < 1e-4);
}
