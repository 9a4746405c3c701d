//! End-to-end gesture scenarios through `WordTable::dispatch`.

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use web_time::{Duration, Instant};
use wordboard_core::{
    ContainerRef, DropTarget, GestureEvent, KeyboardDrag, NavKey, Outcome, PointerDelta,
    ReorderError, Word, WordId, WordTable,
};

const MS_50: Duration = Duration::from_millis(50);
const MS_199: Duration = Duration::from_millis(199);
const MS_200: Duration = Duration::from_millis(200);
const MS_400: Duration = Duration::from_millis(400);

fn id(n: u32) -> WordId {
    WordId::new(n).unwrap()
}

fn texts(words: &[Word]) -> Vec<&str> {
    words.iter().map(Word::text).collect()
}

fn start(active: u32) -> GestureEvent {
    GestureEvent::Start { active: id(active) }
}

fn over(active: u32, target: impl Into<DropTarget>) -> GestureEvent {
    GestureEvent::Over {
        active: id(active),
        over: Some(target.into()),
    }
}

fn end(active: u32, target: Option<DropTarget>, delta: PointerDelta) -> GestureEvent {
    GestureEvent::End {
        active: id(active),
        over: target,
        delta,
    }
}

const MOVED: PointerDelta = PointerDelta::new(12.0, -30.0);

// ── §8 properties ───────────────────────────────────────────────────────

#[test]
fn reorder_within_collection_shifts_neighbours() {
    let mut t = WordTable::with_layout(["a", "b", "c", "d"], ["z"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(3), t0).unwrap();
    t.dispatch(&over(3, id(2)), t0 + MS_50).unwrap();
    let out = t
        .dispatch(&end(3, Some(id(2).into()), MOVED), t0 + MS_400)
        .unwrap();

    let m = out.moved().copied().unwrap();
    assert_eq!((m.from.index, m.to.index), (2, 1));
    assert_eq!(texts(&t.snapshot().board), ["a", "c", "b", "d"]);
    assert_eq!(texts(&t.snapshot().hand), ["z"]);
}

#[test]
fn cross_collection_move_over_container() {
    let mut t = WordTable::with_layout(["test", "pls"], ["ignore"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(2), t0).unwrap();
    let out = t
        .dispatch(&over(2, ContainerRef::Hand), t0 + MS_50)
        .unwrap();
    assert!(matches!(out, Outcome::Previewed(_)));
    assert_eq!(texts(&t.snapshot().board), ["test"]);
    assert_eq!(texts(&t.snapshot().hand), ["ignore", "pls"]);
    assert_eq!(t.snapshot().hand[1].id(), id(2));
}

#[test]
fn cross_collection_move_over_item_then_reorder() {
    let mut t = WordTable::with_layout(["a", "b", "c"], ["x", "y"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(5), t0).unwrap();
    t.dispatch(&over(5, id(2)), t0 + MS_50).unwrap();
    assert_eq!(texts(&t.snapshot().board), ["a", "y", "b", "c"]);
    assert_eq!(texts(&t.snapshot().hand), ["x"]);

    // Same-container motion is deferred to drag-end.
    let out = t.dispatch(&over(5, id(3)), t0 + MS_50 * 2).unwrap();
    assert_eq!(out, Outcome::Unchanged);

    t.dispatch(&end(5, Some(id(3).into()), MOVED), t0 + MS_400)
        .unwrap();
    assert_eq!(texts(&t.snapshot().board), ["a", "b", "c", "y"]);
}

#[test]
fn drag_over_is_idempotent() {
    let mut once = WordTable::with_layout(["test", "pls"], ["ignore"]).unwrap();
    let mut twice = WordTable::with_layout(["test", "pls"], ["ignore"]).unwrap();
    let t0 = Instant::now();
    for t in [&mut once, &mut twice] {
        t.dispatch(&start(1), t0).unwrap();
    }

    once.dispatch(&over(1, id(3)), t0 + MS_50).unwrap();
    twice.dispatch(&over(1, id(3)), t0 + MS_50).unwrap();
    let second = twice.dispatch(&over(1, id(3)), t0 + MS_50).unwrap();

    assert_eq!(second, Outcome::Unchanged);
    assert_eq!(once.snapshot(), twice.snapshot());
}

#[test]
fn tap_moves_hand_word_to_end_of_board_and_back() {
    let mut t = WordTable::with_layout(["test", "pls"], ["ignore", "more"]).unwrap();
    let t0 = Instant::now();

    t.dispatch(&start(3), t0).unwrap();
    let out = t
        .dispatch(&end(3, Some(id(4).into()), PointerDelta::ZERO), t0 + MS_199)
        .unwrap();
    assert!(matches!(out, Outcome::Tapped(_)));
    assert_eq!(texts(&t.snapshot().board), ["test", "pls", "ignore"]);
    assert_eq!(texts(&t.snapshot().hand), ["more"]);

    let t1 = t0 + MS_400;
    t.dispatch(&start(1), t1).unwrap();
    t.dispatch(&end(1, None, PointerDelta::ZERO), t1 + MS_50)
        .unwrap();
    assert_eq!(texts(&t.snapshot().board), ["pls", "ignore"]);
    assert_eq!(texts(&t.snapshot().hand), ["more", "test"]);
}

#[test]
fn still_release_at_threshold_is_not_a_tap() {
    let mut t = WordTable::with_layout(["a", "b"], ["c"]).unwrap();
    let t0 = Instant::now();
    let before = t.snapshot().clone();

    t.dispatch(&start(3), t0).unwrap();
    let out = t
        .dispatch(&end(3, Some(id(3).into()), PointerDelta::ZERO), t0 + MS_200)
        .unwrap();
    assert!(matches!(out, Outcome::Aborted(_)));
    assert_eq!(t.snapshot(), &before);
}

#[test]
fn release_over_nothing_changes_nothing() {
    let mut t = WordTable::with_layout(["a", "b", "c"], ["d"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(2), t0).unwrap();
    let before = t.snapshot().clone();
    let revision = t.revision();

    let out = t.dispatch(&end(2, None, MOVED), t0 + MS_400).unwrap();
    assert!(matches!(out, Outcome::Aborted(_)));
    assert_eq!(t.snapshot(), &before);
    assert_eq!(t.revision(), revision);
    assert_eq!(t.active_id(), None);
}

#[test]
fn release_over_container_is_a_protocol_violation() {
    let mut t = WordTable::with_layout(["a", "b"], ["c"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(1), t0).unwrap();
    let before = t.snapshot().clone();

    let err = t
        .dispatch(&end(1, Some(ContainerRef::Hand.into()), MOVED), t0 + MS_400)
        .unwrap_err();
    assert_eq!(
        err,
        ReorderError::ContainerAtDragEnd {
            active: id(1),
            container: ContainerRef::Hand
        }
    );
    assert_eq!(t.snapshot(), &before);
    assert_eq!(t.active_id(), None, "session closes even on failure");
}

#[test]
fn interrupted_gesture_keeps_preview() {
    let mut t = WordTable::with_layout(["a"], ["b", "c"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(3), t0).unwrap();
    t.dispatch(&over(3, ContainerRef::Board), t0 + MS_50).unwrap();
    t.dispatch(&GestureEvent::Cancel { active: id(3) }, t0 + MS_400)
        .unwrap();
    assert_eq!(texts(&t.snapshot().board), ["a", "c"]);
    assert_eq!(t.active_id(), None);
}

#[test]
fn deal_during_drag_keeps_ids_unique() {
    let mut t = WordTable::with_layout(["a"], ["b"]).unwrap();
    let t0 = Instant::now();
    t.dispatch(&start(2), t0).unwrap();
    t.dispatch(&over(2, ContainerRef::Board), t0 + MS_50).unwrap();
    let dealt = t.deal_more_to_hand(["c", "d"]).unwrap();
    assert_eq!(dealt, [id(3), id(4)]);
    t.dispatch(&end(2, Some(id(1).into()), MOVED), t0 + MS_400)
        .unwrap();
    assert_eq!(texts(&t.snapshot().board), ["b", "a"]);
    assert_eq!(texts(&t.snapshot().hand), ["c", "d"]);
    t.snapshot().check_unique().unwrap();
}

// ── Keyboard sensor ─────────────────────────────────────────────────────

fn press(kb: &mut KeyboardDrag, t: &mut WordTable, key: NavKey, focused: u32, now: Instant) {
    if let Some(event) = kb.handle(key, WordId::new(focused), t.snapshot()) {
        t.dispatch(&event, now).unwrap();
    }
}

#[test]
fn keyboard_moves_word_from_hand_into_board_position() {
    let mut t = WordTable::with_layout(["a", "b", "c"], ["x"]).unwrap();
    let mut kb = KeyboardDrag::new();
    let t0 = Instant::now();

    press(&mut kb, &mut t, NavKey::Pick, 4, t0);
    press(&mut kb, &mut t, NavKey::Up, 0, t0 + MS_400);
    assert_eq!(texts(&t.snapshot().board), ["a", "b", "c", "x"]);
    press(&mut kb, &mut t, NavKey::Left, 0, t0 + MS_400 * 2);
    press(&mut kb, &mut t, NavKey::Left, 0, t0 + MS_400 * 3);
    press(&mut kb, &mut t, NavKey::Pick, 0, t0 + MS_400 * 4);

    assert_eq!(texts(&t.snapshot().board), ["a", "x", "b", "c"]);
    assert!(t.snapshot().hand.is_empty());
    assert_eq!(t.active_id(), None);
}

#[test]
fn keyboard_vertical_move_then_drop_lands_at_end() {
    let mut t = WordTable::with_layout(["a", "b"], ["x", "y"]).unwrap();
    let mut kb = KeyboardDrag::new();
    let t0 = Instant::now();

    press(&mut kb, &mut t, NavKey::Pick, 1, t0);
    press(&mut kb, &mut t, NavKey::Down, 0, t0 + MS_400);
    press(&mut kb, &mut t, NavKey::Pick, 0, t0 + MS_400 * 2);

    assert_eq!(texts(&t.snapshot().board), ["b"]);
    assert_eq!(texts(&t.snapshot().hand), ["x", "y", "a"]);
}

#[test]
fn keyboard_quick_pick_and_drop_is_a_tap() {
    let mut t = WordTable::with_layout(["a"], ["x"]).unwrap();
    let mut kb = KeyboardDrag::new();
    let t0 = Instant::now();

    press(&mut kb, &mut t, NavKey::Pick, 2, t0);
    press(&mut kb, &mut t, NavKey::Pick, 0, t0 + MS_50);
    assert_eq!(texts(&t.snapshot().board), ["a", "x"]);
}

// ── Diagnostics ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Captured {
    level: tracing::Level,
    target: String,
}

struct Capture(Arc<Mutex<Vec<Captured>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
        });
    }
}

fn with_captured_tracing(f: impl FnOnce()) -> Vec<Captured> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture(events.clone()));
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

#[test]
fn protocol_violation_is_logged_as_warning() {
    let events = with_captured_tracing(|| {
        let mut t = WordTable::with_layout(["a", "b"], ["c"]).unwrap();
        let t0 = Instant::now();
        t.dispatch(&start(1), t0).unwrap();
        let _ = t.dispatch(&end(1, Some(id(3).into()), MOVED), t0 + MS_400);
    });
    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::WARN && e.target == "wordboard.gesture"),
        "expected a gesture warning, got {events:?}"
    );
}

#[test]
fn second_start_is_logged_and_ignored() {
    let events = with_captured_tracing(|| {
        let mut t = WordTable::with_layout(["a", "b"], ["c"]).unwrap();
        let t0 = Instant::now();
        t.dispatch(&start(1), t0).unwrap();
        let out = t.dispatch(&start(2), t0 + MS_50).unwrap();
        assert_eq!(out, Outcome::IgnoredStart { in_flight: id(1) });
    });
    assert!(events.iter().any(|e| e.level == tracing::Level::WARN));
}
