//! Record a session to disk, read it back, and replay it onto a fresh table.

use web_time::Instant;
use wordboard_core::trace::{
    ReplayEffect, TraceRecord, TraceWriter, read_trace_file, replay,
};
use wordboard_core::{
    ContainerRef, DropTarget, GestureEvent, Outcome, PointerDelta, TableConfig, Word, WordId,
    WordTable,
};

fn id(n: u32) -> WordId {
    WordId::new(n).unwrap()
}

fn texts(words: &[Word]) -> Vec<&str> {
    words.iter().map(Word::text).collect()
}

#[test]
fn recorded_session_replays_to_the_same_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");

    let mut writer = TraceWriter::create(&path, "round-trip").unwrap();
    writer
        .gesture(0, GestureEvent::Start { active: id(2) })
        .unwrap();
    writer
        .gesture(
            60,
            GestureEvent::Over {
                active: id(2),
                over: Some(DropTarget::Container(ContainerRef::Hand)),
            },
        )
        .unwrap();
    writer
        .gesture(
            90,
            GestureEvent::Over {
                active: id(2),
                over: Some(DropTarget::Item(id(3))),
            },
        )
        .unwrap();
    writer
        .gesture(
            350,
            GestureEvent::End {
                active: id(2),
                over: Some(DropTarget::Item(id(3))),
                delta: PointerDelta::new(4.0, 80.0),
            },
        )
        .unwrap();
    writer
        .record(&TraceRecord::Deal {
            ts_ms: 800,
            words: vec!["more".into()],
        })
        .unwrap();
    writer
        .record(&TraceRecord::DealFromDeck {
            ts_ms: 900,
            count: 5,
        })
        .unwrap();
    writer.finish().unwrap();

    let records = read_trace_file(&path).unwrap();
    assert_eq!(records.len(), 7);

    let mut config = TableConfig::default();
    config.layout.board = vec!["test".into(), "pls".into()];
    config.layout.hand = vec!["ignore".into()];
    config.deck.words = vec!["は".into(), "を".into()];
    let mut table = WordTable::new(&config).unwrap();

    let steps = replay(&mut table, &records, Instant::now());
    assert_eq!(steps.len(), 6);
    assert!(steps.iter().all(|s| s.result.is_ok()), "{steps:?}");
    assert!(matches!(
        steps[1].result,
        Ok(ReplayEffect::Gesture(Outcome::Previewed(_)))
    ));
    assert!(matches!(
        steps[3].result,
        Ok(ReplayEffect::Gesture(Outcome::Reordered(_)))
    ));
    assert_eq!(
        steps[5].result,
        Ok(ReplayEffect::Dealt(vec![id(5), id(6)]))
    );

    assert_eq!(texts(&table.snapshot().board), ["test"]);
    assert_eq!(
        texts(&table.snapshot().hand),
        ["pls", "ignore", "more", "は", "を"]
    );
    assert_eq!(table.deck_remaining(), 0);
}

#[test]
fn replay_of_the_same_trace_is_deterministic() {
    let mut config = TableConfig::default();
    config.shuffle_seed = Some(11);
    let records = vec![
        TraceRecord::header("seeded"),
        TraceRecord::Shuffle { ts_ms: 0 },
        TraceRecord::Shuffle { ts_ms: 10 },
    ];

    let mut a = WordTable::new(&config).unwrap();
    let mut b = WordTable::new(&config).unwrap();
    replay(&mut a, &records, Instant::now());
    replay(&mut b, &records, Instant::now());
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.revision(), 2);
}
