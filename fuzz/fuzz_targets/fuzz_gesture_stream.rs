#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use web_time::{Duration, Instant};
use wordboard_core::{
    ContainerRef, DropTarget, GestureEvent, PointerDelta, WordId, WordTable,
};

#[derive(Debug, Arbitrary)]
enum Target {
    None,
    Board,
    Hand,
    Item(u8),
}

#[derive(Debug, Arbitrary)]
enum Op {
    Start(u8),
    Over(u8, Target),
    End(u8, Target, bool),
    Cancel(u8),
    Wait(u16),
    Shuffle,
    Deal(u8),
}

fn word(n: u8) -> WordId {
    // Ids 1..=16; the table starts with 6 words.
    WordId::new(u32::from(n % 16) + 1).expect("non-zero")
}

fn target(t: &Target) -> Option<DropTarget> {
    match t {
        Target::None => None,
        Target::Board => Some(DropTarget::Container(ContainerRef::Board)),
        Target::Hand => Some(DropTarget::Container(ContainerRef::Hand)),
        Target::Item(n) => Some(DropTarget::Item(word(*n))),
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut table = WordTable::with_layout(["a", "b", "c"], ["d", "e", "f"]).expect("layout");
    let mut now = Instant::now();

    for op in &ops {
        let before = table.snapshot().clone();
        let event = match op {
            Op::Start(n) => GestureEvent::Start { active: word(*n) },
            Op::Over(n, t) => GestureEvent::Over {
                active: word(*n),
                over: target(t),
            },
            Op::End(n, t, moved) => GestureEvent::End {
                active: word(*n),
                over: target(t),
                delta: if *moved {
                    PointerDelta::new(3.0, 3.0)
                } else {
                    PointerDelta::ZERO
                },
            },
            Op::Cancel(n) => GestureEvent::Cancel { active: word(*n) },
            Op::Wait(ms) => {
                now += Duration::from_millis(u64::from(*ms));
                continue;
            }
            Op::Shuffle => {
                table.shuffle_board().expect("shuffle keeps the set");
                continue;
            }
            Op::Deal(n) => {
                let texts: Vec<String> = (0..*n % 4).map(|i| format!("w{i}")).collect();
                table.deal_more_to_hand(texts).expect("deal");
                continue;
            }
        };

        let ends = matches!(event, GestureEvent::End { .. } | GestureEvent::Cancel { .. });
        if table.dispatch(&event, now).is_err() {
            assert_eq!(table.snapshot(), &before, "failed handler mutated state");
        }
        if ends {
            assert_eq!(table.active_id(), None, "session left open");
        }
        assert!(table.snapshot().check_unique().is_ok());
        assert!(table.snapshot().len() >= before.len());
    }
});
