#![no_main]

use libfuzzer_sys::fuzz_target;
use web_time::Instant;
use wordboard_core::WordTable;
use wordboard_core::trace::{TraceRecord, read_trace, replay};

fuzz_target!(|data: &[u8]| {
    let Ok(records) = read_trace(data) else {
        return;
    };
    assert!(matches!(records.first(), Some(TraceRecord::Header { .. })));

    let mut table = WordTable::with_layout(["a", "b", "c"], ["d", "e"]).expect("layout");
    let before = table.snapshot().len();
    let steps = replay(&mut table, &records, Instant::now());

    assert!(steps.len() < records.len());
    assert!(table.snapshot().check_unique().is_ok());
    assert!(table.snapshot().len() >= before);
});
