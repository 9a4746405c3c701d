#![forbid(unsafe_code)]

//! Gesture trace recording and replay.
//!
//! A trace is a JSON Lines file. The first line is always a `header`; each
//! following line is one timestamped record. Timestamps are milliseconds
//! from the start of the session, so replays reproduce tap classification
//! exactly.
//!
//! ```json
//! {"record":"header","schema_version":"wordboard-trace-v1","session":"demo"}
//! {"record":"gesture","ts_ms":0,"event":{"type":"start","active":2}}
//! {"record":"gesture","ts_ms":40,"event":{"type":"over","active":2,"over":{"container":"hand"}}}
//! {"record":"gesture","ts_ms":90,"event":{"type":"end","active":2,"over":{"item":2},"delta":{"x":3.0,"y":60.0}}}
//! {"record":"shuffle","ts_ms":400}
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::{Duration, Instant};

use crate::error::ReorderError;
use crate::event::GestureEvent;
use crate::table::{Outcome, WordTable};
use crate::word::WordId;

/// Current schema version for trace files.
pub const SCHEMA_VERSION: &str = "wordboard-trace-v1";

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("trace does not start with a header record")]
    MissingHeader,

    #[error("unsupported trace schema {found:?} (expected {expected:?})", expected = SCHEMA_VERSION)]
    SchemaMismatch { found: String },
}

/// One line of a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum TraceRecord {
    Header {
        schema_version: String,
        session: String,
    },
    Gesture {
        ts_ms: u64,
        event: GestureEvent,
    },
    Shuffle {
        ts_ms: u64,
    },
    Deal {
        ts_ms: u64,
        words: Vec<String>,
    },
    DealFromDeck {
        ts_ms: u64,
        count: usize,
    },
}

impl TraceRecord {
    #[must_use]
    pub fn header(session: impl Into<String>) -> Self {
        Self::Header {
            schema_version: SCHEMA_VERSION.to_owned(),
            session: session.into(),
        }
    }

    #[must_use]
    pub fn ts_ms(&self) -> Option<u64> {
        match self {
            Self::Header { .. } => None,
            Self::Gesture { ts_ms, .. }
            | Self::Shuffle { ts_ms }
            | Self::Deal { ts_ms, .. }
            | Self::DealFromDeck { ts_ms, .. } => Some(*ts_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Appends records to a trace, header first.
pub struct TraceWriter<W: Write> {
    out: BufWriter<W>,
    records: u64,
    /// Lines written so far, header included.
    lines: usize,
}

impl TraceWriter<File> {
    pub fn create(path: impl AsRef<Path>, session: &str) -> Result<Self, TraceError> {
        Self::new(File::create(path)?, session)
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W, session: &str) -> Result<Self, TraceError> {
        let mut this = Self {
            out: BufWriter::new(writer),
            records: 0,
            lines: 0,
        };
        this.write_line(&TraceRecord::header(session))?;
        Ok(this)
    }

    pub fn record(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        self.write_line(record)?;
        self.records += 1;
        Ok(())
    }

    pub fn gesture(&mut self, ts_ms: u64, event: GestureEvent) -> Result<(), TraceError> {
        self.record(&TraceRecord::Gesture { ts_ms, event })
    }

    /// Records written after the header.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and return the inner writer.
    pub fn finish(self) -> Result<W, TraceError> {
        self.out
            .into_inner()
            .map_err(|e| TraceError::Io(e.into_error()))
    }

    fn write_line(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        serde_json::to_writer(&mut self.out, record).map_err(|source| TraceError::Json {
            line: self.lines + 1,
            source,
        })?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Parse a whole trace. Blank lines are skipped; the header must come first.
pub fn read_trace(reader: impl BufRead) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(&line).map_err(|source| {
            TraceError::Json {
                line: idx + 1,
                source,
            }
        })?;
        if records.is_empty() {
            match &record {
                TraceRecord::Header { schema_version, .. } if schema_version != SCHEMA_VERSION => {
                    return Err(TraceError::SchemaMismatch {
                        found: schema_version.clone(),
                    });
                }
                TraceRecord::Header { .. } => {}
                _ => return Err(TraceError::MissingHeader),
            }
        }
        records.push(record);
    }
    if records.is_empty() {
        return Err(TraceError::MissingHeader);
    }
    Ok(records)
}

pub fn read_trace_file(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    read_trace(BufReader::new(File::open(path)?))
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// What a replayed record did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEffect {
    Gesture(Outcome),
    Shuffled { revision: u64 },
    Dealt(Vec<WordId>),
}

/// Result of one replayed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    /// Index into the record list.
    pub index: usize,
    pub result: Result<ReplayEffect, ReorderError>,
}

/// Feed `records` to `table` in order. Record timestamps are offsets from
/// `origin`. A failed record is reported in its step and replay continues.
pub fn replay(table: &mut WordTable, records: &[TraceRecord], origin: Instant) -> Vec<ReplayStep> {
    let mut steps = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(ts_ms) = record.ts_ms() else {
            continue;
        };
        let now = origin + Duration::from_millis(ts_ms);
        let result = match record {
            TraceRecord::Header { .. } => continue,
            TraceRecord::Gesture { event, .. } => {
                table.dispatch(event, now).map(ReplayEffect::Gesture)
            }
            TraceRecord::Shuffle { .. } => table
                .shuffle_board()
                .map(|revision| ReplayEffect::Shuffled { revision }),
            TraceRecord::Deal { words, .. } => table
                .deal_more_to_hand(words.iter().cloned())
                .map(ReplayEffect::Dealt),
            TraceRecord::DealFromDeck { count, .. } => {
                table.deal_from_deck(*count).map(ReplayEffect::Dealt)
            }
        };
        if let Err(err) = &result {
            tracing::warn!(
                target: "wordboard.trace",
                index,
                ts_ms,
                error = %err,
                "replayed record failed"
            );
        }
        steps.push(ReplayStep { index, result });
    }
    tracing::debug!(
        target: "wordboard.trace",
        records = records.len(),
        steps = steps.len(),
        revision = table.revision(),
        "replay finished"
    );
    steps
}
