#![forbid(unsafe_code)]

//! The table: one store, one drag session, and the handlers that connect
//! gesture events to reorder plans.
//!
//! Handlers run synchronously, one event at a time. Each computes a complete
//! next board/hand pair through [`crate::reorder`] and commits it through the
//! store, or returns an error with the store untouched. A gesture that never
//! ends leaves the last committed drag-over state in place.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_time::{Duration, Instant};

use crate::config::TableConfig;
use crate::container::DropTarget;
use crate::deck::Deck;
use crate::error::{ReorderError, Result};
use crate::event::{GestureEvent, PointerDelta};
use crate::gesture::{AbortReason, Classification, DragSession, GestureConfig, classify};
use crate::reorder::{self, Relocation, Slot};
use crate::shuffle::shuffle;
use crate::store::{CollectionStore, Collections};
use crate::view::TableView;
use crate::word::{Word, WordId, WordRegistry};

/// A committed single-word move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub word: WordId,
    pub from: Slot,
    pub to: Slot,
    pub revision: u64,
}

/// Result of handling one gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started,
    /// Start while another gesture is in flight.
    IgnoredStart { in_flight: WordId },
    /// Drag-over with nothing to change.
    Unchanged,
    /// Drag-over moved the word into another container.
    Previewed(Move),
    Tapped(Move),
    Reordered(Move),
    Aborted(AbortReason),
    /// `held` is how long the word was carried; `None` without a session.
    Cancelled { held: Option<Duration> },
}

impl Outcome {
    /// The committed move, if the store changed.
    #[must_use]
    pub fn moved(&self) -> Option<&Move> {
        match self {
            Self::Previewed(m) | Self::Tapped(m) | Self::Reordered(m) => Some(m),
            _ => None,
        }
    }
}

pub struct WordTable {
    gesture: GestureConfig,
    deal_size: usize,
    registry: WordRegistry,
    store: CollectionStore,
    session: DragSession,
    deck: Deck,
    rng: SmallRng,
}

impl std::fmt::Debug for WordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordTable")
            .field("board", &self.store.current().board.len())
            .field("hand", &self.store.current().hand.len())
            .field("active", &self.session.active_id())
            .field("deck", &self.deck.remaining())
            .field("revision", &self.store.revision())
            .finish()
    }
}

impl WordTable {
    /// Build a table from configuration, issuing ids board first.
    pub fn new(config: &TableConfig) -> Result<Self> {
        let mut registry = WordRegistry::new();
        let board = registry.issue_all(config.layout.board.iter().cloned());
        let hand = registry.issue_all(config.layout.hand.iter().cloned());
        let store = CollectionStore::new(Collections::new(board, hand))?;
        let rng = match config.shuffle_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Ok(Self {
            gesture: config.gesture.to_gesture_config(),
            deal_size: config.deck.deal_size,
            registry,
            store,
            session: DragSession::new(),
            deck: Deck::new(config.deck.words.iter().cloned()),
            rng,
        })
    }

    /// A table with the given words and default settings otherwise.
    pub fn with_layout<B, H, S>(board: B, hand: H) -> Result<Self>
    where
        B: IntoIterator<Item = S>,
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = TableConfig::default();
        config.layout.board = board.into_iter().map(Into::into).collect();
        config.layout.hand = hand.into_iter().map(Into::into).collect();
        Self::new(&config)
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &Collections {
        self.store.current()
    }

    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    #[inline]
    #[must_use]
    pub fn active_id(&self) -> Option<WordId> {
        self.session.active_id()
    }

    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.store.current().word(id)
    }

    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    #[must_use]
    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    #[must_use]
    pub fn view(&self) -> TableView {
        TableView::build(
            self.store.current(),
            self.session.active_id(),
            self.store.revision(),
        )
    }

    // -----------------------------------------------------------------------
    // Gesture handlers
    // -----------------------------------------------------------------------

    /// Route one gesture event to its handler.
    pub fn dispatch(&mut self, event: &GestureEvent, now: Instant) -> Result<Outcome> {
        match *event {
            GestureEvent::Start { active } => Ok(self.on_start(active, now)),
            GestureEvent::Over { active, over } => self.on_over(active, over),
            GestureEvent::End {
                active,
                over,
                delta,
            } => self.on_end(active, over, delta, now),
            GestureEvent::Cancel { active } => Ok(self.on_cancel(active, now)),
        }
    }

    pub fn on_start(&mut self, active: WordId, now: Instant) -> Outcome {
        if let Some(in_flight) = self.session.active_id() {
            tracing::warn!(
                target: "wordboard.gesture",
                active = %active,
                in_flight = %in_flight,
                "start ignored: a gesture is already active"
            );
            return Outcome::IgnoredStart { in_flight };
        }
        self.session.start(active, now);
        tracing::debug!(target: "wordboard.gesture", active = %active, "gesture started");
        Outcome::Started
    }

    pub fn on_over(&mut self, active: WordId, over: Option<DropTarget>) -> Result<Outcome> {
        let plan = reorder::plan_drag_over(self.store.current(), active, over)
            .inspect_err(|err| report("over", active, err))?;
        let Some(plan) = plan else {
            tracing::trace!(
                target: "wordboard.reorder",
                active = %active,
                over = ?over,
                "drag-over left collections unchanged"
            );
            return Ok(Outcome::Unchanged);
        };
        self.apply(plan, "preview").map(Outcome::Previewed)
    }

    pub fn on_end(
        &mut self,
        active: WordId,
        over: Option<DropTarget>,
        delta: PointerDelta,
        now: Instant,
    ) -> Result<Outcome> {
        let elapsed = match self.session.finish(now) {
            Some(ended) if ended.active == active => Some(ended.elapsed),
            Some(ended) => {
                tracing::warn!(
                    target: "wordboard.gesture",
                    active = %active,
                    session = %ended.active,
                    "end does not match the active session"
                );
                None
            }
            None => {
                tracing::warn!(
                    target: "wordboard.gesture",
                    active = %active,
                    "end received with no active session"
                );
                None
            }
        };

        let class = classify(&self.gesture, active, over, delta, elapsed)
            .inspect_err(|err| report("end", active, err))?;
        match class {
            Classification::Tap => {
                let plan = reorder::plan_toggle(self.store.current(), active)
                    .inspect_err(|err| report("tap", active, err))?;
                self.apply(plan, "tap").map(Outcome::Tapped)
            }
            Classification::Abort(reason) => {
                tracing::debug!(
                    target: "wordboard.gesture",
                    active = %active,
                    reason = ?reason,
                    "gesture aborted"
                );
                Ok(Outcome::Aborted(reason))
            }
            Classification::Reorder { over } => {
                let plan = reorder::plan_drag_end(self.store.current(), active, over)
                    .inspect_err(|err| report("end", active, err))?;
                match plan {
                    Some(plan) => self.apply(plan, "reorder").map(Outcome::Reordered),
                    None => Ok(Outcome::Unchanged),
                }
            }
        }
    }

    /// End the gesture without dropping. The last drag-over state stays.
    pub fn on_cancel(&mut self, active: WordId, now: Instant) -> Outcome {
        let held = self.session.finish(now).map(|ended| ended.elapsed);
        tracing::debug!(
            target: "wordboard.gesture",
            active = %active,
            held_ms = held.map(|d| d.as_millis() as u64),
            "gesture cancelled"
        );
        Outcome::Cancelled { held }
    }

    // -----------------------------------------------------------------------
    // Direct actions
    // -----------------------------------------------------------------------

    /// Put the board in a uniformly random order. Returns the new revision.
    pub fn shuffle_board(&mut self) -> Result<u64> {
        let current = self.store.current();
        let next = Collections::new(shuffle(&current.board, &mut self.rng), current.hand.clone());
        let revision = self.store.commit(next)?;
        tracing::debug!(target: "wordboard.store", revision, "board shuffled");
        Ok(revision)
    }

    /// Append fresh words to the end of the hand. Returns their ids.
    pub fn deal_more_to_hand<I, S>(&mut self, texts: I) -> Result<Vec<WordId>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = self.registry.issue_all(texts);
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<WordId> = words.iter().map(Word::id).collect();
        let current = self.store.current();
        let mut next = Collections::new(current.board.clone(), current.hand.clone());
        next.hand.extend(words);
        let revision = self.store.commit(next)?;
        tracing::debug!(
            target: "wordboard.store",
            revision,
            dealt = ids.len(),
            "words dealt to hand"
        );
        Ok(ids)
    }

    /// Draw up to `n` words from the deck into the hand.
    pub fn deal_from_deck(&mut self, n: usize) -> Result<Vec<WordId>> {
        let texts = self.deck.draw(n);
        self.deal_more_to_hand(texts)
    }

    /// Draw the configured deal size from the deck.
    pub fn deal(&mut self) -> Result<Vec<WordId>> {
        self.deal_from_deck(self.deal_size)
    }

    fn apply(&mut self, plan: Relocation, action: &'static str) -> Result<Move> {
        let Relocation {
            word,
            from,
            to,
            next,
        } = plan;
        let revision = self.store.commit(next)?;
        tracing::debug!(
            target: "wordboard.reorder",
            action,
            word = %word,
            from = %from.container,
            from_index = from.index,
            to = %to.container,
            to_index = to.index,
            revision,
            "word moved"
        );
        Ok(Move {
            word,
            from,
            to,
            revision,
        })
    }
}

fn report(phase: &'static str, active: WordId, err: &ReorderError) {
    if err.is_invariant_breach() {
        tracing::error!(
            target: "wordboard.reorder",
            phase,
            active = %active,
            error = %err,
            "reorder invariant breached; collections left unchanged"
        );
    } else {
        tracing::warn!(
            target: "wordboard.gesture",
            phase,
            active = %active,
            error = %err,
            "gesture aborted on protocol violation"
        );
    }
}
