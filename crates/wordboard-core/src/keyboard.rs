#![forbid(unsafe_code)]

//! Keyboard sensor: discrete-step navigation that produces the same gesture
//! events as a pointer.
//!
//! | Key      | Idle                     | Carrying                              |
//! |----------|--------------------------|---------------------------------------|
//! | `Pick`   | `Start` on focused word  | `End` over the cursor target          |
//! | `Left`   | -                        | `Over` previous word (x - 1)          |
//! | `Right`  | -                        | `Over` next word (x + 1)              |
//! | `Up`     | -                        | `Over` the board container (y - 1)    |
//! | `Down`   | -                        | `Over` the hand container (y + 1)     |
//! | `Cancel` | -                        | `Cancel`                              |
//!
//! Each step counts as one unit of pointer movement, so only a pick-and-drop
//! with no steps in between can classify as a tap.
//!
//! A container cursor is only meaningful during drag-over. Once the preview
//! has moved the word into that container, dropping targets the word's own
//! slot, which ends the gesture without further change.

use crate::container::{ContainerRef, DropTarget};
use crate::event::{GestureEvent, PointerDelta};
use crate::membership::locate;
use crate::store::Collections;
use crate::word::WordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Pick,
    Left,
    Right,
    Up,
    Down,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Carry {
    active: WordId,
    target: Option<DropTarget>,
    delta: PointerDelta,
}

/// Translates [`NavKey`]s into [`GestureEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct KeyboardDrag {
    carry: Option<Carry>,
}

impl KeyboardDrag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn carrying(&self) -> Option<WordId> {
        self.carry.map(|c| c.active)
    }

    /// Where a drop would currently land.
    #[must_use]
    pub fn cursor(&self) -> Option<DropTarget> {
        self.carry.and_then(|c| c.target)
    }

    /// Handle one key. `focused` is the word with keyboard focus; it is only
    /// consulted when picking up. Returns the event to dispatch, if any.
    pub fn handle(
        &mut self,
        key: NavKey,
        focused: Option<WordId>,
        snapshot: &Collections,
    ) -> Option<GestureEvent> {
        let Some(mut carry) = self.carry else {
            if key != NavKey::Pick {
                return None;
            }
            let active = focused?;
            self.carry = Some(Carry {
                active,
                target: None,
                delta: PointerDelta::ZERO,
            });
            return Some(GestureEvent::Start { active });
        };

        let active = carry.active;
        let event = match key {
            NavKey::Pick => {
                self.carry = None;
                return Some(GestureEvent::End {
                    active,
                    over: Some(drop_target(&carry, snapshot)),
                    delta: carry.delta,
                });
            }
            NavKey::Cancel => {
                self.carry = None;
                return Some(GestureEvent::Cancel { active });
            }
            NavKey::Left | NavKey::Right => {
                let step: isize = if key == NavKey::Left { -1 } else { 1 };
                let target = neighbour(&carry, snapshot, step)?;
                carry.target = Some(DropTarget::Item(target));
                carry.delta.x += step as f64;
                GestureEvent::Over {
                    active,
                    over: carry.target,
                }
            }
            NavKey::Up | NavKey::Down => {
                let (container, dy) = if key == NavKey::Up {
                    (ContainerRef::Board, -1.0)
                } else {
                    (ContainerRef::Hand, 1.0)
                };
                carry.target = Some(DropTarget::Container(container));
                carry.delta.y += dy;
                GestureEvent::Over {
                    active,
                    over: carry.target,
                }
            }
        };
        self.carry = Some(carry);
        Some(event)
    }
}

/// The word `step` places away from the cursor, within the active word's
/// current container. `None` at either end.
fn neighbour(carry: &Carry, snapshot: &Collections, step: isize) -> Option<WordId> {
    let container = locate(carry.active, snapshot).ok()?;
    let list = snapshot.get(container);
    let from = carry
        .target
        .and_then(DropTarget::item)
        .and_then(|id| snapshot.position(container, id))
        .or_else(|| snapshot.position(container, carry.active))?;
    let to = from.checked_add_signed(step)?;
    list.get(to).map(|w| w.id())
}

fn drop_target(carry: &Carry, snapshot: &Collections) -> DropTarget {
    match carry.target {
        Some(DropTarget::Container(c)) if snapshot.position(c, carry.active).is_some() => {
            DropTarget::Item(carry.active)
        }
        Some(target) => target,
        None => DropTarget::Item(carry.active),
    }
}
