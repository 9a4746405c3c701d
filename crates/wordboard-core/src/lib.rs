#![forbid(unsafe_code)]

//! Core: word tokens, the board/hand collections, and the drag-reorder state
//! machine that moves words between them.
//!
//! # Role in Wordboard
//! `wordboard-core` owns all state. A gesture source (pointer or keyboard
//! sensor plus hit-testing) feeds it [`GestureEvent`]s; a renderer reads
//! [`TableView`]s back. Both collaborators live outside this crate.
//!
//! # Primary responsibilities
//! - **WordRegistry**: stable ids, issued from 1 upward.
//! - **CollectionStore**: the board/hand pair, replaced only as a whole.
//! - **Reorder planners**: live cross-container preview on drag-over,
//!   in-container move-and-shift on drag-end, toggle on tap.
//! - **DragSession / classify**: gesture lifecycle and tap detection.
//! - **shuffle**: Fisher–Yates over a copy.
//!
//! # How it fits together
//! [`WordTable`] wires the pieces: `start`/`over`/`end`/`cancel` events go
//! through [`WordTable::dispatch`], which plans the next pair and commits it
//! in one step. [`KeyboardDrag`] turns discrete key presses into the same
//! events, and [`trace`] records and replays event streams.

pub mod config;
pub mod container;
pub mod deck;
pub mod error;
pub mod event;
pub mod gesture;
pub mod keyboard;
pub mod membership;
pub mod reorder;
pub mod shuffle;
pub mod store;
pub mod table;
pub mod trace;
pub mod view;
pub mod word;

pub use config::TableConfig;
pub use container::{ContainerRef, DropTarget};
pub use error::{ReorderError, Result};
pub use event::{GestureEvent, PointerDelta};
pub use keyboard::{KeyboardDrag, NavKey};
pub use store::{CollectionStore, Collections};
pub use table::{Move, Outcome, WordTable};
pub use view::TableView;
pub use word::{Word, WordId, WordRegistry};
