//! Arrowboard Core Library
//!
//! Platform-agnostic data structures and state for drawing annotation
//! arrows on a chessboard: squares and board geometry, arrows, the arrow
//! store that merges external and user-drawn arrows, style options, and the
//! pointer gesture wiring that drives the store.

pub mod arrow;
pub mod board;
pub mod geometry;
pub mod input;
pub mod options;
pub mod square;
pub mod store;

pub use arrow::{dedup_by_slot, merge_by_slot, Arrow, ArrowColor, Slot};
pub use board::BoardId;
pub use geometry::{BoardGeometry, VIEWBOX_WIDTH};
pub use input::{ArrowColorBindings, ArrowGestures, Modifiers, MouseButton, SquareEvent};
pub use options::ArrowOptions;
pub use square::{BoardDimensions, Orientation, Square, SquareParseError};
pub use store::{ArrowStore, ArrowsChangedCallback, DraftArrow, ToggleRule};
