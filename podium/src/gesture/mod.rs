//! Drag-and-drop front-end for the move operations.
//!
//! A [`GestureSource`] yields drag-start/drag-end events; the
//! [`GestureController`] tracks the single active drag and, on drop,
//! applies the matching move when the caller is allowed to edit.

pub mod controller;
pub mod source;

pub use controller::{DragState, GestureController, GestureOutcome};
pub use source::{DropTarget, GestureEvent, GestureSource, QueuedGestures};
