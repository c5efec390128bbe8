//! Gesture events and the sources that produce them.

use crate::team::TeamId;
use std::collections::VecDeque;

const POOL_TARGET: &str = "pool";
const SLOT_TARGET_PREFIX: &str = "slot-";

/// Drag lifecycle events emitted by a pointer or touch layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GestureEvent {
    DragStart {
        team_id: TeamId,
    },
    /// `drop_target` is the id of the element under the pointer on release,
    /// if any: `"pool"`, `"slot-{k}"`, or anything else.
    DragEnd {
        team_id: TeamId,
        drop_target: Option<String>,
    },
}

impl GestureEvent {
    pub fn drag_start(team_id: &str) -> Self {
        Self::DragStart {
            team_id: TeamId::new(team_id),
        }
    }

    pub fn drag_end(team_id: &str, drop_target: Option<&str>) -> Self {
        Self::DragEnd {
            team_id: TeamId::new(team_id),
            drop_target: drop_target.map(str::to_string),
        }
    }
}

/// Recognized drop zones.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DropTarget {
    Pool,
    /// 0-based slot index
    Slot(usize),
}

impl DropTarget {
    /// Parse a drop target id. Unrecognized ids yield `None`.
    ///
    /// The slot index is not range-checked here; an index past the last slot
    /// is rejected by the move itself.
    pub fn parse(target_id: &str) -> Option<Self> {
        if target_id == POOL_TARGET {
            return Some(Self::Pool);
        }
        let idx = target_id.strip_prefix(SLOT_TARGET_PREFIX)?;
        if idx.is_empty() || !idx.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        idx.parse().ok().map(Self::Slot)
    }

    /// Element id for this target, inverse of [`DropTarget::parse`]
    pub fn target_id(self) -> String {
        match self {
            Self::Pool => POOL_TARGET.to_string(),
            Self::Slot(idx) => format!("{SLOT_TARGET_PREFIX}{idx}"),
        }
    }
}

/// Origin of drag events.
///
/// Mouse and touch input are two implementations of the same source; the
/// controller does not distinguish them. The source is expected to
/// serialize drags so that at most one is in progress.
pub trait GestureSource {
    /// Next pending event, or `None` when drained
    fn next_gesture(&mut self) -> Option<GestureEvent>;
}

/// FIFO gesture source fed by an input layer.
#[derive(Debug, Default)]
pub struct QueuedGestures {
    queue: VecDeque<GestureEvent>,
}

impl QueuedGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GestureEvent) {
        self.queue.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl GestureSource for QueuedGestures {
    fn next_gesture(&mut self) -> Option<GestureEvent> {
        self.queue.pop_front()
    }
}

impl FromIterator<GestureEvent> for QueuedGestures {
    fn from_iter<I: IntoIterator<Item = GestureEvent>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}
