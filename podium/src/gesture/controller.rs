//! Drag state tracking and translation of drops into moves.

use super::source::{DropTarget, GestureEvent, GestureSource};
use crate::{
    access::Access,
    arrangement::{AssignmentStore, MoveOutcome},
    team::TeamId,
};
use log::debug;

/// Drag state
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TeamId),
}

/// Result of feeding one gesture event to the controller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GestureOutcome {
    /// A drag began for this team
    Started(TeamId),
    /// Event did not fit the current drag state (second start, end without start)
    Ignored,
    /// Drop landed on a recognized target and was applied as a move
    Dropped(MoveOutcome),
    /// Drop landed on a recognized target but the caller cannot edit
    Suppressed,
    /// Drop landed outside every recognized target
    Cancelled,
}

/// Turns a serialized stream of drag events into move operations.
///
/// At most one drag is active. Starting a drag is always allowed so the
/// front-end can show feedback; whether a drop mutates anything is decided
/// at drop time from the [`Access`] passed in.
#[derive(Debug, Default)]
pub struct GestureController {
    state: DragState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Team currently being dragged
    pub fn active_team(&self) -> Option<&TeamId> {
        match &self.state {
            DragState::Dragging(team_id) => Some(team_id),
            DragState::Idle => None,
        }
    }

    pub fn drag_start(&mut self, team_id: TeamId) -> GestureOutcome {
        if let DragState::Dragging(active) = &self.state {
            debug!("ignoring drag of {team_id} while {active} is being dragged");
            return GestureOutcome::Ignored;
        }
        self.state = DragState::Dragging(team_id.clone());
        GestureOutcome::Started(team_id)
    }

    /// End the active drag. The controller returns to idle whatever the
    /// drop target was.
    pub fn drag_end(
        &mut self,
        drop_target: Option<&str>,
        store: &mut AssignmentStore,
        access: Access,
    ) -> GestureOutcome {
        let DragState::Dragging(team_id) = std::mem::take(&mut self.state) else {
            return GestureOutcome::Ignored;
        };

        let Some(target) = drop_target.and_then(DropTarget::parse) else {
            return GestureOutcome::Cancelled;
        };

        if !access.editable() {
            debug!("drop of {team_id} suppressed: read-only");
            return GestureOutcome::Suppressed;
        }

        let outcome = match target {
            DropTarget::Pool => store.remove_to_pool(team_id.as_str()),
            DropTarget::Slot(idx) => store.move_to_slot(team_id.as_str(), idx),
        };
        GestureOutcome::Dropped(outcome)
    }

    /// Dispatch a single event.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        store: &mut AssignmentStore,
        access: Access,
    ) -> GestureOutcome {
        match event {
            GestureEvent::DragStart { team_id } => self.drag_start(team_id),
            GestureEvent::DragEnd {
                team_id,
                drop_target,
            } => {
                if let Some(active) = self.active_team()
                    && *active != team_id
                {
                    debug!("drag end reported {team_id} but {active} is active");
                }
                self.drag_end(drop_target.as_deref(), store, access)
            }
        }
    }

    /// Drain every pending event from `source`.
    pub fn pump<S: GestureSource + ?Sized>(
        &mut self,
        source: &mut S,
        store: &mut AssignmentStore,
        access: Access,
    ) -> Vec<GestureOutcome> {
        std::iter::from_fn(|| source.next_gesture())
            .map(|event| self.handle(event, store, access))
            .collect()
    }

    /// Forget any active drag without applying it
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arrangement::{Location, NoOp},
        gesture::QueuedGestures,
        team::Team,
    };

    fn store() -> AssignmentStore {
        AssignmentStore::new(
            vec![Team::new("a", "A"), Team::new("b", "B"), Team::new("c", "C")],
            5,
        )
    }

    #[test]
    fn test_drag_to_slot_moves_team() {
        let mut s = store();
        let mut ctl = GestureController::new();

        assert_eq!(
            ctl.drag_start(TeamId::new("a")),
            GestureOutcome::Started(TeamId::new("a"))
        );
        assert_eq!(ctl.active_team(), Some(&TeamId::new("a")));

        let outcome = ctl.drag_end(Some("slot-2"), &mut s, Access::editor());
        assert!(matches!(
            outcome,
            GestureOutcome::Dropped(MoveOutcome::Placed { slot: 2, .. })
        ));
        assert_eq!(s.location_of("a"), Some(Location::Slot(2)));
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_on_pool_releases_slotted_team() {
        let mut s = store();
        s.move_to_slot("b", 0);
        let mut ctl = GestureController::new();

        ctl.drag_start(TeamId::new("b"));
        let outcome = ctl.drag_end(Some("pool"), &mut s, Access::editor());

        assert!(matches!(
            outcome,
            GestureOutcome::Dropped(MoveOutcome::Released { slot: 0, .. })
        ));
        assert_eq!(s.location_of("b"), Some(Location::Pool));
    }

    #[test]
    fn test_drop_pool_team_on_pool_is_noop() {
        let mut s = store();
        let mut ctl = GestureController::new();

        ctl.drag_start(TeamId::new("c"));
        let outcome = ctl.drag_end(Some("pool"), &mut s, Access::editor());

        assert_eq!(
            outcome,
            GestureOutcome::Dropped(MoveOutcome::Unchanged(NoOp::AlreadyInPool))
        );
        assert_eq!(s.pool_len(), 3);
    }

    #[test]
    fn test_unrecognized_target_cancels_and_returns_to_idle() {
        let mut s = store();
        let mut ctl = GestureController::new();

        ctl.drag_start(TeamId::new("a"));
        assert_eq!(
            ctl.drag_end(Some("sidebar"), &mut s, Access::editor()),
            GestureOutcome::Cancelled
        );
        assert_eq!(ctl.state(), &DragState::Idle);

        ctl.drag_start(TeamId::new("a"));
        assert_eq!(
            ctl.drag_end(None, &mut s, Access::editor()),
            GestureOutcome::Cancelled
        );
        assert_eq!(s.pool_len(), 3);
    }

    #[test]
    fn test_out_of_range_slot_is_noop() {
        let mut s = store();
        let mut ctl = GestureController::new();

        ctl.drag_start(TeamId::new("a"));
        assert_eq!(
            ctl.drag_end(Some("slot-99"), &mut s, Access::editor()),
            GestureOutcome::Dropped(MoveOutcome::Unchanged(NoOp::SlotOutOfRange))
        );
    }

    #[test]
    fn test_read_only_drop_is_suppressed() {
        let mut s = store();
        let mut ctl = GestureController::new();

        for access in [Access::viewer(), Access::new(true, true)] {
            assert!(matches!(
                ctl.drag_start(TeamId::new("a")),
                GestureOutcome::Started(_)
            ));
            assert_eq!(
                ctl.drag_end(Some("slot-0"), &mut s, access),
                GestureOutcome::Suppressed
            );
            assert_eq!(ctl.state(), &DragState::Idle);
        }
        assert_eq!(s.occupied_count(), 0);
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut ctl = GestureController::new();
        ctl.drag_start(TeamId::new("a"));
        assert_eq!(ctl.drag_start(TeamId::new("b")), GestureOutcome::Ignored);
        assert_eq!(ctl.active_team(), Some(&TeamId::new("a")));
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        let mut s = store();
        let mut ctl = GestureController::new();
        assert_eq!(
            ctl.drag_end(Some("slot-0"), &mut s, Access::editor()),
            GestureOutcome::Ignored
        );
        assert_eq!(s.occupied_count(), 0);
    }

    #[test]
    fn test_pump_drains_source() {
        let mut s = store();
        let mut ctl = GestureController::new();
        let mut source: QueuedGestures = [
            GestureEvent::drag_start("a"),
            GestureEvent::drag_end("a", Some("slot-0")),
            GestureEvent::drag_start("b"),
            GestureEvent::drag_end("b", Some("slot-0")),
        ]
        .into_iter()
        .collect();

        let outcomes = ctl.pump(&mut source, &mut s, Access::editor());

        assert_eq!(outcomes.len(), 4);
        assert!(source.is_empty());
        assert_eq!(s.slot(0).map(|t| t.id.as_str()), Some("b"));
        assert_eq!(s.location_of("a"), Some(Location::Pool));
        assert!(s.verify(5).is_ok());
    }

    #[test]
    fn test_reset_forgets_drag() {
        let mut ctl = GestureController::new();
        ctl.drag_start(TeamId::new("a"));
        ctl.reset();
        assert_eq!(ctl.active_team(), None);
    }
}
