//! Move operations over an [`AssignmentStore`].
//!
//! All operations are total: a request that cannot apply (unknown team,
//! out-of-range slot, moving onto the team's own slot) returns
//! [`MoveOutcome::Unchanged`] and leaves the store exactly as it was.

use super::store::{AssignmentStore, Location};
use crate::team::TeamId;
use log::debug;
use std::fmt;

/// Why a move request left the store unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoOp {
    UnknownTeam,
    SlotOutOfRange,
    SameSlot,
    AlreadyInPool,
    /// Caller was not allowed to edit
    ReadOnly,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::UnknownTeam => "unknown team",
            Self::SlotOutOfRange => "slot out of range",
            Self::SameSlot => "team already in that slot",
            Self::AlreadyInPool => "team already unplaced",
            Self::ReadOnly => "read-only",
        };
        write!(f, "{repr}")
    }
}

/// What a move operation did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// Pool team placed into an empty slot
    Placed { team: TeamId, slot: usize },
    /// Pool team placed into an occupied slot; the previous occupant went to the pool
    Displaced {
        team: TeamId,
        slot: usize,
        displaced: TeamId,
    },
    /// Slotted team moved to another slot, trading places with its occupant if any
    Swapped {
        team: TeamId,
        from: usize,
        to: usize,
        other: Option<TeamId>,
    },
    /// Slotted team returned to the pool
    Released { team: TeamId, slot: usize },
    Unchanged(NoOp),
}

impl MoveOutcome {
    /// Whether the store was modified
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed { team, slot } => write!(f, "{team} ranked #{}", slot + 1),
            Self::Displaced {
                team,
                slot,
                displaced,
            } => write!(
                f,
                "{team} ranked #{}, {displaced} returned to the pool",
                slot + 1
            ),
            Self::Swapped {
                team,
                from,
                to,
                other: Some(other),
            } => write!(
                f,
                "{team} moved #{} -> #{}, {other} moved to #{}",
                from + 1,
                to + 1,
                from + 1
            ),
            Self::Swapped {
                team,
                from,
                to,
                other: None,
            } => write!(f, "{team} moved #{} -> #{}", from + 1, to + 1),
            Self::Released { team, slot } => {
                write!(f, "{team} removed from #{} to the pool", slot + 1)
            }
            Self::Unchanged(reason) => write!(f, "no change ({reason})"),
        }
    }
}

impl AssignmentStore {
    /// Move a team into `target`.
    ///
    /// A slotted team swaps with whatever occupies `target` (possibly
    /// nothing), so no team ever drops into the pool. A pool team takes
    /// `target` and pushes any previous occupant back into the pool.
    pub fn move_to_slot(&mut self, team_id: &str, target: usize) -> MoveOutcome {
        if target >= self.slots.len() {
            return MoveOutcome::Unchanged(NoOp::SlotOutOfRange);
        }

        let outcome = match self.location_of(team_id) {
            None => return MoveOutcome::Unchanged(NoOp::UnknownTeam),
            Some(Location::Slot(source)) if source == target => {
                return MoveOutcome::Unchanged(NoOp::SameSlot);
            }
            Some(Location::Slot(source)) => self.swap_slots(source, target),
            Some(Location::Pool) => self.place_from_pool(team_id, target),
        };

        debug!("{outcome}");
        outcome
    }

    /// Empty the team's slot and return it to the pool.
    pub fn remove_to_pool(&mut self, team_id: &str) -> MoveOutcome {
        let slot = match self.location_of(team_id) {
            None => return MoveOutcome::Unchanged(NoOp::UnknownTeam),
            Some(Location::Pool) => return MoveOutcome::Unchanged(NoOp::AlreadyInPool),
            Some(Location::Slot(slot)) => slot,
        };

        let Some(team) = self.slots[slot].take() else {
            return MoveOutcome::Unchanged(NoOp::UnknownTeam);
        };
        self.index.insert(team.id.clone(), Location::Pool);
        let outcome = MoveOutcome::Released {
            team: team.id.clone(),
            slot,
        };
        self.pool.push(team);

        debug!("{outcome}");
        outcome
    }

    /// Clear every slot, appending the slotted teams to the pool in rank
    /// order. Returns how many teams were released.
    pub fn release_all_to_pool(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut() {
            if let Some(team) = slot.take() {
                self.index.insert(team.id.clone(), Location::Pool);
                self.pool.push(team);
                released += 1;
            }
        }

        debug!("released {released} team(s) to the pool");
        released
    }

    fn swap_slots(&mut self, source: usize, target: usize) -> MoveOutcome {
        self.slots.swap(source, target);

        let mut moved = None;
        let mut other = None;
        if let Some(team) = &self.slots[target] {
            self.index.insert(team.id.clone(), Location::Slot(target));
            moved = Some(team.id.clone());
        }
        if let Some(team) = &self.slots[source] {
            self.index.insert(team.id.clone(), Location::Slot(source));
            other = Some(team.id.clone());
        }

        match moved {
            Some(team) => MoveOutcome::Swapped {
                team,
                from: source,
                to: target,
                other,
            },
            None => MoveOutcome::Unchanged(NoOp::UnknownTeam),
        }
    }

    fn place_from_pool(&mut self, team_id: &str, target: usize) -> MoveOutcome {
        let Some(pos) = self.pool.iter().position(|t| t.id.as_str() == team_id) else {
            return MoveOutcome::Unchanged(NoOp::UnknownTeam);
        };
        let team = self.pool.remove(pos);
        let id = team.id.clone();
        self.index.insert(id.clone(), Location::Slot(target));

        match self.slots[target].replace(team) {
            Some(previous) => {
                self.index.insert(previous.id.clone(), Location::Pool);
                let displaced = previous.id.clone();
                self.pool.push(previous);
                MoveOutcome::Displaced {
                    team: id,
                    slot: target,
                    displaced,
                }
            }
            None => MoveOutcome::Placed {
                team: id,
                slot: target,
            },
        }
    }
}
