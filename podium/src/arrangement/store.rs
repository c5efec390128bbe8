//! Pool and slot state for a ranking session.

use crate::team::{Team, TeamId};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use thiserror::Error;

/// Number of ranked positions agreed with the finalize endpoint.
pub const DEFAULT_SLOT_COUNT: usize = 25;

/// Where a team currently sits.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Location {
    Pool,
    /// 0-based slot index
    Slot(usize),
}

/// Consistency failures reported by [`AssignmentStore::verify`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("slot count changed: expected {expected}, found {found}")]
    SlotCount { expected: usize, found: usize },

    #[error("team {0} appears more than once")]
    Duplicated(TeamId),

    #[error("team {0} is placed but not indexed")]
    Unindexed(TeamId),

    #[error("team {team} is indexed at {indexed:?} but found at {found:?}")]
    Misindexed {
        team: TeamId,
        indexed: Location,
        found: Location,
    },

    #[error("team {0} is indexed but not present in the pool or any slot")]
    Lost(TeamId),
}

/// Arrangement state: an unordered pool of unplaced teams and a fixed-length
/// sequence of ranked slots.
///
/// Every team lives in exactly one place. The `index` mirrors that placement
/// so lookups by id never scan. Mutations go through the move operations in
/// [`super::engine`].
#[derive(Clone, Debug)]
pub struct AssignmentStore {
    pub(super) pool: Vec<Arc<Team>>,
    pub(super) slots: Vec<Option<Arc<Team>>>,
    pub(super) index: HashMap<TeamId, Location>,
}

impl AssignmentStore {
    /// Create a store with every team in the pool and `slot_count` empty slots.
    ///
    /// Repeated ids are skipped (the first occurrence wins) so the store can
    /// never start out holding a team twice.
    pub fn new(teams: Vec<Team>, slot_count: usize) -> Self {
        let mut store = Self {
            pool: Vec::with_capacity(teams.len()),
            slots: vec![None; slot_count],
            index: HashMap::with_capacity(teams.len()),
        };
        store.fill_pool(teams);
        store
    }

    /// Store with no teams
    pub fn empty(slot_count: usize) -> Self {
        Self::new(Vec::new(), slot_count)
    }

    /// Replace every team after the upstream participant list changed.
    ///
    /// All slots are cleared; the slot count is kept.
    pub fn reseed(&mut self, teams: Vec<Team>) {
        self.pool.clear();
        self.index.clear();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.fill_pool(teams);
    }

    fn fill_pool(&mut self, teams: Vec<Team>) {
        for team in teams {
            if self.index.contains_key(&team.id) {
                warn!("ignoring repeated team {} while seeding the pool", team.id);
                continue;
            }
            self.index.insert(team.id.clone(), Location::Pool);
            self.pool.push(Arc::new(team));
        }
    }

    /// Unplaced teams in insertion order
    pub fn pool(&self) -> &[Arc<Team>] {
        &self.pool
    }

    /// Slot contents, index 0 is rank 1
    pub fn slots(&self) -> &[Option<Arc<Team>>] {
        &self.slots
    }

    /// Team at a slot, `None` if empty or out of range
    pub fn slot(&self, idx: usize) -> Option<&Arc<Team>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn location_of(&self, team_id: &str) -> Option<Location> {
        self.index.get(team_id).copied()
    }

    /// Look up a registered team wherever it currently sits
    pub fn team(&self, team_id: &str) -> Option<&Arc<Team>> {
        match self.location_of(team_id)? {
            Location::Pool => self.pool.iter().find(|t| t.id.as_str() == team_id),
            Location::Slot(idx) => self.slot(idx),
        }
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.index.contains_key(team_id)
    }

    /// Total registered teams
    pub fn team_count(&self) -> usize {
        self.index.len()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no further team can be ranked: either every slot is taken or
    /// every team is placed.
    pub fn is_fully_ranked(&self) -> bool {
        self.occupied_count() == self.slot_count().min(self.team_count())
    }

    /// Check that every indexed team is in exactly one place and that the
    /// index agrees with the actual placement.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn verify(&self, expected_slot_count: usize) -> Result<(), InvariantViolation> {
        if self.slots.len() != expected_slot_count {
            return Err(InvariantViolation::SlotCount {
                expected: expected_slot_count,
                found: self.slots.len(),
            });
        }

        let mut seen: HashSet<&TeamId> = HashSet::with_capacity(self.index.len());
        let placed = self
            .pool
            .iter()
            .map(|team| (team, Location::Pool))
            .chain(
                self.slots
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, slot)| slot.as_ref().map(|team| (team, Location::Slot(idx)))),
            );

        for (team, found) in placed {
            if !seen.insert(&team.id) {
                return Err(InvariantViolation::Duplicated(team.id.clone()));
            }
            match self.index.get(&team.id) {
                None => return Err(InvariantViolation::Unindexed(team.id.clone())),
                Some(&indexed) if indexed != found => {
                    return Err(InvariantViolation::Misindexed {
                        team: team.id.clone(),
                        indexed,
                        found,
                    });
                }
                Some(_) => {}
            }
        }

        if let Some(lost) = self.index.keys().find(|id| !seen.contains(id)) {
            return Err(InvariantViolation::Lost(lost.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(ids: &[&str]) -> Vec<Team> {
        ids.iter().map(|id| Team::new(*id, id.to_uppercase())).collect()
    }

    #[test]
    fn test_new_store_places_everyone_in_pool() {
        let store = AssignmentStore::new(teams(&["a", "b", "c"]), DEFAULT_SLOT_COUNT);
        assert_eq!(store.pool_len(), 3);
        assert_eq!(store.slot_count(), 25);
        assert_eq!(store.occupied_count(), 0);
        assert_eq!(store.location_of("b"), Some(Location::Pool));
        assert!(store.verify(DEFAULT_SLOT_COUNT).is_ok());
    }

    #[test]
    fn test_new_store_skips_repeated_ids() {
        let store = AssignmentStore::new(teams(&["a", "a", "b"]), 4);
        assert_eq!(store.team_count(), 2);
        assert_eq!(store.pool_len(), 2);
        assert!(store.verify(4).is_ok());
    }

    #[test]
    fn test_lookup_unknown_team() {
        let store = AssignmentStore::new(teams(&["a"]), 3);
        assert_eq!(store.location_of("zzz"), None);
        assert!(store.team("zzz").is_none());
        assert!(!store.contains("zzz"));
        assert_eq!(store.team("a").map(|t| t.name.as_str()), Some("A"));
    }

    #[test]
    fn test_reseed_clears_slots_and_keeps_slot_count() {
        let mut store = AssignmentStore::new(teams(&["a", "b"]), 5);
        store.move_to_slot("a", 2);
        store.reseed(teams(&["x", "y", "z"]));

        assert_eq!(store.slot_count(), 5);
        assert_eq!(store.occupied_count(), 0);
        assert_eq!(store.pool_len(), 3);
        assert!(!store.contains("a"));
        assert!(store.verify(5).is_ok());
    }

    #[test]
    fn test_verify_detects_wrong_slot_count() {
        let store = AssignmentStore::empty(3);
        assert_eq!(
            store.verify(25),
            Err(InvariantViolation::SlotCount {
                expected: 25,
                found: 3
            })
        );
    }

    #[test]
    fn test_verify_detects_duplicate_placement() {
        let mut store = AssignmentStore::new(teams(&["a"]), 3);
        let team = store.pool[0].clone();
        store.slots[1] = Some(team);
        assert_eq!(
            store.verify(3),
            Err(InvariantViolation::Duplicated(TeamId::new("a")))
        );
    }

    #[test]
    fn test_verify_detects_lost_team() {
        let mut store = AssignmentStore::new(teams(&["a", "b"]), 3);
        store.pool.pop();
        assert_eq!(store.verify(3), Err(InvariantViolation::Lost(TeamId::new("b"))));
    }

    #[test]
    fn test_verify_detects_stale_index() {
        let mut store = AssignmentStore::new(teams(&["a"]), 3);
        store.index.insert(TeamId::new("a"), Location::Slot(0));
        assert!(matches!(
            store.verify(3),
            Err(InvariantViolation::Misindexed { .. })
        ));
    }

    #[test]
    fn test_fully_ranked_with_fewer_teams_than_slots() {
        let mut store = AssignmentStore::new(teams(&["a", "b"]), 5);
        assert!(!store.is_fully_ranked());
        store.move_to_slot("a", 0);
        store.move_to_slot("b", 4);
        assert!(store.is_fully_ranked());
    }

    #[test]
    fn test_empty_store_is_trivially_ranked() {
        let store = AssignmentStore::empty(DEFAULT_SLOT_COUNT);
        assert!(store.is_fully_ranked());
        assert!(store.verify(DEFAULT_SLOT_COUNT).is_ok());
    }
}
