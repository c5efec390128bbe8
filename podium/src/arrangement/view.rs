//! Read-only projection of an arrangement for viewers without edit rights.

use super::store::AssignmentStore;
use crate::{finalize::FinalizePayload, team::Team};
use serde::Serialize;
use std::{collections::HashSet, sync::Arc};

/// One ranked position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankRow {
    /// 1-indexed rank
    pub rank: usize,
    pub team: Option<Arc<Team>>,
}

/// Snapshot of the standings as a viewer sees them.
///
/// Holds shared references to the teams, never the store itself, so nothing
/// reachable from a view can modify the arrangement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsView {
    pub rows: Vec<RankRow>,
    pub unplaced: Vec<Arc<Team>>,
}

impl StandingsView {
    pub fn from_store(store: &AssignmentStore) -> Self {
        let rows = store
            .slots()
            .iter()
            .enumerate()
            .map(|(idx, slot)| RankRow {
                rank: idx + 1,
                team: slot.clone(),
            })
            .collect();

        Self {
            rows,
            unplaced: store.pool().to_vec(),
        }
    }

    /// Standings exactly as submitted, with team details looked up in `store`.
    ///
    /// Teams not named by the payload are listed as unplaced, even if they
    /// were moved into a slot after the payload was built.
    pub fn from_payload(payload: &FinalizePayload, store: &AssignmentStore) -> Self {
        let rows = (1..=store.slot_count())
            .map(|rank| RankRow {
                rank,
                team: payload
                    .team_at(rank)
                    .and_then(|team_id| store.team(team_id.as_str()))
                    .cloned(),
            })
            .collect();

        let ranked: HashSet<&str> = payload.ranks.values().map(|id| id.as_str()).collect();
        let unplaced = store
            .pool()
            .iter()
            .chain(store.slots().iter().flatten())
            .filter(|team| !ranked.contains(team.id.as_str()))
            .cloned()
            .collect();

        Self { rows, unplaced }
    }

    /// Only the occupied ranks, in rank order
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &Team)> {
        self.rows
            .iter()
            .filter_map(|row| row.team.as_deref().map(|team| (row.rank, team)))
    }
}
