//! Projection of the ranked slots into the finalize submission payload.

pub mod payload;

pub use payload::FinalizePayload;

use crate::arrangement::AssignmentStore;

/// Highest rank the finalize endpoint accepts.
pub const MAX_RANKS: usize = 25;

/// Build the payload from the current slots.
///
/// Walks slots in order up to `min(MAX_RANKS, slot_count)` and records each
/// occupied slot `i` as rank `i + 1`. Reads the store only.
pub fn serialize(
    store: &AssignmentStore,
    tournament_id: &str,
    game_category: &str,
) -> FinalizePayload {
    let mut payload = FinalizePayload::new(tournament_id, game_category);
    let limit = MAX_RANKS.min(store.slot_count());

    payload.ranks.extend(
        store.slots()[..limit]
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|team| (idx + 1, team.id.clone()))),
    );
    payload
}
