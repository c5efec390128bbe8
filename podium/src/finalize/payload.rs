//! Wire payload for a finalize submission.

use crate::team::TeamId;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// Final standings as submitted to the server.
///
/// Serializes to a flat JSON object:
///
/// ```json
/// {"tournament_id": "t1", "game_category": "valorant", "rank_1": "team-a", "rank_3": "team-c"}
/// ```
///
/// Empty ranks are omitted rather than sent as null.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinalizePayload {
    pub tournament_id: String,
    pub game_category: String,
    /// 1-indexed rank to team
    pub ranks: BTreeMap<usize, TeamId>,
}

impl FinalizePayload {
    pub fn new(tournament_id: &str, game_category: &str) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            game_category: game_category.to_string(),
            ranks: BTreeMap::new(),
        }
    }

    /// Team at a 1-indexed rank
    pub fn team_at(&self, rank: usize) -> Option<&TeamId> {
        self.ranks.get(&rank)
    }

    pub fn ranked_count(&self) -> usize {
        self.ranks.len()
    }

    pub fn rank_key(rank: usize) -> String {
        format!("rank_{rank}")
    }
}

impl Serialize for FinalizePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.ranks.len()))?;
        map.serialize_entry("tournament_id", &self.tournament_id)?;
        map.serialize_entry("game_category", &self.game_category)?;
        for (rank, team_id) in &self.ranks {
            map.serialize_entry(&Self::rank_key(*rank), team_id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_flat_object_in_rank_order() {
        let mut payload = FinalizePayload::new("t-42", "chess");
        payload.ranks.insert(10, TeamId::new("j"));
        payload.ranks.insert(2, TeamId::new("b"));
        payload.ranks.insert(1, TeamId::new("a"));

        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"tournament_id":"t-42","game_category":"chess","rank_1":"a","rank_2":"b","rank_10":"j"}"#
        );
    }

    #[test]
    fn test_serialize_without_ranks() {
        let payload = FinalizePayload::new("t", "c");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"tournament_id": "t", "game_category": "c"}));
    }

    #[test]
    fn test_team_at() {
        let mut payload = FinalizePayload::new("t", "c");
        payload.ranks.insert(3, TeamId::new("x"));
        assert_eq!(payload.team_at(3), Some(&TeamId::new("x")));
        assert_eq!(payload.team_at(1), None);
        assert_eq!(payload.ranked_count(), 1);
    }
}
