//! Normalization of raw participant records into canonical teams.
//!
//! Participant sources are not consistent about field names: one endpoint
//! sends `teamId`/`teamName`, another `id`/`name`, registrations wrap the
//! team in a nested `team` object. The registry accepts any of these shapes.

use super::models::{Team, TeamId};
use log::warn;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

const ID_KEYS: [&str; 4] = ["teamId", "team_id", "id", "_id"];
const NAME_KEYS: [&str; 4] = ["teamName", "team_name", "name", "displayName"];
const MEMBER_KEYS: [&str; 2] = ["members", "players"];
const MEMBER_NAME_KEYS: [&str; 3] = ["name", "username", "displayName"];
const NESTED_KEY: &str = "team";

/// Prefix for ids synthesized when a record carries no usable identity.
pub const PLACEHOLDER_PREFIX: &str = "unidentified-";

/// Result of normalizing a participant list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalized {
    /// Canonical teams in stable input order
    pub teams: Vec<Team>,
    /// Ids that appeared more than once (later records overwrote earlier ones)
    pub duplicates: Vec<TeamId>,
    /// Number of teams that received a placeholder id
    pub placeholders: usize,
}

impl Normalized {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Stateless normalizer for participant records.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamRegistry;

impl TeamRegistry {
    /// Normalize raw records into teams, deduplicating by id.
    ///
    /// A later record with an already seen id replaces the earlier team's
    /// data but keeps the earlier output position. Records that are not JSON
    /// objects, or have no usable id, get a placeholder id derived from their
    /// input position rather than being dropped.
    pub fn normalize(records: &[Value]) -> Normalized {
        let mut normalized = Normalized::default();
        let mut positions: HashMap<TeamId, usize> = HashMap::new();

        let parsed: Vec<ParsedRecord> = records.iter().map(parse_record).collect();
        // Placeholder ids must not collide with any real id, earlier or later
        let mut taken: HashSet<TeamId> = parsed.iter().filter_map(|r| r.id.clone()).collect();

        for (idx, record) in parsed.into_iter().enumerate() {
            let id = match record.id {
                Some(id) => id,
                None => {
                    normalized.placeholders += 1;
                    placeholder_id(idx, &mut taken)
                }
            };
            let name = record.name.unwrap_or_else(|| id.to_string());
            let team = Team::new(id, name).with_members(record.members);

            match positions.get(&team.id) {
                Some(&pos) => {
                    warn!(
                        "duplicate participant id {} at record {}; keeping the later record",
                        team.id, idx
                    );
                    if !normalized.duplicates.contains(&team.id) {
                        normalized.duplicates.push(team.id.clone());
                    }
                    normalized.teams[pos] = team;
                }
                None => {
                    positions.insert(team.id.clone(), normalized.teams.len());
                    normalized.teams.push(team);
                }
            }
        }

        if normalized.placeholders > 0 {
            warn!(
                "{} participant record(s) had no usable id; placeholder ids assigned",
                normalized.placeholders
            );
        }

        normalized
    }
}

/// Fields extracted from one raw record before ids are settled.
#[derive(Default)]
struct ParsedRecord {
    id: Option<TeamId>,
    name: Option<String>,
    members: Vec<String>,
}

fn parse_record(record: &Value) -> ParsedRecord {
    let Some(fields) = record.as_object() else {
        return ParsedRecord::default();
    };
    let nested = fields.get(NESTED_KEY).and_then(Value::as_object);

    ParsedRecord {
        id: lookup_id(fields)
            .or_else(|| nested.and_then(lookup_id))
            .map(TeamId::from),
        name: lookup_string(fields, &NAME_KEYS)
            .or_else(|| nested.and_then(|n| lookup_string(n, &NAME_KEYS))),
        members: lookup_members(fields)
            .or_else(|| nested.and_then(lookup_members))
            .unwrap_or_default(),
    }
}

/// `unidentified-{idx}`, suffixed with `-{n}` if a real id already uses it.
fn placeholder_id(idx: usize, taken: &mut HashSet<TeamId>) -> TeamId {
    let base = format!("{PLACEHOLDER_PREFIX}{idx}");
    let mut candidate = TeamId::new(&base);
    let mut n = 1;
    while taken.contains(&candidate) {
        candidate = TeamId::from(format!("{base}-{n}"));
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn lookup_id(fields: &Map<String, Value>) -> Option<String> {
    ID_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(identity_value)
}

fn identity_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lookup_string(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn lookup_members(fields: &Map<String, Value>) -> Option<Vec<String>> {
    let list = MEMBER_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(Value::as_array)?;

    Some(
        list.iter()
            .filter_map(|member| match member {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(obj) => lookup_string(obj, &MEMBER_NAME_KEYS),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
    )
}
