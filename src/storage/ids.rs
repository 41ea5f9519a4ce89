use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{NoteCollection, NoteId};

/// How fresh note ids are produced.
///
/// Every strategy checks the candidate against the current collection and
/// moves on until it finds a free id, so two notes created within the same
/// millisecond still get distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Milliseconds since the Unix epoch, as a decimal string.
    #[default]
    Timestamp,
    /// One more than the largest numeric id present, starting at 1.
    Counter,
    /// Random UUID v4.
    Uuid,
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdStrategy::Timestamp => write!(f, "timestamp"),
            IdStrategy::Counter => write!(f, "counter"),
            IdStrategy::Uuid => write!(f, "uuid"),
        }
    }
}

impl std::str::FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timestamp" | "time" => Ok(IdStrategy::Timestamp),
            "counter" | "sequence" => Ok(IdStrategy::Counter),
            "uuid" => Ok(IdStrategy::Uuid),
            _ => Err(format!("Invalid id strategy: {}", s)),
        }
    }
}

impl IdStrategy {
    /// Generate an id not present in `existing`.
    pub fn next_id(&self, existing: &NoteCollection) -> NoteId {
        match self {
            IdStrategy::Timestamp => {
                next_free_from(chrono::Utc::now().timestamp_millis(), existing)
                    .unwrap_or_else(|| random_id(existing))
            }
            IdStrategy::Counter => {
                let max = existing
                    .ids()
                    .filter_map(|id| id.as_str().parse::<i64>().ok())
                    .max()
                    .unwrap_or(0);
                max.checked_add(1)
                    .and_then(|start| next_free_from(start, existing))
                    .unwrap_or_else(|| random_id(existing))
            }
            IdStrategy::Uuid => random_id(existing),
        }
    }
}

/// First decimal id at or above `start` that is not taken, or `None` once
/// the numeric range runs out.
fn next_free_from(start: i64, existing: &NoteCollection) -> Option<NoteId> {
    let mut candidate = start;
    loop {
        let id = NoteId::new(candidate.to_string());
        if !existing.contains(&id) {
            return Some(id);
        }
        candidate = candidate.checked_add(1)?;
    }
}

fn random_id(existing: &NoteCollection) -> NoteId {
    loop {
        let id = NoteId::new(Uuid::new_v4().to_string());
        if !existing.contains(&id) {
            return id;
        }
    }
}
