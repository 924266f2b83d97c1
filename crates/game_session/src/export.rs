//! Portable move-log export.
//!
//! The only artifact the core persists: the ordered list of recorded moves
//! annotated with the final result. Serialization is deterministic, so the
//! same input sequence always produces byte-identical output.

use crate::session::ResultTag;
use crate::types::MoveRecord;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMove {
    /// Coordinate form, e.g. `e2e4`.
    pub coords: String,
    /// Notation as produced by the rules engine.
    pub notation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveLog {
    pub moves: Vec<LoggedMove>,
    /// Final result; `None` while the session has not ended.
    pub result: Option<ResultTag>,
}

impl MoveLog {
    pub fn from_records(records: &[MoveRecord], result: Option<ResultTag>) -> Self {
        Self {
            moves: records
                .iter()
                .map(|rec| LoggedMove {
                    coords: rec.coords(),
                    notation: rec.notation.clone(),
                })
                .collect(),
            result,
        }
    }

    /// Compact JSON form. Field order is fixed by the struct definitions,
    /// so equal logs serialize to equal bytes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
