use serde::Serialize;

use crate::document::{RawRecord, RecordId};

/// A record with its name split into first name and surname.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub name: String,
    /// `None` when the source name had a single token.
    pub surname: Option<String>,
    pub id: RecordId,
}

/// Split a record's name on whitespace into `name` and `surname`.
///
/// Only the first two tokens are used; anything after the second is dropped.
pub fn normalize_record(record: &RawRecord) -> NormalizedRecord {
    let mut tokens = record.name.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_string();
    let surname = tokens.next().map(str::to_string);

    NormalizedRecord {
        name,
        surname,
        id: record.id.clone(),
    }
}

/// Normalize a sequence of records, preserving order.
pub fn normalize_records(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}
