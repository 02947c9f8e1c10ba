//! Identifier allocation for one agenda.
//!
//! Every entity id comes from one of four counters kept in [`Meta`]. Counters
//! only ever go up: removing a teacher does not give `t3` back, so a field key
//! such as `campo007` keeps pointing at the same text forever.

use serde::{Deserialize, Deserializer, Serialize};

const TEACHER_PREFIX: &str = "t";
const SUBJECT_PREFIX: &str = "s";
const GROUP_PREFIX: &str = "g";
const FIELD_PREFIX: &str = "campo";

/// Reads an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The four sequences, persisted as the `meta` block of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, deserialize_with = "null_as_default")]
    teacher_seq: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    subject_seq: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    group_seq: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    field_seq: u64,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_teacher_id(&mut self) -> String {
        self.teacher_seq += 1;
        format!("{}{}", TEACHER_PREFIX, self.teacher_seq)
    }

    pub fn next_subject_id(&mut self) -> String {
        self.subject_seq += 1;
        format!("{}{}", SUBJECT_PREFIX, self.subject_seq)
    }

    pub fn next_group_id(&mut self) -> String {
        self.group_seq += 1;
        format!("{}{}", GROUP_PREFIX, self.group_seq)
    }

    pub fn next_field_id(&mut self) -> String {
        self.field_seq += 1;
        format!("{}{:03}", FIELD_PREFIX, self.field_seq)
    }

    // The observe_* methods raise a counter so the next id lands past one
    // already in the tree. Ids that don't follow the pattern are ignored.

    pub fn observe_teacher_id(&mut self, id: &str) {
        raise(&mut self.teacher_seq, id, TEACHER_PREFIX);
    }

    pub fn observe_subject_id(&mut self, id: &str) {
        raise(&mut self.subject_seq, id, SUBJECT_PREFIX);
    }

    pub fn observe_group_id(&mut self, id: &str) {
        raise(&mut self.group_seq, id, GROUP_PREFIX);
    }

    pub fn observe_field_id(&mut self, id: &str) {
        raise(&mut self.field_seq, id, FIELD_PREFIX);
    }
}

fn raise(seq: &mut u64, id: &str, prefix: &str) {
    let suffix = id.strip_prefix(prefix).and_then(|digits| digits.parse::<u64>().ok());
    if let Some(n) = suffix {
        *seq = (*seq).max(n);
    }
}
