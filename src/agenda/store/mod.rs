//! # Storage Layer
//!
//! The agenda keeps two kinds of state, mirroring how the web version used
//! browser storage:
//!
//! - the **snapshot**: the whole teacher tree plus id counters, serialized as
//!   one JSON document;
//! - the **values**: a flat key-value map of field texts (`campo001`), date
//!   inputs (`campo-data-1`) and presence checks (`check-t1`).
//!
//! [`AgendaStore`] is the narrow contract the command layer talks to.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in a data directory
//!   ```text
//!   <data dir>/
//!   ├── agenda-config-v2.json   # snapshot
//!   ├── values.json             # key-value texts
//!   └── settings.json           # see crate::config
//!   ```
//! - [`memory::InMemoryStore`]: no persistence, for tests.
//!
//! ## Recovery
//!
//! [`load_agenda`] never fails: a missing snapshot is a fresh agenda, and a
//! corrupt one is logged and replaced by a fresh agenda as well. After a
//! successful parse the id counters are raised past every id found in the
//! tree, and `null` lists or `meta` read as empty.

use crate::error::Result;
use crate::model::Agenda;
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

pub trait AgendaStore {
    /// Raw snapshot text, `None` when nothing was saved yet.
    fn read_snapshot(&self) -> Result<Option<String>>;

    fn write_snapshot(&mut self, raw: &str) -> Result<()>;

    fn get_value(&self, key: &str) -> Result<Option<String>>;

    fn set_value(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove_value(&mut self, key: &str) -> Result<()>;

    /// Copy of every stored value.
    fn values(&self) -> Result<BTreeMap<String, String>>;
}

pub fn load_agenda<S: AgendaStore>(store: &S) -> Agenda {
    let raw = match store.read_snapshot() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Agenda::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read agenda snapshot, starting empty");
            return Agenda::new();
        }
    };
    match serde_json::from_str::<Agenda>(&raw) {
        Ok(mut agenda) => {
            agenda.reconcile_counters();
            agenda
        }
        Err(e) => {
            tracing::warn!(error = %e, "agenda snapshot is malformed, starting empty");
            Agenda::new()
        }
    }
}

pub fn save_agenda<S: AgendaStore>(store: &mut S, agenda: &Agenda) -> Result<()> {
    let raw = serde_json::to_string_pretty(agenda)?;
    store.write_snapshot(&raw)
}
