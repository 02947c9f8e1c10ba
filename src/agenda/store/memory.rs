use super::AgendaStore;
use crate::error::Result;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: Option<String>,
    values: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AgendaStore for InMemoryStore {
    fn read_snapshot(&self) -> Result<Option<String>> {
        Ok(self.snapshot.clone())
    }

    fn write_snapshot(&mut self, raw: &str) -> Result<()> {
        self.snapshot = Some(raw.to_string());
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_value(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn values(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.values.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Agenda, Weekday};
    use crate::store::save_agenda;

    /// Ids of the last teacher/subject/group added through the fixture.
    #[derive(Debug, Clone, Default)]
    pub struct Added {
        pub teacher: String,
        pub subject: String,
        pub group: String,
        /// `(content_id, homework_id)` per day, in the order given.
        pub fields: Vec<(String, String)>,
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub agenda: Agenda,
        pub last: Added,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                agenda: Agenda::new(),
                last: Added::default(),
            }
        }

        /// Adds a teacher teaching `subject` to `label` on `days`, and stores
        /// `(content, homework)` texts for each day.
        pub fn with_class(
            mut self,
            teacher: &str,
            subject: &str,
            label: &str,
            days: &[(Weekday, &str, &str)],
        ) -> Self {
            let mut t = self.agenda.create_teacher(teacher);
            let mut s = self.agenda.create_subject(subject);
            let mut g = self.agenda.create_group(label);
            let mut fields = Vec::new();
            for (weekday, content, homework) in days {
                let day = self.agenda.create_day(weekday.label());
                self.store
                    .set_value(&day.fields.content_id, content)
                    .unwrap();
                self.store
                    .set_value(&day.fields.homework_id, homework)
                    .unwrap();
                fields.push((day.fields.content_id.clone(), day.fields.homework_id.clone()));
                g.days.push(day);
            }
            self.last = Added {
                teacher: t.id.clone(),
                subject: s.id.clone(),
                group: g.id.clone(),
                fields,
            };
            s.groups.push(g);
            t.subjects.push(s);
            self.agenda.teachers.push(t);
            save_agenda(&mut self.store, &self.agenda).unwrap();
            self
        }

        pub fn with_value(mut self, key: &str, value: &str) -> Self {
            self.store.set_value(key, value).unwrap();
            self
        }
    }
}
