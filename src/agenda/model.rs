//! The agenda tree: Teacher → Subject → Group → Day.
//!
//! Children are owned by value inside their parent's `Vec`, so removing a
//! node drops its whole subtree. Days carry only the ids of their two text
//! fields; the texts themselves live in the key-value store.

use crate::ids::{null_as_default, Meta};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_TEACHER_NAME: &str = "Professor";
pub const DEFAULT_SUBJECT_NAME: &str = "Matéria";
pub const DEFAULT_GROUP_LABEL: &str = "Turma";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// The canonical label stored in `Day::label`.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Segunda-Feira",
            Weekday::Tuesday => "Terça-Feira",
            Weekday::Wednesday => "Quarta-Feira",
            Weekday::Thursday => "Quinta-Feira",
            Weekday::Friday => "Sexta-Feira",
            Weekday::Saturday => "Sábado",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Weekday::Monday => "Segunda",
            Weekday::Tuesday => "Terça",
            Weekday::Wednesday => "Quarta",
            Weekday::Thursday => "Quinta",
            Weekday::Friday => "Sexta",
            Weekday::Saturday => "Sábado",
        }
    }

    pub fn from_label(label: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts the canonical label, the short label, or the ascii key
    /// (`segunda`, `terca`, ... `sabado`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::collate::fold(s.trim());
        Weekday::ALL
            .into_iter()
            .find(|d| {
                let short = crate::collate::fold(d.short());
                wanted == crate::collate::fold(d.label()) || wanted == short
            })
            .ok_or_else(|| format!("Unknown weekday: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFields {
    pub content_id: String,
    pub homework_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub label: String,
    pub fields: DayFields,
}

impl Day {
    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_label(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Vec<Day>,
}

impl Group {
    pub fn find_day(&self, label: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.label == label)
    }

    pub fn has_day(&self, label: &str) -> bool {
        self.find_day(label).is_some()
    }

    /// Adds a day for `label` unless one exists. Field ids are only allocated
    /// when a day is actually created.
    pub fn ensure_day(&mut self, meta: &mut Meta, label: &str) {
        if self.has_day(label) {
            return;
        }
        let day = create_day(meta, label);
        self.days.push(day);
    }

    pub fn remove_day(&mut self, label: &str) -> bool {
        let before = self.days.len();
        self.days.retain(|d| d.label != label);
        self.days.len() != before
    }

    /// Days in week order; unknown labels go last.
    pub fn sorted_days(&self) -> Vec<&Day> {
        let mut days: Vec<&Day> = self.days.iter().collect();
        days.sort_by_key(|d| d.weekday().map(|w| w as usize).unwrap_or(99));
        days
    }

    pub fn display_label(&self) -> &str {
        non_empty_or(&self.label, DEFAULT_GROUP_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Group>,
}

impl Subject {
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn remove_group(&mut self, id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        self.groups.len() != before
    }

    pub fn display_name(&self) -> &str {
        non_empty_or(&self.name, DEFAULT_SUBJECT_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<Subject>,
}

impl Teacher {
    pub fn find_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn find_subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    pub fn remove_subject(&mut self, id: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        self.subjects.len() != before
    }

    /// Key-value entry recording whether this teacher handed in the week.
    pub fn checkbox_key(&self) -> String {
        format!("check-{}", self.id)
    }

    pub fn display_name(&self) -> &str {
        non_empty_or(&self.name, DEFAULT_TEACHER_NAME)
    }
}

/// One loaded agenda: the id counters plus the teacher tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    #[serde(default, deserialize_with = "null_as_default")]
    meta: Meta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teachers: Vec<Teacher>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_teacher(&mut self, name: &str) -> Teacher {
        Teacher {
            id: self.meta.next_teacher_id(),
            name: name.to_string(),
            subjects: Vec::new(),
        }
    }

    pub fn create_subject(&mut self, name: &str) -> Subject {
        Subject {
            id: self.meta.next_subject_id(),
            name: name.to_string(),
            groups: Vec::new(),
        }
    }

    pub fn create_group(&mut self, label: &str) -> Group {
        Group {
            id: self.meta.next_group_id(),
            label: label.to_string(),
            days: Vec::new(),
        }
    }

    pub fn create_day(&mut self, label: &str) -> Day {
        create_day(&mut self.meta, label)
    }

    /// Split borrow so callers can allocate field ids while holding a
    /// mutable reference into the tree.
    pub fn parts_mut(&mut self) -> (&mut Meta, &mut Vec<Teacher>) {
        (&mut self.meta, &mut self.teachers)
    }

    pub fn find_teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn find_teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.teachers.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_teacher(&mut self, id: &str) -> bool {
        let before = self.teachers.len();
        self.teachers.retain(|t| t.id != id);
        self.teachers.len() != before
    }

    /// Raises every counter past the ids already present in the tree, so a
    /// snapshot with a stale or missing `meta` block never reissues one.
    pub fn reconcile_counters(&mut self) {
        let meta = &mut self.meta;
        for teacher in &self.teachers {
            meta.observe_teacher_id(&teacher.id);
            for subject in &teacher.subjects {
                meta.observe_subject_id(&subject.id);
                for group in &subject.groups {
                    meta.observe_group_id(&group.id);
                    for day in &group.days {
                        meta.observe_field_id(&day.fields.content_id);
                        meta.observe_field_id(&day.fields.homework_id);
                    }
                }
            }
        }
    }

    /// Every field id in tree order.
    pub fn field_ids(&self) -> Vec<&str> {
        self.teachers
            .iter()
            .flat_map(|t| &t.subjects)
            .flat_map(|s| &s.groups)
            .flat_map(|g| &g.days)
            .flat_map(|d| [d.fields.content_id.as_str(), d.fields.homework_id.as_str()])
            .collect()
    }
}

fn create_day(meta: &mut Meta, label: &str) -> Day {
    let content_id = meta.next_field_id();
    let homework_id = meta.next_field_id();
    Day {
        label: label.to_string(),
        fields: DayFields {
            content_id,
            homework_id,
        },
    }
}

/// Trimmed `input`, or `fallback` when nothing is left.
pub fn name_or_placeholder(input: &str, fallback: &str) -> String {
    non_empty_or(input.trim(), fallback).to_string()
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn agenda_with_group() -> (Agenda, String, String, String) {
        let mut agenda = Agenda::new();
        let mut teacher = agenda.create_teacher("Ana");
        let mut subject = agenda.create_subject("Math");
        let group = agenda.create_group("7º ano TARDE");
        let (t, s, g) = (teacher.id.clone(), subject.id.clone(), group.id.clone());
        subject.groups.push(group);
        teacher.subjects.push(subject);
        agenda.teachers.push(teacher);
        (agenda, t, s, g)
    }

    #[test]
    fn ids_keep_increasing_after_removal() {
        let mut agenda = Agenda::new();
        let t1 = agenda.create_teacher("A");
        agenda.teachers.push(t1.clone());
        assert!(agenda.remove_teacher(&t1.id));
        let t2 = agenda.create_teacher("B");
        assert_eq!(t1.id, "t1");
        assert_eq!(t2.id, "t2");
    }

    #[test]
    fn create_day_allocates_two_fields() {
        let mut agenda = Agenda::new();
        let day = agenda.create_day("Segunda-Feira");
        assert_eq!(day.fields.content_id, "campo001");
        assert_eq!(day.fields.homework_id, "campo002");
    }

    #[test]
    fn ensure_day_is_idempotent() {
        let (mut agenda, t, s, g) = agenda_with_group();
        let (meta, teachers) = agenda.parts_mut();
        let group = &mut teachers[0].subjects[0].groups[0];
        group.ensure_day(meta, "Segunda-Feira");
        let after_first = group.days.clone();
        group.ensure_day(meta, "Segunda-Feira");
        assert_eq!(group.days, after_first);

        // no field ids were burned by the second call
        let next = agenda.create_day("Terça-Feira");
        assert_eq!(next.fields.content_id, "campo003");
        assert!(agenda
            .find_teacher(&t)
            .and_then(|t| t.find_subject(&s))
            .and_then(|s| s.find_group(&g))
            .is_some());
    }

    #[test]
    fn remove_day_only_touches_matching_label() {
        let (mut agenda, ..) = agenda_with_group();
        let (meta, teachers) = agenda.parts_mut();
        let group = &mut teachers[0].subjects[0].groups[0];
        group.ensure_day(meta, "Segunda-Feira");
        group.ensure_day(meta, "Sexta-Feira");
        assert!(!group.remove_day("Quarta-Feira"));
        assert!(group.remove_day("Segunda-Feira"));
        assert_eq!(group.days.len(), 1);
        assert_eq!(group.days[0].label, "Sexta-Feira");
    }

    #[test]
    fn field_ids_unique_across_tree() {
        let mut agenda = Agenda::new();
        for name in ["A", "B"] {
            let mut teacher = agenda.create_teacher(name);
            for subject_name in ["Math", "Art"] {
                let mut subject = agenda.create_subject(subject_name);
                let mut group = agenda.create_group("6º ano");
                for day in Weekday::ALL {
                    let (meta, _) = agenda.parts_mut();
                    group.ensure_day(meta, day.label());
                }
                subject.groups.push(group);
                teacher.subjects.push(subject);
            }
            agenda.teachers.push(teacher);
        }
        let ids = agenda.field_ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 2 * 2 * 6 * 2);
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn removing_teacher_drops_descendants() {
        let (mut agenda, t, ..) = agenda_with_group();
        assert!(agenda.remove_teacher(&t));
        assert!(agenda.find_teacher(&t).is_none());
        assert!(agenda.field_ids().is_empty());
        assert!(!agenda.remove_teacher(&t));
    }

    #[test]
    fn lookups_return_none_for_unknown_ids() {
        let (agenda, t, s, _) = agenda_with_group();
        assert!(agenda.find_teacher("t99").is_none());
        let teacher = agenda.find_teacher(&t).unwrap();
        assert!(teacher.find_subject("s99").is_none());
        assert!(teacher.find_subject(&s).unwrap().find_group("g99").is_none());
    }

    #[test]
    fn sorted_days_follow_week_order() {
        let (mut agenda, ..) = agenda_with_group();
        let (meta, teachers) = agenda.parts_mut();
        let group = &mut teachers[0].subjects[0].groups[0];
        for label in ["Sábado", "Quarta-Feira", "Segunda-Feira"] {
            group.ensure_day(meta, label);
        }
        let labels: Vec<&str> = group.sorted_days().iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Segunda-Feira", "Quarta-Feira", "Sábado"]);
    }

    #[test]
    fn weekday_parses_loose_input() {
        assert_eq!("segunda".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Terça".parse::<Weekday>().unwrap(), Weekday::Tuesday);
        assert_eq!("terca".parse::<Weekday>().unwrap(), Weekday::Tuesday);
        assert_eq!("SÁBADO".parse::<Weekday>().unwrap(), Weekday::Saturday);
        assert_eq!("Quinta-Feira".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert!("domingo".parse::<Weekday>().is_err());
    }

    #[test]
    fn placeholder_used_for_blank_names() {
        assert_eq!(name_or_placeholder("   ", DEFAULT_TEACHER_NAME), "Professor");
        assert_eq!(name_or_placeholder(" Ana ", DEFAULT_TEACHER_NAME), "Ana");
    }

    #[test]
    fn snapshot_uses_camel_case_field_keys() {
        let mut agenda = Agenda::new();
        let mut teacher = agenda.create_teacher("Ana");
        let mut subject = agenda.create_subject("Math");
        let mut group = agenda.create_group("6º ano");
        let (meta, _) = agenda.parts_mut();
        group.ensure_day(meta, "Segunda-Feira");
        subject.groups.push(group);
        teacher.subjects.push(subject);
        agenda.teachers.push(teacher);

        let json = serde_json::to_value(&agenda).unwrap();
        let day = &json["teachers"][0]["subjects"][0]["groups"][0]["days"][0];
        assert_eq!(day["fields"]["contentId"], "campo001");
        assert_eq!(day["fields"]["homeworkId"], "campo002");
        assert_eq!(json["meta"]["fieldSeq"], 2);
    }
}
