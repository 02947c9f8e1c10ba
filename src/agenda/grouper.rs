//! Flattening the agenda tree into one document per class and shift.
//!
//! Each group is keyed by its label plus shift code (`"7º ano TARDE__T"`); a
//! group taught in both shifts feeds two documents with the same lessons,
//! and a group with no shift feeds a document keyed by the bare label.
//! Records are created on first reference and reused afterwards, so every
//! subject teaching the same class lands in the same document.
//!
//! Serialized field names are the placeholders used by the document
//! templates (`turmaTitulo`, `dias`, `aulas`, ...).

use crate::collate;
use crate::model::Agenda;
use crate::shift::{base_label, display_title, normalize_shift, shift_title, Shift};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_FALLBACK_TEXT: &str = "Não possui";

const KEY_SEPARATOR: &str = "__";

const BUCKET_NAMES: [&str; 5] = [
    "SEGUNDA-FEIRA",
    "TERÇA-FEIRA",
    "QUARTA-FEIRA",
    "QUINTA-FEIRA",
    "SEXTA-FEIRA",
];

/// Read access to the field texts kept outside the tree.
pub trait FieldSource {
    fn field(&self, id: &str) -> Option<&str>;
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    #[serde(rename = "disciplina")]
    pub subject: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "casa")]
    pub homework: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayBucket {
    #[serde(rename = "diaNome")]
    pub name: String,
    #[serde(rename = "aulas")]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    #[serde(rename = "turmaTitulo")]
    pub title: String,
    #[serde(rename = "campoData1")]
    pub start_date: String,
    #[serde(rename = "campoData2")]
    pub end_date: String,
    #[serde(rename = "dias")]
    pub days: Vec<WeekdayBucket>,
}

impl DocumentRecord {
    fn new(title: String, dates: &DateRange) -> Self {
        Self {
            title,
            start_date: dates.start.clone(),
            end_date: dates.end.clone(),
            days: BUCKET_NAMES
                .iter()
                .map(|name| WeekdayBucket {
                    name: name.to_string(),
                    lessons: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn finish(&mut self) {
        for bucket in &mut self.days {
            bucket
                .lessons
                .sort_by(|a, b| collate::compare(&a.subject, &b.subject));
        }
        self.days.retain(|bucket| !bucket.lessons.is_empty());
    }
}

/// The two already formatted dates printed on every document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Monday..Friday → 0..4 by substring match on the Portuguese name.
/// Saturday and unknown labels have no document column.
pub fn weekday_index(label: &str) -> Option<usize> {
    let lower = label.to_lowercase();
    if lower.contains("segunda") {
        Some(0)
    } else if lower.contains("terça") || lower.contains("terca") {
        Some(1)
    } else if lower.contains("quarta") {
        Some(2)
    } else if lower.contains("quinta") {
        Some(3)
    } else if lower.contains("sexta") {
        Some(4)
    } else {
        None
    }
}

pub fn document_key(label: &str, shift: Shift) -> String {
    let raw = base_label(label);
    match shift {
        Shift::Unspecified => raw.to_string(),
        other => format!("{}{}{}", raw, KEY_SEPARATOR, other.code()),
    }
}

/// Splits a key into its base label and shift suffix (empty when absent).
pub fn split_key(key: &str) -> (&str, &str) {
    match key.split_once(KEY_SEPARATOR) {
        Some((base, rest)) => {
            let suffix = rest.split(KEY_SEPARATOR).next().unwrap_or_default();
            (base, suffix)
        }
        None => (key, ""),
    }
}

fn title_for(label: &str, group_shift: Shift, document_shift: Shift) -> String {
    if group_shift == Shift::Both {
        shift_title(label, document_shift)
    } else {
        display_title(label, document_shift)
    }
}

fn value_or_default<F: FieldSource>(values: &F, id: &str, fallback: &str) -> String {
    let text = values.field(id).unwrap_or_default().trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// Builds every class document from `agenda` and the current field texts.
pub fn build_documents<F: FieldSource>(
    agenda: &Agenda,
    values: &F,
    dates: &DateRange,
    fallback: &str,
) -> HashMap<String, DocumentRecord> {
    let mut documents: HashMap<String, DocumentRecord> = HashMap::new();

    for teacher in &agenda.teachers {
        for subject in &teacher.subjects {
            let subject_name = subject.name.to_uppercase();
            for group in &subject.groups {
                let group_shift = normalize_shift(&group.label).shift;
                let mut keys = Vec::with_capacity(2);
                for &document_shift in group_shift.split() {
                    let key = document_key(&group.label, document_shift);
                    documents.entry(key.clone()).or_insert_with(|| {
                        DocumentRecord::new(
                            title_for(&group.label, group_shift, document_shift),
                            dates,
                        )
                    });
                    keys.push(key);
                }

                for day in &group.days {
                    let Some(index) = weekday_index(&day.label) else {
                        tracing::trace!(day = %day.label, group = %group.id, "day has no document column");
                        continue;
                    };
                    let lesson = Lesson {
                        subject: subject_name.clone(),
                        content: value_or_default(values, &day.fields.content_id, fallback),
                        homework: value_or_default(values, &day.fields.homework_id, fallback),
                    };
                    for key in &keys {
                        if let Some(document) = documents.get_mut(key) {
                            document.days[index].lessons.push(lesson.clone());
                        }
                    }
                }
            }
        }
    }

    for document in documents.values_mut() {
        document.finish();
    }
    tracing::debug!(documents = documents.len(), "grouped agenda into documents");
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Weekday;

    struct Builder {
        agenda: Agenda,
        values: HashMap<String, String>,
    }

    impl Builder {
        fn new() -> Self {
            Self {
                agenda: Agenda::new(),
                values: HashMap::new(),
            }
        }

        /// Adds one teacher/subject/group with `(weekday, content, homework)` days.
        fn lessons(mut self, subject: &str, label: &str, days: &[(Weekday, &str, &str)]) -> Self {
            let mut teacher = self.agenda.create_teacher("Teacher");
            let mut subj = self.agenda.create_subject(subject);
            let mut group = self.agenda.create_group(label);
            for (weekday, content, homework) in days {
                let day = self.agenda.create_day(weekday.label());
                self.values
                    .insert(day.fields.content_id.clone(), content.to_string());
                self.values
                    .insert(day.fields.homework_id.clone(), homework.to_string());
                group.days.push(day);
            }
            subj.groups.push(group);
            teacher.subjects.push(subj);
            self.agenda.teachers.push(teacher);
            self
        }

        fn build(&self) -> HashMap<String, DocumentRecord> {
            build_documents(
                &self.agenda,
                &self.values,
                &DateRange::new("01/03/2027", "05/03/2027"),
                DEFAULT_FALLBACK_TEXT,
            )
        }
    }

    #[test]
    fn single_lesson_with_empty_homework_uses_fallback() {
        let docs = Builder::new()
            .lessons("Math", "7º ano TARDE", &[(Weekday::Monday, "Fractions", "")])
            .build();
        let doc = &docs["7º ano TARDE__T"];
        assert_eq!(doc.title, "7º ano TARDE");
        assert_eq!(doc.start_date, "01/03/2027");
        assert_eq!(doc.days.len(), 1);
        assert_eq!(doc.days[0].name, "SEGUNDA-FEIRA");
        assert_eq!(
            doc.days[0].lessons,
            vec![Lesson {
                subject: "MATH".into(),
                content: "Fractions".into(),
                homework: "Não possui".into(),
            }]
        );
    }

    #[test]
    fn both_shifts_duplicate_lessons_into_two_documents() {
        let docs = Builder::new()
            .lessons(
                "Art",
                "9º ano MANHÃ E TARDE",
                &[(Weekday::Tuesday, "Colors", "Draw")],
            )
            .build();
        assert_eq!(docs.len(), 2);
        let morning = &docs["9º ano MANHÃ E TARDE__M"];
        let afternoon = &docs["9º ano MANHÃ E TARDE__T"];
        assert_eq!(morning.days, afternoon.days);
        assert_ne!(morning.title, afternoon.title);
    }

    #[test]
    fn groups_sharing_a_label_share_a_document() {
        let docs = Builder::new()
            .lessons("Português", "6º ano MANHÃ", &[(Weekday::Monday, "Verbos", "p. 12")])
            .lessons("Ciências", "6º ano MANHÃ", &[(Weekday::Monday, "Células", "")])
            .lessons("Artes", "6º ano MANHÃ", &[(Weekday::Friday, "Cores", "")])
            .build();
        assert_eq!(docs.len(), 1);
        let doc = &docs["6º ano MANHÃ__M"];
        assert_eq!(doc.days.len(), 2);
        let monday: Vec<&str> = doc.days[0]
            .lessons
            .iter()
            .map(|l| l.subject.as_str())
            .collect();
        assert_eq!(monday, vec!["CIÊNCIAS", "PORTUGUÊS"]);
        assert_eq!(doc.days[1].name, "SEXTA-FEIRA");
    }

    #[test]
    fn label_without_shift_is_its_own_document() {
        let docs = Builder::new()
            .lessons("Math", "Reforço", &[(Weekday::Wednesday, "Revisão", "")])
            .lessons("Math", "Reforço TARDE", &[(Weekday::Wednesday, "Revisão", "")])
            .build();
        assert!(docs.contains_key("Reforço"));
        assert!(docs.contains_key("Reforço TARDE__T"));
        assert_eq!(docs["Reforço"].title, "Reforço");
    }

    #[test]
    fn saturday_only_group_has_no_buckets() {
        let docs = Builder::new()
            .lessons("Math", "8º ano TARDE", &[(Weekday::Saturday, "Prova", "")])
            .build();
        let doc = &docs["8º ano TARDE__T"];
        assert!(doc.is_empty());
    }

    #[test]
    fn values_are_trimmed() {
        let docs = Builder::new()
            .lessons("Math", "7º ano", &[(Weekday::Thursday, "  Frações  ", "   ")])
            .build();
        let lesson = &docs["7º ano"].days[0].lessons[0];
        assert_eq!(lesson.content, "Frações");
        assert_eq!(lesson.homework, "Não possui");
    }

    #[test]
    fn missing_values_fall_back() {
        let mut builder =
            Builder::new().lessons("Math", "7º ano", &[(Weekday::Monday, "x", "y")]);
        builder.values.clear();
        let docs = build_documents(
            &builder.agenda,
            &builder.values,
            &DateRange::default(),
            "not provided",
        );
        let lesson = &docs["7º ano"].days[0].lessons[0];
        assert_eq!(lesson.content, "not provided");
        assert_eq!(lesson.homework, "not provided");
    }

    #[test]
    fn weekday_index_matches_substrings() {
        assert_eq!(weekday_index("Segunda-Feira"), Some(0));
        assert_eq!(weekday_index("TERÇA"), Some(1));
        assert_eq!(weekday_index("terca-feira"), Some(1));
        assert_eq!(weekday_index("Sexta-Feira"), Some(4));
        assert_eq!(weekday_index("Sábado"), None);
    }

    #[test]
    fn keys_split_back_into_parts() {
        assert_eq!(split_key("7ano__T"), ("7ano", "T"));
        assert_eq!(split_key("SemSerie"), ("SemSerie", ""));
        assert_eq!(document_key("  ", Shift::Unspecified), "Turma");
        assert_eq!(document_key("8 ano", Shift::Morning), "8 ano__M");
    }

    #[test]
    fn payload_uses_template_placeholder_names() {
        let docs = Builder::new()
            .lessons("Math", "7º ano TARDE", &[(Weekday::Monday, "Fractions", "")])
            .build();
        let json = serde_json::to_value(&docs["7º ano TARDE__T"]).unwrap();
        assert_eq!(json["turmaTitulo"], "7º ano TARDE");
        assert_eq!(json["campoData2"], "05/03/2027");
        assert_eq!(json["dias"][0]["diaNome"], "SEGUNDA-FEIRA");
        assert_eq!(json["dias"][0]["aulas"][0]["disciplina"], "MATH");
        assert_eq!(json["dias"][0]["aulas"][0]["casa"], "Não possui");
    }
}
