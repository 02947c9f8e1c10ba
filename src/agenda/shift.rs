//! Reading grade and shift out of a free-text class label.
//!
//! Labels are typed by hand ("7º ano TARDE", "8 ano manha", "Reforço"), so
//! parsing is a best-effort match that never fails: a label with no
//! recognisable grade or shift simply yields `None` / [`Shift::Unspecified`].

use crate::collate::fold;
use crate::model::DEFAULT_GROUP_LABEL;
use once_cell::sync::Lazy;
use regex::Regex;

static GRADE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s)([6-9])\s*[º°ªo]?\.?\s*ano").expect("valid grade regex")
});

const MORNING_TOKEN: &str = "manha";
const AFTERNOON_TOKEN: &str = "tarde";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Morning,
    Afternoon,
    Both,
    Unspecified,
}

impl Shift {
    pub fn code(&self) -> &'static str {
        match self {
            Shift::Morning => "M",
            Shift::Afternoon => "T",
            Shift::Both => "MT",
            Shift::Unspecified => "",
        }
    }

    /// Word used when a title needs the shift spelled out.
    pub fn word(&self) -> Option<&'static str> {
        match self {
            Shift::Morning => Some("MANHÃ"),
            Shift::Afternoon => Some("TARDE"),
            Shift::Both | Shift::Unspecified => None,
        }
    }

    /// The single-shift documents a label of this shift feeds.
    pub fn split(&self) -> &'static [Shift] {
        match self {
            Shift::Morning => &[Shift::Morning],
            Shift::Afternoon => &[Shift::Afternoon],
            Shift::Both => &[Shift::Morning, Shift::Afternoon],
            Shift::Unspecified => &[Shift::Unspecified],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftInfo {
    pub grade: Option<u8>,
    pub shift: Shift,
}

pub fn normalize_shift(label: &str) -> ShiftInfo {
    ShiftInfo {
        grade: parse_grade(label),
        shift: detect_shift(label),
    }
}

fn parse_grade(label: &str) -> Option<u8> {
    GRADE_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn detect_shift(label: &str) -> Shift {
    let folded = fold(label);
    match (
        folded.contains(MORNING_TOKEN),
        folded.contains(AFTERNOON_TOKEN),
    ) {
        (true, true) => Shift::Both,
        (true, false) => Shift::Morning,
        (false, true) => Shift::Afternoon,
        (false, false) => Shift::Unspecified,
    }
}

/// Trimmed label, or the group placeholder when blank.
pub fn base_label(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_GROUP_LABEL
    } else {
        trimmed
    }
}

/// Document title for a single-shift or unspecified group.
///
/// The shift word is appended in parentheses unless the label already
/// mentions it. [`Shift::Both`] returns the bare label; callers split such
/// groups into one title per shift with [`shift_title`].
pub fn display_title(label: &str, shift: Shift) -> String {
    let raw = base_label(label);
    match shift {
        Shift::Morning | Shift::Afternoon => {
            let token = if shift == Shift::Morning {
                MORNING_TOKEN
            } else {
                AFTERNOON_TOKEN
            };
            if fold(raw).contains(token) {
                raw.to_string()
            } else {
                shift_title(raw, shift)
            }
        }
        Shift::Both | Shift::Unspecified => raw.to_string(),
    }
}

/// `label (MANHÃ)` / `label (TARDE)`, unconditionally.
pub fn shift_title(label: &str, shift: Shift) -> String {
    let raw = base_label(label);
    match shift.word() {
        Some(word) => format!("{} ({})", raw, word),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morning_with_ordinal_grade() {
        let info = normalize_shift("7º ano MANHÃ");
        assert_eq!(info.grade, Some(7));
        assert_eq!(info.shift, Shift::Morning);
        assert_eq!(info.shift.code(), "M");
    }

    #[test]
    fn afternoon_without_ordinal() {
        let info = normalize_shift("8 ano TARDE");
        assert_eq!(info.grade, Some(8));
        assert_eq!(info.shift.code(), "T");
    }

    #[test]
    fn free_text_label_has_nothing() {
        let info = normalize_shift("Reforço");
        assert_eq!(info.grade, None);
        assert_eq!(info.shift, Shift::Unspecified);
        assert_eq!(info.shift.code(), "");
    }

    #[test]
    fn both_shifts() {
        let info = normalize_shift("9º ano MANHÃ E TARDE");
        assert_eq!(info.grade, Some(9));
        assert_eq!(info.shift.code(), "MT");
    }

    #[test]
    fn shift_matching_ignores_case_and_accent() {
        assert_eq!(normalize_shift("6o ano manha").shift, Shift::Morning);
        assert_eq!(normalize_shift("6o ano Manhã").shift, Shift::Morning);
        assert_eq!(normalize_shift("turma da tarde").shift, Shift::Afternoon);
    }

    #[test]
    fn grade_outside_range_or_glued_to_text_is_ignored() {
        assert_eq!(normalize_shift("5º ano TARDE").grade, None);
        assert_eq!(normalize_shift("17 ano").grade, None);
        assert_eq!(normalize_shift("7ano").grade, Some(7));
        assert_eq!(normalize_shift("Turma 8º Ano").grade, Some(8));
    }

    #[test]
    fn display_title_appends_missing_shift() {
        assert_eq!(display_title("7º ano", Shift::Afternoon), "7º ano (TARDE)");
        assert_eq!(display_title("7º ano TARDE", Shift::Afternoon), "7º ano TARDE");
        assert_eq!(display_title("8 ano manha", Shift::Morning), "8 ano manha");
        assert_eq!(display_title("  Reforço ", Shift::Unspecified), "Reforço");
        assert_eq!(display_title("", Shift::Unspecified), "Turma");
    }

    #[test]
    fn both_shift_titles_are_distinct() {
        let label = "9º ano MANHÃ E TARDE";
        assert_eq!(display_title(label, Shift::Both), label);
        assert_eq!(shift_title(label, Shift::Morning), "9º ano MANHÃ E TARDE (MANHÃ)");
        assert_eq!(shift_title(label, Shift::Afternoon), "9º ano MANHÃ E TARDE (TARDE)");
    }
}
