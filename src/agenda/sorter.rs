//! Output order for generated documents: grade, then shift, then label.

use crate::collate;
use crate::grouper::split_key;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits regex"));

/// Keys without a number in their label sort after every real grade.
const NO_GRADE: u64 = u64::MAX;

struct SortKey<'a> {
    grade: u64,
    shift_rank: u8,
    base: &'a str,
    raw: &'a str,
}

impl<'a> SortKey<'a> {
    fn new(key: &'a str) -> Self {
        let (base, suffix) = split_key(key);
        let grade = DIGITS_RE
            .find(base)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(NO_GRADE);
        let shift_rank = match suffix.to_uppercase().as_str() {
            "M" => 0,
            "T" => 1,
            _ => 2,
        };
        Self {
            grade,
            shift_rank,
            base,
            raw: key,
        }
    }
}

pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let a = SortKey::new(a);
    let b = SortKey::new(b);
    a.grade
        .cmp(&b.grade)
        .then(a.shift_rank.cmp(&b.shift_rank))
        .then_with(|| collate::compare(a.base, b.base))
        .then_with(|| collate::compare(a.raw, b.raw))
}

pub fn sort_keys<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys
}
