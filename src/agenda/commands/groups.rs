use crate::commands::helpers::{find_group_mut, find_subject_mut, group_miss, required};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AgendaError, Result};
use crate::model::{name_or_placeholder, Weekday, DEFAULT_GROUP_LABEL};
use crate::store::{load_agenda, save_agenda, AgendaStore};

/// Adds a class group with its weekdays. At least one weekday is required.
pub fn add<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    subject_id: &str,
    label: &str,
    days: &[Weekday],
) -> Result<CmdResult> {
    let label = required(label, "Group label")?;
    if days.is_empty() {
        return Err(AgendaError::validation("Select at least one weekday"));
    }

    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    if let Err(miss) = find_subject_mut(&mut agenda.teachers, teacher_id, subject_id) {
        result.add_message(miss);
        return Ok(result);
    }

    let mut group = agenda.create_group(&label);
    let (meta, teachers) = agenda.parts_mut();
    for day in days {
        group.ensure_day(meta, day.label());
    }
    let id = group.id.clone();
    if let Ok(subject) = find_subject_mut(teachers, teacher_id, subject_id) {
        subject.groups.push(group);
    }
    save_agenda(store, &agenda)?;

    result.add_message(CmdMessage::success(format!("Group added ({}): {}", id, label)));
    Ok(result.with_created_id(id))
}

pub fn rename<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    subject_id: &str,
    group_id: &str,
    label: &str,
) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let group = match find_group_mut(&mut agenda.teachers, teacher_id, subject_id, group_id) {
        Ok(group) => group,
        Err(miss) => {
            result.add_message(miss);
            return Ok(result);
        }
    };
    group.label = name_or_placeholder(label, DEFAULT_GROUP_LABEL);
    let message = format!("Group renamed ({}): {}", group.id, group.label);
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

pub fn remove<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    subject_id: &str,
    group_id: &str,
) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let subject = match find_subject_mut(&mut agenda.teachers, teacher_id, subject_id) {
        Ok(subject) => subject,
        Err(miss) => {
            result.add_message(miss);
            return Ok(result);
        }
    };
    if !subject.remove_group(group_id) {
        result.add_message(group_miss(teacher_id, subject_id, group_id));
        return Ok(result);
    }
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(format!("Group removed: {}", group_id)));
    Ok(result)
}

/// Turns one weekday on or off for a group. Turning a day back on gives it
/// fresh field ids; the old texts stay orphaned in the value store.
pub fn set_day<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    subject_id: &str,
    group_id: &str,
    day: Weekday,
    enabled: bool,
) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let (meta, teachers) = agenda.parts_mut();
    let group = match find_group_mut(teachers, teacher_id, subject_id, group_id) {
        Ok(group) => group,
        Err(miss) => {
            result.add_message(miss);
            return Ok(result);
        }
    };

    let changed = if enabled {
        let had = group.has_day(day.label());
        group.ensure_day(meta, day.label());
        !had
    } else {
        group.remove_day(day.label())
    };
    let group_label = group.display_label().to_string();

    if changed {
        save_agenda(store, &agenda)?;
        result.add_message(CmdMessage::success(format!(
            "{} {} for {}",
            day.short(),
            if enabled { "enabled" } else { "disabled" },
            group_label
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} already {} for {}",
            day.short(),
            if enabled { "enabled" } else { "disabled" },
            group_label
        )));
    }
    Ok(result)
}
