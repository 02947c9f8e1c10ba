use crate::commands::helpers::{required, teacher_miss};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{name_or_placeholder, DEFAULT_TEACHER_NAME};
use crate::store::{load_agenda, save_agenda, AgendaStore};

const PRESENT: &str = "true";

pub fn add<S: AgendaStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let name = required(name, "Teacher name")?;
    let mut agenda = load_agenda(store);
    let teacher = agenda.create_teacher(&name);
    let id = teacher.id.clone();
    agenda.teachers.push(teacher);
    save_agenda(store, &agenda)?;

    let mut result = CmdResult::default().with_created_id(&id);
    result.add_message(CmdMessage::success(format!("Teacher added ({}): {}", id, name)));
    Ok(result)
}

pub fn rename<S: AgendaStore>(store: &mut S, teacher_id: &str, name: &str) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let Some(teacher) = agenda.find_teacher_mut(teacher_id) else {
        result.add_message(teacher_miss(teacher_id));
        return Ok(result);
    };
    teacher.name = name_or_placeholder(name, DEFAULT_TEACHER_NAME);
    let message = format!("Teacher renamed ({}): {}", teacher.id, teacher.name);
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

pub fn remove<S: AgendaStore>(store: &mut S, teacher_id: &str) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    if !agenda.remove_teacher(teacher_id) {
        result.add_message(teacher_miss(teacher_id));
        return Ok(result);
    }
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(format!("Teacher removed: {}", teacher_id)));
    Ok(result)
}

/// Marks whether the teacher handed in this week's agenda.
pub fn set_present<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    present: bool,
) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let Some(teacher) = agenda.find_teacher(teacher_id) else {
        result.add_message(teacher_miss(teacher_id));
        return Ok(result);
    };
    let key = teacher.checkbox_key();
    store.set_value(&key, if present { PRESENT } else { "false" })?;
    result.add_message(CmdMessage::success(format!(
        "{} marked as {}",
        teacher.display_name(),
        if present { "delivered" } else { "missing" }
    )));
    Ok(result)
}

/// Teachers whose agenda has not been marked as delivered.
pub fn missing<S: AgendaStore>(store: &S) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let values = store.values()?;
    let missing = agenda
        .teachers
        .into_iter()
        .filter(|t| values.get(&t.checkbox_key()).map(String::as_str) != Some(PRESENT))
        .collect::<Vec<_>>();

    let mut result = CmdResult::default();
    if missing.is_empty() {
        result.add_message(CmdMessage::info("No teachers missing."));
    }
    Ok(result.with_listed_teachers(missing))
}
