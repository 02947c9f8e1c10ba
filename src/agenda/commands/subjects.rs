use crate::commands::helpers::{find_subject_mut, required, subject_miss, teacher_miss};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{name_or_placeholder, DEFAULT_SUBJECT_NAME};
use crate::store::{load_agenda, save_agenda, AgendaStore};

pub fn add<S: AgendaStore>(store: &mut S, teacher_id: &str, name: &str) -> Result<CmdResult> {
    let name = required(name, "Subject name")?;
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    if agenda.find_teacher(teacher_id).is_none() {
        result.add_message(teacher_miss(teacher_id));
        return Ok(result);
    }

    let subject = agenda.create_subject(&name);
    let id = subject.id.clone();
    if let Some(teacher) = agenda.find_teacher_mut(teacher_id) {
        teacher.subjects.push(subject);
    }
    save_agenda(store, &agenda)?;

    result.add_message(CmdMessage::success(format!(
        "Subject added ({}): {}",
        id, name
    )));
    Ok(result.with_created_id(id))
}

pub fn rename<S: AgendaStore>(
    store: &mut S,
    teacher_id: &str,
    subject_id: &str,
    name: &str,
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
    subject.name = name_or_placeholder(name, DEFAULT_SUBJECT_NAME);
    let message = format!("Subject renamed ({}): {}", subject.id, subject.name);
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

pub fn remove<S: AgendaStore>(store: &mut S, teacher_id: &str, subject_id: &str) -> Result<CmdResult> {
    let mut agenda = load_agenda(store);
    let mut result = CmdResult::default();
    let Some(teacher) = agenda.find_teacher_mut(teacher_id) else {
        result.add_message(teacher_miss(teacher_id));
        return Ok(result);
    };
    if !teacher.remove_subject(subject_id) {
        result.add_message(subject_miss(teacher_id, subject_id));
        return Ok(result);
    }
    save_agenda(store, &agenda)?;
    result.add_message(CmdMessage::success(format!("Subject removed: {}", subject_id)));
    Ok(result)
}
