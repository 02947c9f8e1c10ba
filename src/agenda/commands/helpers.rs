use crate::commands::CmdMessage;
use crate::error::{AgendaError, Result};
use crate::model::{Group, Subject, Teacher};

/// Trimmed `input`, or a validation error naming `what` when blank.
pub fn required(input: &str, what: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AgendaError::validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

pub fn teacher_miss(teacher_id: &str) -> CmdMessage {
    CmdMessage::info(format!("No teacher {}; nothing changed", teacher_id))
}

pub fn subject_miss(teacher_id: &str, subject_id: &str) -> CmdMessage {
    CmdMessage::info(format!(
        "No subject {} under {}; nothing changed",
        subject_id, teacher_id
    ))
}

pub fn group_miss(teacher_id: &str, subject_id: &str, group_id: &str) -> CmdMessage {
    CmdMessage::info(format!(
        "No group {} under {} > {}; nothing changed",
        group_id, teacher_id, subject_id
    ))
}

pub fn find_subject_mut<'a>(
    teachers: &'a mut [Teacher],
    teacher_id: &str,
    subject_id: &str,
) -> std::result::Result<&'a mut Subject, CmdMessage> {
    let teacher = teachers
        .iter_mut()
        .find(|t| t.id == teacher_id)
        .ok_or_else(|| teacher_miss(teacher_id))?;
    teacher
        .find_subject_mut(subject_id)
        .ok_or_else(|| subject_miss(teacher_id, subject_id))
}

/// Walks teacher → subject → group; a miss at any level comes back as the
/// message to show instead.
pub fn find_group_mut<'a>(
    teachers: &'a mut [Teacher],
    teacher_id: &str,
    subject_id: &str,
    group_id: &str,
) -> std::result::Result<&'a mut Group, CmdMessage> {
    let subject = find_subject_mut(teachers, teacher_id, subject_id)?;
    subject
        .find_group_mut(group_id)
        .ok_or_else(|| group_miss(teacher_id, subject_id, group_id))
}
