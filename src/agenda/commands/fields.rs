use crate::commands::{CmdMessage, CmdResult};
use crate::dates::{parse_iso_date, END_DATE_KEY, START_DATE_KEY};
use crate::error::{AgendaError, Result};
use crate::store::{load_agenda, AgendaStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSlot {
    Start,
    End,
}

impl DateSlot {
    pub fn key(&self) -> &'static str {
        match self {
            DateSlot::Start => START_DATE_KEY,
            DateSlot::End => END_DATE_KEY,
        }
    }
}

/// Stores the text typed for one lesson field. Only ids present in the
/// agenda are accepted.
pub fn set_field<S: AgendaStore>(store: &mut S, field_id: &str, text: &str) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let mut result = CmdResult::default();
    if !agenda.field_ids().contains(&field_id) {
        result.add_message(CmdMessage::info(format!(
            "No field {}; nothing changed",
            field_id
        )));
        return Ok(result);
    }
    store.set_value(field_id, text)?;
    result.add_message(CmdMessage::success(format!("{} updated", field_id)));
    Ok(result)
}

/// Stores a week date as `YYYY-MM-DD`; blank input clears it.
pub fn set_date<S: AgendaStore>(store: &mut S, slot: DateSlot, input: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let input = input.trim();
    if input.is_empty() {
        store.remove_value(slot.key())?;
        result.add_message(CmdMessage::success(format!("{} cleared", slot.key())));
        return Ok(result);
    }
    let date = parse_iso_date(input).ok_or_else(|| {
        AgendaError::validation(format!("Dates must be YYYY-MM-DD, got {}", input))
    })?;
    store.set_value(slot.key(), &date.format("%Y-%m-%d").to_string())?;
    result.add_message(CmdMessage::success(format!("{} set to {}", slot.key(), date)));
    Ok(result)
}

/// Wipes every lesson text, delivery check and week date. The agenda
/// structure itself is left alone.
pub fn clear<S: AgendaStore>(store: &mut S) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let mut keys: Vec<String> = agenda.field_ids().into_iter().map(String::from).collect();
    keys.extend(agenda.teachers.iter().map(|t| t.checkbox_key()));
    keys.push(START_DATE_KEY.to_string());
    keys.push(END_DATE_KEY.to_string());

    for key in &keys {
        store.remove_value(key)?;
    }
    tracing::info!(keys = keys.len(), "cleared agenda values");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Fields cleared."));
    Ok(result)
}
