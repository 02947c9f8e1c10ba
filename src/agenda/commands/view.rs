use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{load_agenda, AgendaStore};

pub fn run<S: AgendaStore>(store: &S) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let values = store.values()?;
    Ok(CmdResult::default().with_agenda(agenda, values))
}
