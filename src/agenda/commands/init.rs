use crate::commands::{AgendaPaths, CmdMessage, CmdResult};
use crate::config::Settings;
use crate::error::Result;

/// Creates the data directory and writes default settings when none exist.
pub fn run(paths: &AgendaPaths) -> Result<CmdResult> {
    let dir = paths.ensure_data_dir()?;
    let settings = Settings::load(dir)?;
    settings.save(dir)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized agenda store at {}",
        dir.display()
    )));
    Ok(result)
}
