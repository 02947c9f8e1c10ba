use crate::commands::{AgendaPaths, CmdMessage, CmdResult};
use crate::config::Settings;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &AgendaPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let settings = Settings::load(dir)?;
            Ok(CmdResult::default().with_settings(settings))
        }
        ConfigAction::ShowKey(key) => {
            let settings = Settings::load(dir)?;
            let mut result = CmdResult::default();
            match settings.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut settings = Settings::load(dir)?;
            if let Err(e) = settings.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            settings.save(dir)?;
            let shown = settings.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_settings(settings);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::FailurePolicy;

    #[test]
    fn set_then_show_key() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AgendaPaths::new(dir.path().to_path_buf());

        let set = run(
            &paths,
            ConfigAction::Set("on-render-failure".into(), "skip".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Success);
        assert_eq!(
            set.settings.unwrap().on_render_failure,
            FailurePolicy::Skip
        );

        let shown = run(&paths, ConfigAction::ShowKey("on-render-failure".into())).unwrap();
        assert_eq!(shown.messages[0].content, "skip");
    }

    #[test]
    fn bad_values_are_reported_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AgendaPaths::new(dir.path().to_path_buf());
        let result = run(&paths, ConfigAction::Set("skip-empty".into(), "often".into())).unwrap();
        assert!(result.has_errors());
        assert!(!dir.path().join("settings.json").exists());

        let unknown = run(&paths, ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(unknown.has_errors());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AgendaPaths::new(dir.path().to_path_buf());
        let result = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.settings, Some(Settings::default()));
    }
}
