use super::AgendaStore;
use crate::error::{AgendaError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const SNAPSHOT_FILENAME: &str = "agenda-config-v2.json";
pub const VALUES_FILENAME: &str = "values.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AgendaError::Io)?;
        }
        Ok(())
    }

    fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILENAME)
    }

    fn values_path(&self) -> PathBuf {
        self.root.join(VALUES_FILENAME)
    }

    fn load_values(&self) -> Result<BTreeMap<String, String>> {
        let path = self.values_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(AgendaError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| AgendaError::Store(format!("{} is unreadable: {}", path.display(), e)))
    }

    fn save_values(&self, values: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(values).map_err(AgendaError::Serialization)?;
        fs::write(self.values_path(), content).map_err(AgendaError::Io)?;
        Ok(())
    }
}

impl AgendaStore for FileStore {
    fn read_snapshot(&self) -> Result<Option<String>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path).map_err(AgendaError::Io)?;
        Ok(Some(raw))
    }

    fn write_snapshot(&mut self, raw: &str) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.snapshot_path(), raw).map_err(AgendaError::Io)?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_values()?.remove(key))
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load_values()?;
        values.insert(key.to_string(), value.to_string());
        self.save_values(&values)
    }

    fn remove_value(&mut self, key: &str) -> Result<()> {
        let mut values = self.load_values()?;
        if values.remove(key).is_some() {
            self.save_values(&values)?;
        }
        Ok(())
    }

    fn values(&self) -> Result<BTreeMap<String, String>> {
        self.load_values()
    }
}
