use crate::error::{AgendaError, Result};
use crate::grouper::DEFAULT_FALLBACK_TEXT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SETTINGS_FILENAME: &str = "settings.json";

/// What a batch does when one document fails to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure and produce nothing.
    #[default]
    Abort,
    /// Leave the failing class out and keep going.
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            other => Err(format!("Unknown failure policy: {} (use abort or skip)", other)),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Abort => f.write_str("abort"),
            FailurePolicy::Skip => f.write_str("skip"),
        }
    }
}

/// Container for the generated batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveFormat {
    #[default]
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            other => Err(format!("Unknown archive format: {} (use zip or tar.gz)", other)),
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveFormat::Zip => f.write_str("zip"),
            ArchiveFormat::TarGz => f.write_str("tar.gz"),
        }
    }
}

/// User settings, stored in `settings.json` next to the agenda data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Template used for every document; the built-in one when unset.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Printed for empty lesson fields, dates and unresolved placeholders.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,

    #[serde(default)]
    pub on_render_failure: FailurePolicy,

    /// Classes whose document has no weekday left are not generated.
    #[serde(default = "default_skip_empty")]
    pub skip_empty: bool,

    /// Where `generate` writes the archive; current directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub archive_format: ArchiveFormat,
}

fn default_fallback_text() -> String {
    DEFAULT_FALLBACK_TEXT.to_string()
}

fn default_skip_empty() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: None,
            fallback_text: default_fallback_text(),
            on_render_failure: FailurePolicy::default(),
            skip_empty: default_skip_empty(),
            output_dir: None,
            archive_format: ArchiveFormat::default(),
        }
    }
}

pub const SETTING_KEYS: &[&str] = &[
    "template",
    "fallback-text",
    "on-render-failure",
    "skip-empty",
    "output-dir",
    "archive-format",
];

impl Settings {
    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILENAME);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(AgendaError::Io)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(AgendaError::Serialization)?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(AgendaError::Io)?;
        }

        let path = dir.join(SETTINGS_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AgendaError::Serialization)?;
        fs::write(path, content).map_err(AgendaError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let shown = match key {
            "template" => display_path(&self.template),
            "fallback-text" => self.fallback_text.clone(),
            "on-render-failure" => self.on_render_failure.to_string(),
            "skip-empty" => self.skip_empty.to_string(),
            "output-dir" => display_path(&self.output_dir),
            "archive-format" => self.archive_format.to_string(),
            _ => return None,
        };
        Some(shown)
    }

    /// Sets `key` from user text. An empty value resets optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "template" => self.template = optional_path(value),
            "fallback-text" => {
                if value.is_empty() {
                    return Err("fallback-text cannot be empty".to_string());
                }
                self.fallback_text = value.to_string();
            }
            "on-render-failure" => self.on_render_failure = value.parse()?,
            "skip-empty" => {
                self.skip_empty = value
                    .parse()
                    .map_err(|_| format!("skip-empty expects true or false, got {}", value))?
            }
            "output-dir" => self.output_dir = optional_path(value),
            "archive-format" => self.archive_format = value.parse()?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        SETTING_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (*key, v)))
            .collect()
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
