use crate::config::Settings;
use crate::error::Result;
use crate::model::{Agenda, Teacher};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub mod config;
pub mod fields;
pub mod generate;
pub mod groups;
pub mod helpers;
pub mod init;
pub mod report;
pub mod subjects;
pub mod teachers;
pub mod view;

#[derive(Debug, Clone)]
pub struct AgendaPaths {
    pub data_dir: PathBuf,
}

impl AgendaPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn ensure_data_dir(&self) -> Result<&PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(&self.data_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Ids created by the command (teacher, subject or group).
    pub created_ids: Vec<String>,
    pub agenda: Option<Agenda>,
    pub values: BTreeMap<String, String>,
    pub listed_teachers: Vec<Teacher>,
    pub report_lines: Vec<String>,
    pub settings: Option<Settings>,
    pub generation: Option<generate::GenerationReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_created_id(mut self, id: impl Into<String>) -> Self {
        self.created_ids.push(id.into());
        self
    }

    pub fn with_agenda(mut self, agenda: Agenda, values: BTreeMap<String, String>) -> Self {
        self.agenda = Some(agenda);
        self.values = values;
        self
    }

    pub fn with_listed_teachers(mut self, teachers: Vec<Teacher>) -> Self {
        self.listed_teachers = teachers;
        self
    }

    pub fn with_report_lines(mut self, lines: Vec<String>) -> Self {
        self.report_lines = lines;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_generation(mut self, report: generate::GenerationReport) -> Self {
        self.generation = Some(report);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
