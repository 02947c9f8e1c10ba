//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! agenda operation, whatever UI sits on top.
//!
//! The facade dispatches to `commands/*.rs`, resolves settings into concrete
//! collaborators (renderer, packager, output directory) and returns
//! `Result<CmdResult>`. It does no printing and holds no business logic.
//!
//! `AgendaApi<S: AgendaStore>` is generic over storage:
//! - Production: `AgendaApi<FileStore>`
//! - Testing: `AgendaApi<InMemoryStore>`

use crate::archive::packager_for;
use crate::commands;
use crate::commands::fields::DateSlot;
use crate::commands::generate::CancelToken;
use crate::config::{FailurePolicy, Settings};
use crate::error::Result;
use crate::model::Weekday;
use crate::render::TemplateRenderer;
use crate::store::AgendaStore;
use std::path::PathBuf;

/// Per-run overrides for `generate`; unset fields fall back to the settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub out_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub skip_failures: bool,
}

pub struct AgendaApi<S: AgendaStore> {
    store: S,
    paths: commands::AgendaPaths,
}

impl<S: AgendaStore> AgendaApi<S> {
    pub fn new(store: S, paths: commands::AgendaPaths) -> Self {
        Self { store, paths }
    }

    pub fn add_teacher(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::teachers::add(&mut self.store, name)
    }

    pub fn rename_teacher(&mut self, teacher_id: &str, name: &str) -> Result<commands::CmdResult> {
        commands::teachers::rename(&mut self.store, teacher_id, name)
    }

    pub fn remove_teacher(&mut self, teacher_id: &str) -> Result<commands::CmdResult> {
        commands::teachers::remove(&mut self.store, teacher_id)
    }

    pub fn mark_teacher(&mut self, teacher_id: &str, present: bool) -> Result<commands::CmdResult> {
        commands::teachers::set_present(&mut self.store, teacher_id, present)
    }

    pub fn missing_teachers(&self) -> Result<commands::CmdResult> {
        commands::teachers::missing(&self.store)
    }

    pub fn add_subject(&mut self, teacher_id: &str, name: &str) -> Result<commands::CmdResult> {
        commands::subjects::add(&mut self.store, teacher_id, name)
    }

    pub fn rename_subject(
        &mut self,
        teacher_id: &str,
        subject_id: &str,
        name: &str,
    ) -> Result<commands::CmdResult> {
        commands::subjects::rename(&mut self.store, teacher_id, subject_id, name)
    }

    pub fn remove_subject(&mut self, teacher_id: &str, subject_id: &str) -> Result<commands::CmdResult> {
        commands::subjects::remove(&mut self.store, teacher_id, subject_id)
    }

    pub fn add_group(
        &mut self,
        teacher_id: &str,
        subject_id: &str,
        label: &str,
        days: &[Weekday],
    ) -> Result<commands::CmdResult> {
        commands::groups::add(&mut self.store, teacher_id, subject_id, label, days)
    }

    pub fn rename_group(
        &mut self,
        teacher_id: &str,
        subject_id: &str,
        group_id: &str,
        label: &str,
    ) -> Result<commands::CmdResult> {
        commands::groups::rename(&mut self.store, teacher_id, subject_id, group_id, label)
    }

    pub fn remove_group(
        &mut self,
        teacher_id: &str,
        subject_id: &str,
        group_id: &str,
    ) -> Result<commands::CmdResult> {
        commands::groups::remove(&mut self.store, teacher_id, subject_id, group_id)
    }

    pub fn set_group_day(
        &mut self,
        teacher_id: &str,
        subject_id: &str,
        group_id: &str,
        day: Weekday,
        enabled: bool,
    ) -> Result<commands::CmdResult> {
        commands::groups::set_day(&mut self.store, teacher_id, subject_id, group_id, day, enabled)
    }

    pub fn set_field(&mut self, field_id: &str, text: &str) -> Result<commands::CmdResult> {
        commands::fields::set_field(&mut self.store, field_id, text)
    }

    pub fn set_date(&mut self, slot: DateSlot, input: &str) -> Result<commands::CmdResult> {
        commands::fields::set_date(&mut self.store, slot, input)
    }

    pub fn clear_fields(&mut self) -> Result<commands::CmdResult> {
        commands::fields::clear(&mut self.store)
    }

    pub fn show(&self) -> Result<commands::CmdResult> {
        commands::view::run(&self.store)
    }

    pub fn field_report(&self) -> Result<commands::CmdResult> {
        commands::report::run(&self.store)
    }

    pub fn generate(
        &self,
        options: &GenerateOptions,
        cancel: &CancelToken,
    ) -> Result<commands::CmdResult> {
        let mut settings = Settings::load(&self.paths.data_dir)?;
        if options.skip_failures {
            settings.on_render_failure = FailurePolicy::Skip;
        }
        let template = options.template.as_ref().or(settings.template.as_ref());
        let renderer = match template {
            Some(path) => TemplateRenderer::from_file(path, &settings.fallback_text)?,
            None => TemplateRenderer::builtin(&settings.fallback_text)?,
        };
        let out_dir = options
            .out_dir
            .clone()
            .or_else(|| settings.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        commands::generate::run(
            &self.store,
            &settings,
            &renderer,
            packager_for(settings.archive_format),
            &out_dir,
            cancel,
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{AgendaPaths, CmdMessage, CmdResult, MessageLevel};
