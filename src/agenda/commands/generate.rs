//! Document generation: group → sort → render → name → package.
//!
//! Output order is the sorted key order. Rendering happens one key at a
//! time; the [`CancelToken`] is checked before each key, and a cancelled run
//! produces nothing. What a render failure does is decided by the
//! [`FailurePolicy`] in the settings.

use crate::archive::{artifact_filename, Artifact, Packager};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::{FailurePolicy, Settings};
use crate::dates::{format_br_date, END_DATE_KEY, START_DATE_KEY};
use crate::error::{AgendaError, Result};
use crate::grouper::{build_documents, DateRange};
use crate::render::DocumentRenderer;
use crate::sorter::sort_keys;
use crate::store::{load_agenda, AgendaStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller flips to stop a running batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub artifacts: Vec<Artifact>,
    /// Keys whose document had no lessons from Monday to Friday.
    pub skipped_empty: Vec<String>,
    pub failures: Vec<RenderFailure>,
    pub archive_path: Option<PathBuf>,
}

/// Renders every document without touching the filesystem.
pub fn render_all<S, R>(
    store: &S,
    settings: &Settings,
    renderer: &R,
    cancel: &CancelToken,
) -> Result<GenerationReport>
where
    S: AgendaStore,
    R: DocumentRenderer,
{
    let agenda = load_agenda(store);
    let values = store.values()?;
    let fallback = settings.fallback_text.as_str();
    let date = |key: &str| format_br_date(values.get(key).map(String::as_str).unwrap_or(""), fallback);
    let dates = DateRange::new(date(START_DATE_KEY), date(END_DATE_KEY));

    let documents = build_documents(&agenda, &values, &dates, fallback);
    let keys = sort_keys(documents.keys().cloned());

    let mut report = GenerationReport::default();
    for key in keys {
        if cancel.is_cancelled() {
            tracing::info!(rendered = report.artifacts.len(), "generation cancelled");
            return Err(AgendaError::Cancelled);
        }
        let Some(document) = documents.get(&key) else {
            continue;
        };
        if settings.skip_empty && document.is_empty() {
            tracing::debug!(key = %key, "skipping document without lessons");
            report.skipped_empty.push(key);
            continue;
        }

        match renderer.render(document) {
            Ok(bytes) => {
                let filename = artifact_filename(&document.title, renderer.extension());
                tracing::debug!(key = %key, file = %filename, bytes = bytes.len(), "rendered document");
                report.artifacts.push(Artifact {
                    key,
                    filename,
                    bytes,
                });
            }
            Err(e) => match settings.on_render_failure {
                FailurePolicy::Abort => {
                    return Err(AgendaError::Render {
                        key,
                        message: e.to_string(),
                    });
                }
                FailurePolicy::Skip => {
                    tracing::warn!(key = %key, error = %e, "document failed to render, skipping");
                    report.failures.push(RenderFailure {
                        key,
                        message: e.to_string(),
                    });
                }
            },
        }
    }
    Ok(report)
}

pub fn run<S, R, P>(
    store: &S,
    settings: &Settings,
    renderer: &R,
    packager: &P,
    out_dir: &Path,
    cancel: &CancelToken,
) -> Result<CmdResult>
where
    S: AgendaStore,
    R: DocumentRenderer,
    P: Packager + ?Sized,
{
    let mut report = render_all(store, settings, renderer, cancel)?;
    let mut result = CmdResult::default();

    for failure in &report.failures {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: {}",
            failure.key, failure.message
        )));
    }

    if report.artifacts.is_empty() {
        result.add_message(CmdMessage::info("No documents to generate."));
        return Ok(result.with_generation(report));
    }

    let bytes = packager.package(&report.artifacts)?;
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(packager.archive_name());
    fs::write(&path, bytes)?;
    tracing::info!(archive = %path.display(), documents = report.artifacts.len(), "wrote archive");

    result.add_message(CmdMessage::success(format!(
        "Generated {} document(s) into {}",
        report.artifacts.len(),
        path.display()
    )));
    report.archive_path = Some(path);
    Ok(result.with_generation(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{read_zip, ZipPackager};
    use crate::grouper::DocumentRecord;
    use crate::model::Weekday;
    use crate::render::TemplateRenderer;
    use crate::store::memory::fixtures::StoreFixture;

    /// Renders the title only, failing for titles containing `poison`.
    struct TitleRenderer {
        poison: &'static str,
    }

    impl DocumentRenderer for TitleRenderer {
        fn render(&self, document: &DocumentRecord) -> Result<Vec<u8>> {
            if document.title.contains(self.poison) {
                return Err(AgendaError::Api(format!("cannot render {}", document.title)));
            }
            Ok(document.title.clone().into_bytes())
        }

        fn extension(&self) -> &str {
            "txt"
        }
    }

    fn school() -> StoreFixture {
        StoreFixture::new()
            .with_class("Ana", "Math", "9º ano TARDE", &[(Weekday::Monday, "Equações", "")])
            .with_class("Bia", "Art", "7º ano MANHÃ E TARDE", &[(Weekday::Tuesday, "Cores", "")])
            .with_class("Caio", "PE", "Reforço", &[(Weekday::Saturday, "Jogo", "")])
            .with_value(START_DATE_KEY, "2027-03-01")
    }

    fn keys(report: &GenerationReport) -> Vec<&str> {
        report.artifacts.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn artifacts_follow_sorted_order() {
        let fixture = school();
        let renderer = TitleRenderer { poison: "never" };
        let report =
            render_all(&fixture.store, &Settings::default(), &renderer, &CancelToken::new())
                .unwrap();
        assert_eq!(
            keys(&report),
            vec![
                "7º ano MANHÃ E TARDE__M",
                "7º ano MANHÃ E TARDE__T",
                "9º ano TARDE__T"
            ]
        );
        assert_eq!(report.skipped_empty, vec!["Reforço".to_string()]);
        assert_eq!(
            report.artifacts[0].filename,
            "Agenda-7º ano MANHÃ E TARDE (MANHÃ).txt"
        );
    }

    #[test]
    fn empty_documents_can_be_kept() {
        let fixture = school();
        let settings = Settings {
            skip_empty: false,
            ..Settings::default()
        };
        let renderer = TitleRenderer { poison: "never" };
        let report = render_all(&fixture.store, &settings, &renderer, &CancelToken::new()).unwrap();
        assert_eq!(report.artifacts.len(), 4);
        assert!(report.skipped_empty.is_empty());
    }

    #[test]
    fn abort_policy_stops_the_batch() {
        let fixture = school();
        let renderer = TitleRenderer { poison: "9º" };
        let err = render_all(&fixture.store, &Settings::default(), &renderer, &CancelToken::new())
            .unwrap_err();
        match err {
            AgendaError::Render { key, .. } => assert_eq!(key, "9º ano TARDE__T"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_policy_records_failures() {
        crate::logging::init_test();
        let fixture = school();
        let settings = Settings {
            on_render_failure: FailurePolicy::Skip,
            ..Settings::default()
        };
        let renderer = TitleRenderer { poison: "(TARDE)" };
        let report = render_all(&fixture.store, &settings, &renderer, &CancelToken::new()).unwrap();
        assert_eq!(
            keys(&report),
            vec!["7º ano MANHÃ E TARDE__M", "9º ano TARDE__T"]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "7º ano MANHÃ E TARDE__T");
    }

    #[test]
    fn cancelled_token_produces_nothing() {
        let fixture = school();
        let cancel = CancelToken::new();
        cancel.cancel();
        let dir = tempfile::tempdir().unwrap();
        let renderer = TitleRenderer { poison: "never" };
        let err = run(
            &fixture.store,
            &Settings::default(),
            &renderer,
            &ZipPackager,
            dir.path(),
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, AgendaError::Cancelled));
        assert!(!dir.path().join("Agendas-Geradas.zip").exists());
    }

    #[test]
    fn run_writes_archive_with_formatted_dates() {
        let fixture = school();
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::builtin("Não possui").unwrap();
        let result = run(
            &fixture.store,
            &Settings::default(),
            &renderer,
            &ZipPackager,
            dir.path(),
            &CancelToken::new(),
        )
        .unwrap();

        let report = result.generation.unwrap();
        let path = report.archive_path.unwrap();
        assert_eq!(path, dir.path().join("Agendas-Geradas.zip"));
        let names: Vec<String> = read_zip(std::fs::read(&path).unwrap())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Agenda-7º ano MANHÃ E TARDE (MANHÃ).txt",
                "Agenda-7º ano MANHÃ E TARDE (TARDE).txt",
                "Agenda-9º ano TARDE.txt",
            ]
        );

        let text = String::from_utf8(report.artifacts[2].bytes.clone()).unwrap();
        assert!(text.contains("Semana de 01/03/2027 a Não possui"));
        assert!(text.contains("* MATH"));
    }

    #[test]
    fn nothing_to_generate_writes_nothing() {
        let fixture = StoreFixture::new();
        let dir = tempfile::tempdir().unwrap();
        let renderer = TitleRenderer { poison: "never" };
        let result = run(
            &fixture.store,
            &Settings::default(),
            &renderer,
            &ZipPackager,
            dir.path(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "No documents to generate.");
        assert!(result.generation.unwrap().archive_path.is_none());
    }
}
