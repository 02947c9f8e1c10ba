//! Turning a [`DocumentRecord`] into file bytes.
//!
//! The generation pipeline only needs the [`DocumentRenderer`] contract. The
//! bundled [`TemplateRenderer`] uses minijinja with the `{{ }}` placeholders
//! the agenda templates are written with; any placeholder that does not
//! resolve prints the fallback text instead of an empty string.
//!
//! A template is either plain text or a `.docx` package. For a package, the
//! XML of the body, headers and footers is rendered with XML escaping and
//! every other part is copied through unchanged. Word splits text into runs
//! freely, so each placeholder must sit inside a single run.

use crate::archive::{read_zip, write_zip};
use crate::error::{AgendaError, Result};
use crate::grouper::DocumentRecord;
use minijinja::value::Value;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const TEMPLATE_NAME: &str = "agenda";
const DEFAULT_EXTENSION: &str = "txt";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCUMENT_PART: &str = "word/document.xml";

pub const DEFAULT_TEMPLATE: &str = r#"AGENDA - {{ turmaTitulo }}
Semana de {{ campoData1 }} a {{ campoData2 }}
{% for dia in dias %}

{{ dia.diaNome }}
{% for aula in dia.aulas %}
* {{ aula.disciplina }}
  Conteúdo: {{ aula.conteudo }}
  Para casa: {{ aula.casa }}
{% endfor %}
{% endfor %}
"#;

pub trait DocumentRenderer {
    fn render(&self, document: &DocumentRecord) -> Result<Vec<u8>>;

    /// File extension of the produced artifacts, without the dot.
    fn extension(&self) -> &str;
}

/// One entry of a package template. `raw` is `None` for the parts rendered
/// as templates, which are registered under their entry name.
struct PackagePart {
    name: String,
    raw: Option<Vec<u8>>,
}

enum Layout {
    Text,
    Package(Vec<PackagePart>),
}

pub struct TemplateRenderer {
    env: Environment<'static>,
    layout: Layout,
    extension: String,
}

impl TemplateRenderer {
    pub fn new(source: impl Into<String>, extension: &str, fallback: &str) -> Result<Self> {
        let mut env = environment(fallback);
        env.add_template_owned(TEMPLATE_NAME, source.into())?;

        Ok(Self {
            env,
            layout: Layout::Text,
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    pub fn builtin(fallback: &str) -> Result<Self> {
        Self::new(DEFAULT_TEMPLATE, DEFAULT_EXTENSION, fallback)
    }

    /// Builds a renderer from the bytes of a `.docx` package.
    pub fn from_package(bytes: Vec<u8>, extension: &str, fallback: &str) -> Result<Self> {
        let mut env = environment(fallback);
        let mut parts = Vec::new();
        for (name, body) in read_zip(bytes)? {
            if !is_templated_part(&name) {
                parts.push(PackagePart {
                    name,
                    raw: Some(body),
                });
                continue;
            }
            let source = String::from_utf8(body)
                .map_err(|_| AgendaError::validation(format!("Template part {} is not UTF-8", name)))?;
            env.add_template_owned(name.clone(), source)?;
            parts.push(PackagePart { name, raw: None });
        }

        if !parts.iter().any(|p| p.name == DOCUMENT_PART) {
            return Err(AgendaError::validation(format!(
                "Template package has no {}",
                DOCUMENT_PART
            )));
        }

        Ok(Self {
            env,
            layout: Layout::Package(parts),
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    /// Loads a template file; artifacts inherit its extension. Zip packages
    /// are treated as `.docx`, anything else must be UTF-8 text.
    pub fn from_file(path: &Path, fallback: &str) -> Result<Self> {
        let bytes = fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(DEFAULT_EXTENSION);
        tracing::debug!(template = %path.display(), bytes = bytes.len(), "loaded document template");

        if bytes.starts_with(ZIP_MAGIC) {
            return Self::from_package(bytes, extension, fallback);
        }
        let source = String::from_utf8(bytes).map_err(|_| {
            AgendaError::validation(format!(
                "Template {} is neither UTF-8 text nor a .docx package",
                path.display()
            ))
        })?;
        Self::new(source, extension, fallback)
    }
}

impl DocumentRenderer for TemplateRenderer {
    fn render(&self, document: &DocumentRecord) -> Result<Vec<u8>> {
        let parts = match &self.layout {
            Layout::Text => {
                let template = self.env.get_template(TEMPLATE_NAME)?;
                return Ok(template.render(document)?.into_bytes());
            }
            Layout::Package(parts) => parts,
        };

        let mut rendered: Vec<(&str, Cow<'_, [u8]>)> = Vec::with_capacity(parts.len());
        for part in parts {
            let bytes = match &part.raw {
                Some(raw) => Cow::Borrowed(raw.as_slice()),
                None => {
                    let template = self.env.get_template(&part.name)?;
                    Cow::Owned(template.render(document)?.into_bytes())
                }
            };
            rendered.push((part.name.as_str(), bytes));
        }
        write_zip(rendered.iter().map(|(name, bytes)| (*name, bytes.as_ref())))
    }

    fn extension(&self) -> &str {
        &self.extension
    }
}

fn environment(fallback: &str) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".xml") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    env.set_trim_blocks(true);

    let fallback = Value::from(fallback);
    env.set_formatter(move |out, state, value| {
        if value.is_undefined() || value.is_none() {
            minijinja::escape_formatter(out, state, &fallback)
        } else {
            minijinja::escape_formatter(out, state, value)
        }
    });
    env
}

fn is_templated_part(name: &str) -> bool {
    let header_or_footer = name.starts_with("word/header") || name.starts_with("word/footer");
    name == DOCUMENT_PART || (header_or_footer && name.ends_with(".xml"))
}
