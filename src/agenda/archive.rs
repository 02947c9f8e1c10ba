//! Naming and bundling generated documents.
//!
//! The batch goes out as `Agendas-Geradas.zip` by default. A gzipped
//! tarball is available through the `archive-format` setting.

use crate::config::ArchiveFormat;
use crate::error::{AgendaError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const MAX_TITLE_CHARS: usize = 80;

pub const ARCHIVE_STEM: &str = "Agendas-Geradas";

/// One rendered document, ready to be packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub key: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Strips characters Windows refuses in file names, collapses whitespace and
/// caps the result at 80 characters.
pub fn sanitize_title(title: &str) -> String {
    let stripped: String = title.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect();
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    collapsed.trim().chars().take(MAX_TITLE_CHARS).collect()
}

pub fn artifact_filename(title: &str, extension: &str) -> String {
    format!("Agenda-{}.{}", sanitize_title(title), extension)
}

pub trait Packager {
    fn package(&self, artifacts: &[Artifact]) -> Result<Vec<u8>>;

    /// File name of the combined artifact.
    fn archive_name(&self) -> String;
}

/// Packager for the configured format.
pub fn packager_for(format: ArchiveFormat) -> &'static dyn Packager {
    match format {
        ArchiveFormat::Zip => &ZipPackager,
        ArchiveFormat::TarGz => &TarGzPackager,
    }
}

/// Writes `entries` into a zip, deflated, in iteration order.
pub fn write_zip<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Every file entry of a zip as `(name, bytes)`, in archive order.
/// Directory entries are dropped.
pub fn read_zip(bytes: Vec<u8>) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }
        let mut body = Vec::new();
        file.read_to_end(&mut body)?;
        entries.push((file.name().to_string(), body));
    }
    Ok(entries)
}

/// Zip with one entry per document, in the order given.
#[derive(Debug, Default)]
pub struct ZipPackager;

impl Packager for ZipPackager {
    fn package(&self, artifacts: &[Artifact]) -> Result<Vec<u8>> {
        write_zip(
            artifacts
                .iter()
                .map(|a| (a.filename.as_str(), a.bytes.as_slice())),
        )
    }

    fn archive_name(&self) -> String {
        format!("{}.zip", ARCHIVE_STEM)
    }
}

/// Gzipped tarball with one entry per document, in the order given.
#[derive(Debug, Default)]
pub struct TarGzPackager;

impl TarGzPackager {
    fn write_archive<W: Write>(&self, writer: W, artifacts: &[Artifact]) -> Result<W> {
        let enc = GzEncoder::new(writer, Compression::default());
        let mut tar = tar::Builder::new(enc);

        for artifact in artifacts {
            let mut header = tar::Header::new_gnu();
            header.set_size(artifact.bytes.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            tar.append_data(&mut header, &artifact.filename, artifact.bytes.as_slice())
                .map_err(AgendaError::Io)?;
        }

        let enc = tar.into_inner().map_err(AgendaError::Io)?;
        enc.finish().map_err(AgendaError::Io)
    }
}

impl Packager for TarGzPackager {
    fn package(&self, artifacts: &[Artifact]) -> Result<Vec<u8>> {
        self.write_archive(Vec::new(), artifacts)
    }

    fn archive_name(&self) -> String {
        format!("{}.tar.gz", ARCHIVE_STEM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;

    fn two_shifts() -> Vec<Artifact> {
        vec![
            Artifact {
                key: "7ano__M".into(),
                filename: "Agenda-7 ano (MANHÃ).txt".into(),
                bytes: b"first".to_vec(),
            },
            Artifact {
                key: "7ano__T".into(),
                filename: "Agenda-7 ano (TARDE).txt".into(),
                bytes: b"second".to_vec(),
            },
        ]
    }

    #[test]
    fn sanitize_strips_forbidden_characters() {
        let clean = sanitize_title("7º/8º Ano: Turma \"A\"");
        assert_eq!(clean, "7º8º Ano Turma A");
    }

    #[test]
    fn sanitize_collapses_whitespace_and_trims() {
        assert_eq!(sanitize_title("  6º   ano \t MANHÃ  "), "6º ano MANHÃ");
    }

    #[test]
    fn sanitize_truncates_to_eighty_chars() {
        let long = "ã".repeat(120);
        assert_eq!(sanitize_title(&long).chars().count(), 80);
    }

    #[test]
    fn filename_has_prefix_and_extension() {
        assert_eq!(
            artifact_filename("7º ano <TARDE>", "docx"),
            "Agenda-7º ano TARDE.docx"
        );
    }

    #[test]
    fn zip_keeps_entry_order() {
        let packager = ZipPackager;
        let bytes = packager.package(&two_shifts()).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert_eq!(packager.archive_name(), "Agendas-Geradas.zip");

        let entries = read_zip(bytes).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Agenda-7 ano (MANHÃ).txt".to_string(), b"first".to_vec()),
                ("Agenda-7 ano (TARDE).txt".to_string(), b"second".to_vec()),
            ]
        );
    }

    #[test]
    fn zip_is_the_default_format() {
        let packager = packager_for(ArchiveFormat::default());
        assert_eq!(packager.archive_name(), "Agendas-Geradas.zip");
        assert_eq!(
            packager_for(ArchiveFormat::TarGz).archive_name(),
            "Agendas-Geradas.tar.gz"
        );
    }

    #[test]
    fn read_zip_rejects_other_data() {
        assert!(matches!(
            read_zip(b"not a zip".to_vec()),
            Err(AgendaError::Archive(_))
        ));
    }

    #[test]
    fn tarball_keeps_entry_order() {
        let packager = TarGzPackager;
        let bytes = packager.package(&two_shifts()).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(packager.archive_name(), "Agendas-Geradas.tar.gz");

        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        let mut seen = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            seen.push((name, body));
        }
        assert_eq!(
            seen,
            vec![
                ("Agenda-7 ano (MANHÃ).txt".to_string(), "first".to_string()),
                ("Agenda-7 ano (TARDE).txt".to_string(), "second".to_string()),
            ]
        );
    }
}
