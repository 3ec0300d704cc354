//! Import files and export artifacts

use crate::error::{Error, Result};
use crate::mapping::BangMapping;
use std::path::{Path, PathBuf};

/// File name of the export artifact
pub const EXPORT_FILE_NAME: &str = "custombangs.json";

/// MIME type of the export artifact
pub const EXPORT_MIME_TYPE: &str = "text/json";

/// A file offered for import, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// Declared content type (e.g. `application/json`)
    pub content_type: String,
    /// Raw file contents
    pub body: String,
}

impl ImportFile {
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Read a file from disk, declaring its content type from the extension
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self::new(content_type_for(path), body))
    }
}

/// Guess a declared content type from a file extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

/// A downloadable serialization of a persisted mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name
    pub file_name: String,
    /// MIME type of the contents
    pub mime_type: &'static str,
    /// JSON contents
    pub contents: String,
}

impl ExportArtifact {
    /// Serialize a mapping into an artifact
    pub fn from_mapping(mapping: &BangMapping, file_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            file_name: file_name.into(),
            mime_type: EXPORT_MIME_TYPE,
            contents: mapping.to_json()?,
        })
    }

    /// Render as a `data:` URL suitable for a download link
    ///
    /// Every byte outside `A-Z a-z 0-9 - _ . ~` is percent-encoded. This is
    /// stricter than JavaScript's `encodeURIComponent`, which leaves
    /// `! ' ( ) *` as they are. Both forms decode to the same contents.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};charset=utf-8,{}",
            self.mime_type,
            urlencoding::encode(&self.contents)
        )
    }

    /// Turn the artifact back into an import candidate
    pub fn to_import_file(&self) -> ImportFile {
        ImportFile::new("application/json", self.contents.clone())
    }

    /// Write the artifact into a directory, returning the written path
    pub async fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.contents)
            .await
            .map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        Ok(path)
    }
}

/// Render a mapping as a two-column CSV document with a header row
pub fn mapping_to_csv(mapping: &BangMapping) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(crate::table::HEADER)?;
    for (shortcut, url) in mapping.iter() {
        writer.write_record([shortcut, url])?;
    }
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
