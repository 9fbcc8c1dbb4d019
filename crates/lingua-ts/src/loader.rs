//! File-level catalog loading and locale discovery.
//!
//! All file I/O in the system lives here, outside the UI rendering path:
//! the loader runs at startup or on an explicit locale-change action, and
//! the caller owns placement of the result into process-wide state.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lingua_catalog::Catalog;

use crate::reader::{ParseOutcome, parse_document};
use crate::xml::XmlError;

/// Why a catalog failed to load.
///
/// Fatal to the load operation only: callers fall back to an empty catalog
/// (all lookups degrade to source-text passthrough) rather than aborting.
#[derive(Debug)]
pub enum CatalogLoadError {
    /// The catalog file does not exist.
    FileNotFound(PathBuf),
    /// The file exists but could not be read.
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// The file is not structurally valid catalog markup.
    MalformedMarkup {
        /// 1-based line the problem was detected on.
        line: u32,
        /// Human-readable description.
        message: String,
    },
    /// The file is not valid UTF-8.
    EncodingError {
        /// Decoder error text.
        message: String,
    },
}

impl fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "catalog file not found: {}", path.display())
            }
            Self::Io { path, message } => {
                write!(f, "error reading {}: {message}", path.display())
            }
            Self::MalformedMarkup { line, message } => {
                write!(f, "malformed catalog markup at line {line}: {message}")
            }
            Self::EncodingError { message } => {
                write!(f, "catalog is not valid UTF-8: {message}")
            }
        }
    }
}

impl std::error::Error for CatalogLoadError {}

impl From<XmlError> for CatalogLoadError {
    fn from(err: XmlError) -> Self {
        Self::MalformedMarkup {
            line: err.line,
            message: err.message,
        }
    }
}

/// Parse a catalog held in memory, discarding diagnostics.
pub fn parse_str(input: &str) -> Result<Catalog, CatalogLoadError> {
    Ok(parse_document(input)?.catalog)
}

/// Parse a catalog held in memory, keeping diagnostics for audit tooling.
pub fn parse_str_with_warnings(input: &str) -> Result<ParseOutcome, CatalogLoadError> {
    Ok(parse_document(input)?)
}

/// Load a catalog file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogLoadError> {
    load_file_with_warnings(path).map(|outcome| outcome.catalog)
}

/// Load a catalog file, keeping diagnostics for audit tooling.
pub fn load_file_with_warnings(path: impl AsRef<Path>) -> Result<ParseOutcome, CatalogLoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CatalogLoadError::FileNotFound(path.to_path_buf()),
        _ => CatalogLoadError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|err| CatalogLoadError::EncodingError {
        message: err.to_string(),
    })?;
    let outcome = parse_document(&text)?;
    tracing::debug!(
        path = %path.display(),
        language = outcome.catalog.language(),
        contexts = outcome.catalog.context_count(),
        messages = outcome.catalog.message_count(),
        "loaded translation catalog"
    );
    Ok(outcome)
}

/// Conventional on-disk path for a locale: `<dir>/<prefix>_<locale>.ts`.
#[must_use]
pub fn catalog_path(dir: &Path, prefix: &str, locale: &str) -> PathBuf {
    dir.join(format!("{prefix}_{locale}.ts"))
}

/// Load the catalog for one locale by naming convention.
pub fn load_locale(dir: &Path, prefix: &str, locale: &str) -> Result<Catalog, CatalogLoadError> {
    load_file(catalog_path(dir, prefix, locale))
}

/// Locale tags with a catalog file present in `dir`, sorted.
///
/// An unreadable directory yields an empty list; a front-end with no
/// translations is a working front-end.
#[must_use]
pub fn available_locales(dir: &Path, prefix: &str) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "translation directory not readable");
        return Vec::new();
    };
    let wanted = format!("{prefix}_");
    let mut locales: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            let tag = name.strip_suffix(".ts")?.strip_prefix(&wanted)?;
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect();
    locales.sort_unstable();
    locales
}
