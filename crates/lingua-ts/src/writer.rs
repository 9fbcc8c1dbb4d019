//! Catalog serialization back to the `.ts` format.
//!
//! Round-trip contract: loading a document, writing it, and loading the
//! result preserves context, source, disambiguation, status, locations,
//! and translator comments.

use std::fs;
use std::path::Path;

use lingua_catalog::{Catalog, TranslationStatus};

use crate::loader::CatalogLoadError;

/// Serialize a catalog to a complete `.ts` document.
#[must_use]
pub fn write_document(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str(&format!(
        "<TS version=\"2.1\" language=\"{}\">\n",
        escape_attr(catalog.language())
    ));
    for context in catalog.contexts() {
        out.push_str("<context>\n");
        out.push_str(&format!(
            "    <name>{}</name>\n",
            escape_text(context.name())
        ));
        for entry in context.entries() {
            out.push_str("    <message>\n");
            for location in &entry.locations {
                out.push_str(&format!(
                    "        <location filename=\"{}\" line=\"{}\"/>\n",
                    escape_attr(&location.filename),
                    location.line
                ));
            }
            out.push_str(&format!(
                "        <source>{}</source>\n",
                escape_text(&entry.source)
            ));
            if let Some(comment) = &entry.disambiguation {
                out.push_str(&format!(
                    "        <comment>{}</comment>\n",
                    escape_text(comment)
                ));
            }
            if let Some(extra) = &entry.extra_comment {
                out.push_str(&format!(
                    "        <extracomment>{}</extracomment>\n",
                    escape_text(extra)
                ));
            }
            let type_attr = match entry.status {
                TranslationStatus::Finished => "",
                TranslationStatus::Unfinished => " type=\"unfinished\"",
                TranslationStatus::Vanished => " type=\"vanished\"",
            };
            out.push_str(&format!(
                "        <translation{type_attr}>{}</translation>\n",
                escape_text(&entry.translation)
            ));
            out.push_str("    </message>\n");
        }
        out.push_str("</context>\n");
    }
    out.push_str("</TS>\n");
    out
}

/// Serialize a catalog to a file.
pub fn write_file(catalog: &Catalog, path: impl AsRef<Path>) -> Result<(), CatalogLoadError> {
    let path = path.as_ref();
    fs::write(path, write_document(catalog)).map_err(|err| CatalogLoadError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
