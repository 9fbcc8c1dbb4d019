#![forbid(unsafe_code)]

//! Reader, writer, and file loader for the `.ts` translation-catalog format.
//!
//! # Role in Lingua
//! `lingua-ts` is the persistence boundary. It parses the on-disk XML
//! dialect into [`lingua_catalog::Catalog`] values, serializes catalogs
//! back out, and owns every file access in the system.
//!
//! # Primary responsibilities
//! - **XmlScanner**: a minimal tokenizer for exactly the markup subset the
//!   format uses.
//! - **parse_document**: document structure to catalog entries, tolerant of
//!   advisory omissions, strict about structural breakage.
//! - **Loading**: file and locale-convention loading with UTF-8 checks,
//!   plus locale discovery for building a language menu.
//! - **Writing**: round-trip serialization for tooling.
//!
//! # How it fits in the system
//! The runtime (`lingua-runtime`) calls the loader on startup and on locale
//! change, then swaps the built catalog into process-wide state. The audit
//! tool (`lingua-lint`) uses the diagnostics-preserving entry points.

pub mod loader;
pub mod reader;
pub mod writer;
pub mod xml;

pub use loader::{
    CatalogLoadError, available_locales, catalog_path, load_file, load_file_with_warnings,
    load_locale, parse_str, parse_str_with_warnings,
};
pub use reader::{LoadWarning, ParseOutcome, parse_document};
pub use writer::{write_document, write_file};
pub use xml::XmlError;
