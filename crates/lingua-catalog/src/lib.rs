#![forbid(unsafe_code)]

//! Immutable translation-string catalog for desktop front-ends.
//!
//! # Role in Lingua
//! `lingua-catalog` is the runtime lookup layer. It owns the in-memory data
//! model (contexts, message entries, approval status), per-component views,
//! and the translate path with positional `%1`..`%9` substitution.
//!
//! # Primary responsibilities
//! - **Catalog**: one locale's contexts and entries, read-only after build.
//! - **ContextView**: lookups restricted to one UI component.
//! - **Interpolation**: single-pass placeholder substitution that never
//!   fails; malformed calls stay visible instead of blanking text.
//! - **Completeness reporting**: finished/unfinished/vanished statistics.
//!
//! # How it fits in the system
//! The loader (`lingua-ts`) builds catalogs from on-disk files; the runtime
//! (`lingua-runtime`) holds the process-wide active instance and swaps it
//! wholesale on locale change. Nothing in this crate performs I/O.

pub mod catalog;
pub mod context;
pub mod entry;
pub mod format;

pub use catalog::{Catalog, CompletenessReport, ContextCompleteness, ContextStrings, Resolved};
pub use context::ContextView;
pub use entry::{Location, MessageEntry, TranslationStatus};
pub use format::{Argument, FormatError, MAX_PLACEHOLDER, interpolate, placeholder_indices};
