//! Message entries: the unit of translatable text.

use serde::Serialize;
use smallvec::SmallVec;

/// Approval status of a single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Approved translation; `translation` is the display text.
    Finished,
    /// No approved translation; the source text is displayed instead,
    /// even when a stale `translation` body is present.
    Unfinished,
    /// Retained for reference only; never looked up.
    Vanished,
}

impl TranslationStatus {
    /// Whether entries with this status participate in lookups.
    #[must_use]
    pub fn is_lookup_candidate(self) -> bool {
        !matches!(self, Self::Vanished)
    }
}

/// Source-site provenance: where the string appears in the UI sources.
///
/// Advisory only. The lookup path never reads locations; audit tooling
/// uses them to pinpoint findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Origin file, as recorded by the extraction tool.
    pub filename: String,
    /// Line number within `filename` (0 when unknown).
    pub line: u32,
}

/// A single translatable string within one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    /// Original-language text; the lookup key within a context.
    pub source: String,
    /// Distinguishes entries sharing `source` in the same context but
    /// used in different situational meanings.
    pub disambiguation: Option<String>,
    /// Localized text; may be empty.
    pub translation: String,
    /// Approval status.
    pub status: TranslationStatus,
    /// Translator-facing note carried through from the catalog file.
    pub extra_comment: Option<String>,
    /// Provenance sites, almost always one or two per entry.
    pub locations: SmallVec<[Location; 1]>,
}

impl MessageEntry {
    /// Create a Finished entry with no translation body yet.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            disambiguation: None,
            translation: String::new(),
            status: TranslationStatus::Finished,
            extra_comment: None,
            locations: SmallVec::new(),
        }
    }

    /// Set the translation body.
    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    /// Set the approval status.
    #[must_use]
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the disambiguation comment.
    #[must_use]
    pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
        self.disambiguation = Some(disambiguation.into());
        self
    }

    /// Append a provenance site.
    pub fn push_location(&mut self, filename: impl Into<String>, line: u32) {
        self.locations.push(Location {
            filename: filename.into(),
            line,
        });
    }

    /// The text a renderer should display for this entry.
    ///
    /// Finished entries with a non-empty body yield the translation;
    /// everything else degrades to the source text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.status == TranslationStatus::Finished && !self.translation.is_empty() {
            &self.translation
        } else {
            &self.source
        }
    }
}
