//! String catalog: contexts, lookup, and graceful degradation.
//!
//! # Invariants
//!
//! 1. **Immutable after construction**: a built [`Catalog`] is never
//!    mutated; locale switches build a replacement instance.
//!
//! 2. **Deterministic lookup**: a given (context, source, disambiguation)
//!    always yields the same result for a fixed catalog instance.
//!
//! 3. **Unique keys**: within a context, (source, disambiguation) is unique
//!    among Finished/Unfinished entries; [`ContextStrings::insert`] enforces
//!    last-wins and surfaces the replaced entry so loaders can warn.
//!
//! 4. **Thread safety**: all data is immutable after construction, so the
//!    catalog is `Send + Sync` and lookups need no locking.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown context | UI component newer than catalog | Source text verbatim |
//! | Unknown source | String not yet extracted | Source text verbatim |
//! | Unfinished entry | No approved translation | Source text verbatim |
//! | Vanished entry | Retired string | Not looked up at all |
//! | Empty catalog | Load failed, fallback installed | Everything passes through |

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::context::ContextView;
use crate::entry::{MessageEntry, TranslationStatus};
use crate::format::{self, Argument};

/// A resolved lookup: the chosen text and whether it is a genuine
/// translation or a fallback to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Resolved<'a> {
    /// Text to display (before placeholder substitution).
    pub text: &'a str,
    /// `true` when `text` is an approved translation body.
    pub translated: bool,
}

impl<'a> Resolved<'a> {
    pub(crate) fn from_entry(entry: &'a MessageEntry) -> Self {
        if entry.status == TranslationStatus::Finished && !entry.translation.is_empty() {
            Self {
                text: &entry.translation,
                translated: true,
            }
        } else {
            Self {
                text: &entry.source,
                translated: false,
            }
        }
    }
}

/// Entries for a single UI component.
#[derive(Debug, Clone)]
pub struct ContextStrings {
    name: String,
    entries: Vec<MessageEntry>,
    // source -> indices of Finished/Unfinished entries; Vanished entries
    // live only in `entries`.
    index: FxHashMap<String, Vec<usize>>,
}

impl ContextStrings {
    /// Create an empty context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Context (UI component) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert an entry.
    ///
    /// When a Finished/Unfinished entry with the same (source,
    /// disambiguation) already exists, the new entry wins and the replaced
    /// one is returned so the caller can diagnose the duplicate.
    pub fn insert(&mut self, entry: MessageEntry) -> Option<MessageEntry> {
        if !entry.status.is_lookup_candidate() {
            self.entries.push(entry);
            return None;
        }
        if let Some(indices) = self.index.get(&entry.source) {
            for &i in indices {
                if self.entries[i].disambiguation == entry.disambiguation {
                    return Some(std::mem::replace(&mut self.entries[i], entry));
                }
            }
        }
        let slot = self.entries.len();
        self.index
            .entry(entry.source.clone())
            .or_default()
            .push(slot);
        self.entries.push(entry);
        None
    }

    /// Look up a Finished/Unfinished entry by source and disambiguation.
    #[must_use]
    pub fn get(&self, source: &str, disambiguation: Option<&str>) -> Option<&MessageEntry> {
        self.index
            .get(source)?
            .iter()
            .map(|&i| &self.entries[i])
            .find(|e| e.disambiguation.as_deref() == disambiguation)
    }

    /// All entries in insertion order, Vanished included.
    pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    /// Number of entries, Vanished included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full in-memory set of contexts for one locale.
///
/// # Example
///
/// ```
/// use lingua_catalog::{Catalog, MessageEntry};
///
/// let mut catalog = Catalog::new("zh_TW");
/// catalog
///     .context_mut("AboutDialog")
///     .insert(MessageEntry::new("Authors").with_translation("\u{4f5c}\u{8005}"));
///
/// assert_eq!(
///     catalog.translate("AboutDialog", "Authors", &[]),
///     "\u{4f5c}\u{8005}"
/// );
/// // Unknown strings degrade to the source text.
/// assert_eq!(
///     catalog.translate("AboutDialog", "License", &[]),
///     "License"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    contexts: Vec<ContextStrings>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog for a locale tag (e.g. `"zh_TW"`).
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            contexts: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// The all-lookups-degrade catalog installed when no locale is loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Locale tag this catalog was built for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Fetch or create the context with `name`. Builder-side API; built
    /// catalogs are treated as read-only.
    pub fn context_mut(&mut self, name: &str) -> &mut ContextStrings {
        let slot = *self.index.entry(name.to_string()).or_insert_with(|| {
            self.contexts.push(ContextStrings::new(name));
            self.contexts.len() - 1
        });
        &mut self.contexts[slot]
    }

    /// The context named `name`, if present.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&ContextStrings> {
        self.index.get(name).map(|&i| &self.contexts[i])
    }

    /// A read-only view restricted to one context.
    ///
    /// Unknown contexts yield an empty view, not an error: new UI
    /// components routinely exist before translators catch up.
    #[must_use]
    pub fn resolve(&self, name: &str) -> ContextView<'_> {
        ContextView::new(name, self.context(name))
    }

    /// All contexts in insertion order.
    pub fn contexts(&self) -> impl Iterator<Item = &ContextStrings> {
        self.contexts.iter()
    }

    /// Number of contexts.
    #[must_use]
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Total number of entries across all contexts, Vanished included.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(ContextStrings::len).sum()
    }

    /// Whether the catalog holds no contexts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Resolve (context, source, disambiguation) to display text.
    ///
    /// Returns `None` when no Finished/Unfinished entry matches.
    #[must_use]
    pub fn lookup(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<Resolved<'_>> {
        self.context(context)?
            .get(source, disambiguation)
            .map(Resolved::from_entry)
    }

    /// Translate with positional placeholder substitution.
    ///
    /// Never fails: missing contexts, sources, or translations degrade to
    /// the source text, and unmatched placeholders stay literal (reported
    /// once per unique (context, source) via `tracing`).
    #[must_use]
    pub fn translate(&self, context: &str, source: &str, args: &[Argument]) -> String {
        render(self.lookup(context, source, None), context, source, args)
    }

    /// [`Catalog::translate`] for entries carrying a disambiguation.
    #[must_use]
    pub fn translate_as(
        &self,
        context: &str,
        source: &str,
        disambiguation: &str,
        args: &[Argument],
    ) -> String {
        render(
            self.lookup(context, source, Some(disambiguation)),
            context,
            source,
            args,
        )
    }

    /// Per-context and whole-catalog completeness statistics.
    #[must_use]
    pub fn completeness(&self) -> CompletenessReport {
        let contexts: Vec<ContextCompleteness> = self
            .contexts
            .iter()
            .map(|ctx| {
                let mut stat = ContextCompleteness {
                    context: ctx.name().to_string(),
                    total: ctx.len(),
                    finished: 0,
                    unfinished: 0,
                    vanished: 0,
                    percent_finished: 100.0,
                };
                for entry in ctx.entries() {
                    match entry.status {
                        TranslationStatus::Finished => stat.finished += 1,
                        TranslationStatus::Unfinished => stat.unfinished += 1,
                        TranslationStatus::Vanished => stat.vanished += 1,
                    }
                }
                let live = stat.finished + stat.unfinished;
                if live > 0 {
                    stat.percent_finished = (stat.finished as f32 / live as f32) * 100.0;
                }
                stat
            })
            .collect();

        let mut report = CompletenessReport {
            language: self.language.clone(),
            total: 0,
            finished: 0,
            unfinished: 0,
            vanished: 0,
            percent_finished: 100.0,
            contexts,
        };
        for ctx in &report.contexts {
            report.total += ctx.total;
            report.finished += ctx.finished;
            report.unfinished += ctx.unfinished;
            report.vanished += ctx.vanished;
        }
        let live = report.finished + report.unfinished;
        if live > 0 {
            report.percent_finished = (report.finished as f32 / live as f32) * 100.0;
        }
        report
    }
}

/// Shared tail of the translate path: pick the template, substitute, report.
pub(crate) fn render(
    resolved: Option<Resolved<'_>>,
    context: &str,
    source: &str,
    args: &[Argument],
) -> String {
    let template = match resolved {
        Some(r) if r.translated => r.text,
        _ => source,
    };
    let (text, err) = format::interpolate(template, args);
    if let Some(err) = err {
        format::report_once(context, source, &err);
    }
    text
}

/// Completeness statistics for one catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    /// Locale tag.
    pub language: String,
    /// Entries across all contexts, Vanished included.
    pub total: usize,
    /// Entries with approved translations.
    pub finished: usize,
    /// Entries awaiting translation.
    pub unfinished: usize,
    /// Retired entries.
    pub vanished: usize,
    /// `finished / (finished + unfinished)`, as a percentage; 100 when the
    /// catalog has no live entries.
    pub percent_finished: f32,
    /// Per-context breakdown, in catalog order.
    pub contexts: Vec<ContextCompleteness>,
}

/// Completeness statistics for one context.
#[derive(Debug, Clone, Serialize)]
pub struct ContextCompleteness {
    /// Context name.
    pub context: String,
    /// Entries in this context, Vanished included.
    pub total: usize,
    /// Entries with approved translations.
    pub finished: usize,
    /// Entries awaiting translation.
    pub unfinished: usize,
    /// Retired entries.
    pub vanished: usize,
    /// `finished / (finished + unfinished)` as a percentage.
    pub percent_finished: f32,
}
