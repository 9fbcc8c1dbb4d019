//! Read-only per-component views over a catalog.

use crate::catalog::{ContextStrings, Resolved, render};
use crate::format::Argument;

/// Lookups restricted to one UI component's entries.
///
/// Obtained from [`Catalog::resolve`](crate::Catalog::resolve), typically
/// once at component construction time. A view over an unknown context is
/// empty and degrades every lookup to source-text passthrough.
#[derive(Debug, Clone)]
pub struct ContextView<'a> {
    name: String,
    strings: Option<&'a ContextStrings>,
}

impl<'a> ContextView<'a> {
    pub(crate) fn new(name: impl Into<String>, strings: Option<&'a ContextStrings>) -> Self {
        Self {
            name: name.into(),
            strings,
        }
    }

    /// The context name this view was resolved for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the catalog actually contains this context.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.strings.is_some()
    }

    /// Number of entries in the context (0 for unknown contexts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.map_or(0, ContextStrings::len)
    }

    /// Whether the view has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a source string within this context.
    #[must_use]
    pub fn lookup(&self, source: &str, disambiguation: Option<&str>) -> Option<Resolved<'a>> {
        self.strings?
            .get(source, disambiguation)
            .map(Resolved::from_entry)
    }

    /// Translate within this context; same degradation rules as
    /// [`Catalog::translate`](crate::Catalog::translate).
    #[must_use]
    pub fn translate(&self, source: &str, args: &[Argument]) -> String {
        render(self.lookup(source, None), &self.name, source, args)
    }

    /// [`ContextView::translate`] for entries carrying a disambiguation.
    #[must_use]
    pub fn translate_as(&self, source: &str, disambiguation: &str, args: &[Argument]) -> String {
        render(
            self.lookup(source, Some(disambiguation)),
            &self.name,
            source,
            args,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::entry::MessageEntry;
    use crate::format::Argument;

    fn catalog() -> Catalog {
        let mut c = Catalog::new("de");
        c.context_mut("MemoryCardEditor")
            .insert(MessageEntry::new("Delete File").with_translation("Datei l\u{f6}schen"));
        c
    }

    #[test]
    fn known_context_view() {
        let c = catalog();
        let view = c.resolve("MemoryCardEditor");
        assert!(view.is_known());
        assert_eq!(view.len(), 1);
        assert_eq!(view.translate("Delete File", &[]), "Datei l\u{f6}schen");
        assert!(view.lookup("Delete File", None).unwrap().translated);
    }

    #[test]
    fn unknown_context_view_is_empty_not_an_error() {
        let c = catalog();
        let view = c.resolve("BrandNewDialog");
        assert!(!view.is_known());
        assert!(view.is_empty());
        assert_eq!(view.name(), "BrandNewDialog");
        assert_eq!(
            view.translate("Save %1", &[Argument::from("state")]),
            "Save state"
        );
        assert!(view.lookup("Save %1", None).is_none());
    }

    #[test]
    fn view_is_cloneable_and_reusable() {
        let c = catalog();
        let view = c.resolve("MemoryCardEditor");
        let other = view.clone();
        assert_eq!(
            view.translate("Delete File", &[]),
            other.translate("Delete File", &[])
        );
    }
}
