//! The process-wide active catalog.
//!
//! # Invariants
//!
//! 1. **Readers never block on I/O**: [`current`] hands out an `Arc` clone;
//!    the write lock is held only for the pointer swap.
//!
//! 2. **No half-built state**: a replacement catalog is fully built before
//!    it becomes visible. In-flight lookups against the previous instance
//!    complete safely against that (orphaned but still valid) catalog.
//!
//! 3. **Failed switches change nothing**: a load error leaves the previous
//!    catalog installed.

use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use lingua_catalog::{Argument, Catalog};
use lingua_ts::CatalogLoadError;

static ACTIVE: OnceLock<RwLock<Arc<Catalog>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Catalog>> {
    ACTIVE.get_or_init(|| RwLock::new(Arc::new(Catalog::empty())))
}

/// A handle to the catalog active right now.
///
/// The handle stays valid across later locale switches; callers that want
/// to observe a switch re-call this per lookup batch (it is one `Arc`
/// clone), or just use [`translate`].
#[must_use]
pub fn current() -> Arc<Catalog> {
    slot().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Atomically replace the active catalog.
pub fn install(catalog: Catalog) {
    let catalog = Arc::new(catalog);
    let mut active = slot().write().unwrap_or_else(PoisonError::into_inner);
    *active = catalog;
}

/// Install the empty catalog: every lookup degrades to source-text
/// passthrough. The documented fallback when no locale can be loaded.
pub fn install_empty() {
    install(Catalog::empty());
}

/// Load `<dir>/<prefix>_<locale>.ts` and make it the active catalog.
///
/// On error the previous catalog stays installed and the error is returned
/// for the caller to decide (retry, prompt, or fall back to the default
/// locale).
pub fn switch_locale(dir: &Path, prefix: &str, locale: &str) -> Result<(), CatalogLoadError> {
    let catalog = lingua_ts::load_locale(dir, prefix, locale)?;
    tracing::info!(
        locale = %locale,
        contexts = catalog.context_count(),
        messages = catalog.message_count(),
        "switching translation catalog"
    );
    install(catalog);
    Ok(())
}

/// Locale tag of the active catalog (empty when none is installed).
#[must_use]
pub fn language() -> String {
    current().language().to_string()
}

/// Translate against the active catalog. See
/// [`Catalog::translate`](lingua_catalog::Catalog::translate).
#[must_use]
pub fn translate(context: &str, source: &str, args: &[Argument]) -> String {
    current().translate(context, source, args)
}

/// [`translate`] for entries carrying a disambiguation.
#[must_use]
pub fn translate_as(context: &str, source: &str, disambiguation: &str, args: &[Argument]) -> String {
    current().translate_as(context, source, disambiguation, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_catalog::MessageEntry;
    use serial_test::serial;
    use std::fs;

    fn catalog_with(context: &str, source: &str, translation: &str) -> Catalog {
        let mut catalog = Catalog::new("test");
        catalog
            .context_mut(context)
            .insert(MessageEntry::new(source).with_translation(translation));
        catalog
    }

    #[test]
    #[serial]
    fn empty_default_passes_through() {
        install_empty();
        assert_eq!(translate("Any", "Hello %1", &[Argument::from("there")]), "Hello there");
        assert_eq!(language(), "");
    }

    #[test]
    #[serial]
    fn install_and_translate() {
        install(catalog_with("MainWindow", "Start", "D\u{e9}marrer"));
        assert_eq!(translate("MainWindow", "Start", &[]), "D\u{e9}marrer");
        install_empty();
    }

    #[test]
    #[serial]
    fn old_handles_survive_a_swap() {
        install(catalog_with("MainWindow", "Start", "old"));
        let before = current();
        install(catalog_with("MainWindow", "Start", "new"));

        // The orphaned instance still resolves its own strings.
        assert_eq!(before.translate("MainWindow", "Start", &[]), "old");
        assert_eq!(current().translate("MainWindow", "Start", &[]), "new");
        install_empty();
    }

    #[test]
    #[serial]
    fn switch_locale_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("app_it.ts"),
            "<TS language=\"it\"><context><name>StatusBar</name><message>\
             <source>Paused</source><translation>In pausa</translation>\
             </message></context></TS>",
        )
        .unwrap();

        switch_locale(dir.path(), "app", "it").unwrap();
        assert_eq!(language(), "it");
        assert_eq!(translate("StatusBar", "Paused", &[]), "In pausa");
        install_empty();
    }

    #[test]
    #[serial]
    fn failed_switch_keeps_previous_catalog() {
        let dir = tempfile::tempdir().unwrap();
        install(catalog_with("StatusBar", "Paused", "kept"));

        let err = switch_locale(dir.path(), "app", "absent").unwrap_err();
        assert!(matches!(err, CatalogLoadError::FileNotFound(_)));
        assert_eq!(translate("StatusBar", "Paused", &[]), "kept");
        install_empty();
    }
}
