#![forbid(unsafe_code)]

//! Process-wide active translation catalog and convenience macros.
//!
//! # Role in Lingua
//! `lingua-runtime` glues the loader to the UI: it owns the single active
//! [`Catalog`] instance, swaps it wholesale on locale change, and exposes
//! the call-site API (`tr!`) front-end code uses per displayed string.
//!
//! # Concurrency model
//! The active catalog is read-only after construction, so concurrent
//! lookups from UI rendering paths need no locking beyond one `Arc` clone.
//! Locale switches build the replacement fully, then atomically swap the
//! reference; readers never observe a half-built catalog.
//!
//! # Example
//! ```
//! use lingua_catalog::{Catalog, MessageEntry};
//! use lingua_runtime::tr;
//!
//! let mut catalog = Catalog::new("zh_TW");
//! catalog
//!     .context_mut("AboutDialog")
//!     .insert(MessageEntry::new("Authors").with_translation("\u{4f5c}\u{8005}"));
//! lingua_runtime::install(catalog);
//!
//! assert_eq!(tr!("AboutDialog", "Authors"), "\u{4f5c}\u{8005}");
//! // Untranslated strings degrade to the source text, substituted.
//! assert_eq!(tr!("AboutDialog", "%1 fps", 60), "60 fps");
//! # lingua_runtime::install_empty();
//! ```

pub mod active;

pub use active::{
    current, install, install_empty, language, switch_locale, translate, translate_as,
};
pub use lingua_catalog::{Argument, Catalog, ContextView, Resolved};
pub use lingua_ts::{CatalogLoadError, available_locales};

/// Translate a source string in a context against the active catalog.
///
/// Extra expressions become positional arguments for `%1`..`%9`; anything
/// convertible into [`Argument`] works.
#[macro_export]
macro_rules! tr {
    ($context:expr, $source:expr $(,)?) => {
        $crate::translate($context, $source, &[])
    };
    ($context:expr, $source:expr, $($arg:expr),+ $(,)?) => {
        $crate::translate($context, $source, &[$($crate::Argument::from($arg)),+])
    };
}

/// [`tr!`] for entries carrying a disambiguation comment.
#[macro_export]
macro_rules! tr_as {
    ($context:expr, $source:expr, $disambiguation:expr $(,)?) => {
        $crate::translate_as($context, $source, $disambiguation, &[])
    };
    ($context:expr, $source:expr, $disambiguation:expr, $($arg:expr),+ $(,)?) => {
        $crate::translate_as($context, $source, $disambiguation, &[$($crate::Argument::from($arg)),+])
    };
}

#[cfg(test)]
mod tests {
    use lingua_catalog::{Catalog, MessageEntry, TranslationStatus};
    use serial_test::serial;

    #[test]
    #[serial]
    fn tr_macro_forms() {
        let mut catalog = Catalog::new("fr");
        let ctx = catalog.context_mut("Achievements");
        ctx.insert(MessageEntry::new("Locked").with_translation("Verrouill\u{e9}"));
        ctx.insert(
            MessageEntry::new("%1 of %2 unlocked")
                .with_status(TranslationStatus::Unfinished),
        );
        ctx.insert(
            MessageEntry::new("Reset")
                .with_disambiguation("progress")
                .with_translation("R\u{e9}initialiser la progression"),
        );
        crate::install(catalog);

        assert_eq!(tr!("Achievements", "Locked"), "Verrouill\u{e9}");
        assert_eq!(tr!("Achievements", "%1 of %2 unlocked", 3, 10), "3 of 10 unlocked");
        assert_eq!(
            tr_as!("Achievements", "Reset", "progress"),
            "R\u{e9}initialiser la progression"
        );
        crate::install_empty();
    }

    #[test]
    #[serial]
    fn tr_macro_mixed_argument_types() {
        crate::install_empty();
        assert_eq!(
            tr!("StatusBar", "%1: %2 (%3%)", "speed", 59.4, 99_u32),
            "speed: 59.4 (99%)"
        );
    }
}
