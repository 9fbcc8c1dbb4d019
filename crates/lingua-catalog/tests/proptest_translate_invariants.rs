//! Property-based invariant tests for the lookup/translate path.
//!
//! Verifies:
//! 1. Interpolation is deterministic (pure function of template + args)
//! 2. Templates without `%` pass through byte-for-byte
//! 3. Unknown contexts behave exactly like known-context misses
//! 4. Unfinished entries never surface their translation body
//! 5. placeholder_indices is sorted, deduplicated, and in range
//! 6. Substitution never drops supplied argument text for in-range tokens

use lingua_catalog::{
    Argument, Catalog, MessageEntry, TranslationStatus, interpolate, placeholder_indices,
};
use proptest::prelude::*;

fn arg_strategy() -> impl Strategy<Value = Argument> {
    prop_oneof![
        any::<i64>().prop_map(Argument::Int),
        any::<u64>().prop_map(Argument::UInt),
        "[a-zA-Z0-9_.-]{0,16}".prop_map(Argument::from),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interpolate_is_deterministic(
        template in "[a-zA-Z0-9 %]{0,40}",
        args in proptest::collection::vec(arg_strategy(), 0..4),
    ) {
        let (first, first_err) = interpolate(&template, &args);
        let (second, second_err) = interpolate(&template, &args);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_err, second_err);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. No placeholders, no changes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn percent_free_templates_pass_through(
        template in "[a-zA-Z0-9 .,!?_-]{0,60}",
        args in proptest::collection::vec(arg_strategy(), 0..4),
    ) {
        let (out, err) = interpolate(&template, &args);
        prop_assert_eq!(out, template);
        prop_assert!(err.is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Unknown context == known-context miss
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_context_equals_known_miss(
        source in "[a-zA-Z0-9 %]{0,40}",
        args in proptest::collection::vec(arg_strategy(), 0..4),
    ) {
        let mut catalog = Catalog::new("fr");
        // A known context with unrelated content.
        catalog
            .context_mut("KnownDialog")
            .insert(MessageEntry::new("\u{0}sentinel\u{0}").with_translation("x"));

        let via_known = catalog.translate("KnownDialog", &source, &args);
        let via_unknown = catalog.translate("NoSuchDialog", &source, &args);
        let (direct, _) = interpolate(&source, &args);
        prop_assert_eq!(&via_known, &via_unknown);
        prop_assert_eq!(via_known, direct);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Unfinished entries fall back to source
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unfinished_never_surfaces_translation(
        source in "[a-zA-Z0-9 ]{1,30}",
        stale in "[a-zA-Z0-9 ]{1,30}",
    ) {
        prop_assume!(source != stale);
        let mut catalog = Catalog::new("es");
        catalog.context_mut("GameListWidget").insert(
            MessageEntry::new(source.clone())
                .with_translation(stale.clone())
                .with_status(TranslationStatus::Unfinished),
        );
        let out = catalog.translate("GameListWidget", &source, &[]);
        prop_assert_eq!(out, source);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. placeholder_indices shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placeholder_indices_sorted_unique_in_range(template in "[a-z0-9%]{0,60}") {
        let indices = placeholder_indices(&template);
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(indices.iter().all(|&i| (1..=9).contains(&i)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Supplied in-range tokens substitute their argument text
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_range_tokens_substitute(value in "[a-zA-Z0-9]{1,12}") {
        let args = [Argument::from(value.as_str())];
        let (out, err) = interpolate("before %1 after", &args);
        prop_assert_eq!(out, format!("before {value} after"));
        prop_assert!(err.is_none());
    }
}
