//! Property tests for catalog resolution
//!
//! Catalogs are generated as JSON so declared key order is exercised
//! through the same decoding path the page uses.

use marquee_core::{
    catalog::{resolve, ScriptCatalog, Selection},
    CoreError,
};
use proptest::prelude::*;

/// Build `{"hero": {"en": {k: v, ...}}}` preserving the given order
fn catalog_json(entries: &[(String, String)]) -> String {
    let inner: Vec<String> = entries
        .iter()
        .map(|(k, v)| {
            format!(
                "{}: {}",
                serde_json::to_string(k).unwrap(),
                serde_json::to_string(v).unwrap()
            )
        })
        .collect();
    format!(r#"{{"hero": {{"en": {{{}}}}}}}"#, inner.join(", "))
}

/// Distinct subcategory keys with non-empty lines
fn arb_entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z \\[\\]]{1,30}", 1..8)
        .prop_map(|map| map.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn requested_subcategory_is_returned(entries in arb_entries(), pick in any::<prop::sample::Index>()) {
        let catalog = ScriptCatalog::from_json_str(&catalog_json(&entries)).unwrap();
        let (key, line) = &entries[pick.index(entries.len())];
        let resolved = resolve(&catalog, &Selection::new("hero", "en", key.as_str())).unwrap();
        prop_assert_eq!(resolved, line.as_str());
    }

    #[test]
    fn fallback_is_first_declared(entries in arb_entries()) {
        let catalog = ScriptCatalog::from_json_str(&catalog_json(&entries)).unwrap();
        let resolved = resolve(&catalog, &Selection::new("hero", "en", "")).unwrap();
        prop_assert_eq!(resolved, entries[0].1.as_str());

        let resolved = resolve(&catalog, &Selection::new("hero", "en", "NOT-A-KEY")).unwrap();
        prop_assert_eq!(resolved, entries[0].1.as_str());
    }

    #[test]
    fn fallback_ignores_order_of_the_rest(entries in arb_entries(), seed in any::<u64>()) {
        let mut reordered = entries.clone();
        let rest = &mut reordered[1..];
        if !rest.is_empty() {
            let shift = usize::try_from(seed % rest.len() as u64).unwrap();
            rest.rotate_left(shift);
        }
        let a = ScriptCatalog::from_json_str(&catalog_json(&entries)).unwrap();
        let b = ScriptCatalog::from_json_str(&catalog_json(&reordered)).unwrap();
        let selection = Selection::default();
        prop_assert_eq!(resolve(&a, &selection).unwrap(), resolve(&b, &selection).unwrap());
    }

    #[test]
    fn missing_language_is_not_found(entries in arb_entries(), lang in "[a-z]{3}") {
        let catalog = ScriptCatalog::from_json_str(&catalog_json(&entries)).unwrap();
        let err = resolve(&catalog, &Selection::new("hero", lang.as_str(), "")).unwrap_err();
        prop_assert_eq!(err, CoreError::selection_not_found("hero", &lang, ""));
    }
}

#[test]
fn changing_first_declared_changes_fallback() {
    let a = ScriptCatalog::from_json_str(r#"{"hero": {"en": {"x": "one", "y": "two"}}}"#).unwrap();
    let b = ScriptCatalog::from_json_str(r#"{"hero": {"en": {"y": "two", "x": "one"}}}"#).unwrap();
    let selection = Selection::default();
    assert_eq!(resolve(&a, &selection).unwrap(), "one");
    assert_eq!(resolve(&b, &selection).unwrap(), "two");
}
