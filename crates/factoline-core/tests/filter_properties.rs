//! Property tests for the filter engine, the selection mutators and the
//! cart counters.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;

use factoline_core::{Cart, Catalog, Decimal, Product, Selection, Storefront, filter_products};

// ── Strategies ──────────────────────────────────────────────────────

const ESSENCES: &[&str] = &["oak", "pine", "douglas", "beech"];
const KINDS: &[&str] = &["plank", "beam", "avive", "plot"];
const THICKNESSES: &[&str] = &["27mm", "27x150mm", "127mm", "41mm", "54x225mm"];
const THICKNESS_OPTIONS: &[&str] = &["27", "41", "54"];
const QUALITY_OPTIONS: &[&str] = &["qf1", "qf2", "qf3"];
const CERT_OPTIONS: &[&str] = &["pefc", "fsc"];

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        "[a-z0-9]{1,4}",
        "[a-zA-Zé ]{0,12}",
        prop::sample::select(ESSENCES),
        prop::sample::select(KINDS),
        "(QF[1-3][ab]?)( [a-z]{1,6})?",
        prop::sample::select(THICKNESSES),
        0u32..200,
        0i64..500_000,
    )
        .prop_map(|(id, title, essence, kind, quality, thickness, stock, cents)| Product {
            id,
            title,
            image: "/img/p.jpg".into(),
            essence: essence.into(),
            kind: kind.into(),
            quality,
            drying: "Séché KD".into(),
            thickness: thickness.into(),
            lengths: "2m".into(),
            seller: "Scierie".into(),
            stock,
            price_per_m3: Decimal::new(cents, 2),
            currency: "EUR".into(),
        })
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Arc<Product>>> {
    prop::collection::vec(product_strategy().prop_map(Arc::new), 0..24)
}

fn selection_strategy() -> impl Strategy<Value = Selection> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(ESSENCES).prop_map(|o| ("essence", o)),
            prop::sample::select(KINDS).prop_map(|o| ("type", o)),
            prop::sample::select(THICKNESS_OPTIONS).prop_map(|o| ("thickness", o)),
            prop::sample::select(QUALITY_OPTIONS).prop_map(|o| ("quality", o)),
            prop::sample::select(CERT_OPTIONS).prop_map(|o| ("cert", o)),
        ],
        0..6,
    )
    .prop_map(|pairs| {
        let mut selection = Selection::new();
        for (category, option) in pairs {
            selection.set_option(category, option, true);
        }
        selection
    })
}

/// True if `sub` appears in `all` in the same relative order.
fn is_ordered_subset(sub: &[Arc<Product>], all: &[Arc<Product>]) -> bool {
    let mut rest = all.iter();
    sub.iter().all(|p| rest.any(|q| Arc::ptr_eq(p, q)))
}

// ── Properties ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn empty_query_and_selection_is_identity(catalog in catalog_strategy()) {
        let out = filter_products(&catalog, "", &Selection::new());
        prop_assert_eq!(out.len(), catalog.len());
        prop_assert!(is_ordered_subset(&out, &catalog));
    }

    #[test]
    fn result_is_an_ordered_subset(
        catalog in catalog_strategy(),
        query in "[a-zQF0-9]{0,3}",
        selection in selection_strategy(),
    ) {
        let out = filter_products(&catalog, &query, &selection);
        prop_assert!(is_ordered_subset(&out, &catalog));
    }

    #[test]
    fn every_result_satisfies_every_active_category(
        catalog in catalog_strategy(),
        selection in selection_strategy(),
    ) {
        for p in filter_products(&catalog, "", &selection) {
            for (category, options) in selection.active_categories() {
                let ok = match category {
                    "essence" => options.contains(&p.essence),
                    "type" => options.contains(&p.kind),
                    "thickness" => options.iter().any(|o| p.thickness.starts_with(o.as_str())),
                    "quality" => options.iter().any(|o| p.quality.to_lowercase().contains(o.as_str())),
                    _ => true,
                };
                prop_assert!(ok, "{} failed {}", p.id, category);
            }
        }
    }

    #[test]
    fn clear_all_equals_no_selection(
        catalog in catalog_strategy(),
        query in "[a-z]{0,2}",
        selection in selection_strategy(),
    ) {
        let mut cleared = selection.clone();
        cleared.clear_all();
        let a = filter_products(&catalog, &query, &cleared);
        let b = filter_products(&catalog, &query, &Selection::new());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn search_is_case_insensitive(
        catalog in catalog_strategy(),
        query in "[a-z]{1,3}",
    ) {
        let lower = filter_products(&catalog, &query, &Selection::new());
        let upper = filter_products(&catalog, &query.to_uppercase(), &Selection::new());
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn cart_is_additive_in_any_order(
        products in prop::collection::vec(product_strategy(), 0..16),
    ) {
        let expected: Decimal = products.iter().map(|p| p.price_per_m3).sum();

        let mut forward = Cart::default();
        for p in &products {
            forward.add_to_cart(p);
        }
        let mut backward = Cart::default();
        for p in products.iter().rev() {
            backward.add_to_cart(p);
        }

        prop_assert_eq!(forward.total(), expected);
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward.notifications(), u32::try_from(products.len()).unwrap());
    }
}

// ── Concrete scenarios ──────────────────────────────────────────────

#[test]
fn oak_selection_keeps_only_the_oak_product() {
    let catalog = Catalog::from_json_str(
        r#"{ "products": [
            { "id": "1", "title": "Planche", "image": "", "essence": "oak", "type": "plank",
              "quality": "QF1", "drying": "KD", "thickness": "27mm", "lengths": "2m",
              "seller": "A", "stock": 10, "pricePerM3": 100, "currency": "EUR" },
            { "id": "2", "title": "Planche", "image": "", "essence": "pine", "type": "plank",
              "quality": "QF1", "drying": "KD", "thickness": "38mm", "lengths": "2m",
              "seller": "A", "stock": 10, "pricePerM3": 100, "currency": "EUR" }
        ] }"#,
        "scenario",
    )
    .unwrap();

    let selection: Selection = [("essence", ["oak"])].into_iter().collect();
    let store = Storefront::with_initial(catalog, "", selection);
    let ids: Vec<_> = store.visible().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1"]);
}

#[test]
fn chene_query_matches_builtin_oak_titles() {
    let mut store = Storefront::new(Catalog::builtin());
    store.set_query("CHÊNE");
    let ids: Vec<_> = store.visible().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "10"]);
}

#[test]
fn unmatched_query_is_an_empty_listing_not_an_error() {
    let mut store = Storefront::new(Catalog::builtin());
    store.set_query("mélèze");
    let listing = store.listing();
    assert!(listing.is_empty());
    assert!(listing.is_searching());
}
