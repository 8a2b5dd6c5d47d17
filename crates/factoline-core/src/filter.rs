// ── Search and facet predicates ──
//
// Pure functions over the catalog snapshot. The storefront calls
// `filter_products` whenever the query or the selection changes.

use std::sync::Arc;

use strum::{Display, EnumString};

use crate::model::{Product, Selection};

/// Categories that restrict results by a product attribute.
///
/// Any other category id (`cert` included) has no backing attribute and is
/// always satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    Essence,
    Type,
    Thickness,
    Quality,
}

impl Facet {
    /// Facet backing a category id, if there is one.
    pub fn for_category(category: &str) -> Option<Self> {
        category.parse().ok()
    }

    pub fn matches(self, product: &Product, option: &str) -> bool {
        match self {
            Self::Essence => product.essence == option,
            Self::Type => product.kind == option,
            Self::Thickness => product.thickness.starts_with(option),
            Self::Quality => product
                .quality
                .to_lowercase()
                .contains(&option.to_lowercase()),
        }
    }
}

/// Text search stage. `lowered_query` must already be lowercase and
/// non-empty; a product passes if any of its fields contains it.
pub fn matches_query(product: &Product, lowered_query: &str) -> bool {
    product
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(lowered_query))
}

/// Facet stage: AND across active categories, OR within one.
pub fn matches_selection(product: &Product, selection: &Selection) -> bool {
    selection.active_categories().all(|(category, options)| {
        let Some(facet) = Facet::for_category(category) else {
            return true;
        };
        options.iter().any(|option| facet.matches(product, option))
    })
}

/// Visible subset of `products`, in catalog order.
///
/// An empty `query` skips the text stage entirely; an empty selection skips
/// the facet stage.
pub fn filter_products(
    products: &[Arc<Product>],
    query: &str,
    selection: &Selection,
) -> Vec<Arc<Product>> {
    let lowered = query.to_lowercase();
    products
        .iter()
        .filter(|p| query.is_empty() || matches_query(p, &lowered))
        .filter(|p| matches_selection(p, selection))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::tests::product;

    fn catalog() -> Vec<Arc<Product>> {
        let mut beam = product("3", "oak", "80x200mm");
        beam.title = "Poutre 3".into();
        beam.kind = "beam".into();
        beam.quality = "QF3 Charpente".into();

        let mut chene = product("4", "beech", "54mm");
        chene.title = "Plot de CHÊNE étuvé".into();

        vec![
            Arc::new(product("1", "oak", "27mm")),
            Arc::new(product("2", "pine", "38mm")),
            Arc::new(beam),
            Arc::new(chene),
            Arc::new(product("5", "oak", "127mm")),
            Arc::new(product("6", "douglas", "27x150mm")),
        ]
    }

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn select(pairs: &[(&str, &[&str])]) -> Selection {
        pairs.iter().map(|(c, opts)| (*c, opts.iter().copied())).collect()
    }

    #[test]
    fn empty_query_and_selection_is_identity() {
        let all = catalog();
        let out = filter_products(&all, "", &Selection::new());
        assert_eq!(ids(&out), ids(&all));
    }

    #[test]
    fn options_or_within_category() {
        let out = filter_products(&catalog(), "", &select(&[("essence", &["oak", "pine"])]));
        assert_eq!(ids(&out), ["1", "2", "3", "5"]);
    }

    #[test]
    fn categories_and_together() {
        let sel = select(&[("essence", &["oak"]), ("type", &["beam"])]);
        let out = filter_products(&catalog(), "", &sel);
        assert_eq!(ids(&out), ["3"]);
    }

    #[test]
    fn thickness_is_a_prefix_match() {
        let out = filter_products(&catalog(), "", &select(&[("thickness", &["27"])]));
        assert_eq!(ids(&out), ["1", "6"]);
    }

    #[test]
    fn quality_is_case_insensitive_substring() {
        let out = filter_products(&catalog(), "", &select(&[("quality", &["qf3"])]));
        assert_eq!(ids(&out), ["3"]);
    }

    #[test]
    fn quality_option_case_is_ignored() {
        let out = filter_products(&catalog(), "", &select(&[("quality", &["QF3"])]));
        assert_eq!(ids(&out), ["3"]);
    }

    #[test]
    fn unknown_category_passes_everything() {
        let all = catalog();
        let out = filter_products(&all, "", &select(&[("cert", &["pefc"])]));
        assert_eq!(out.len(), all.len());

        let out = filter_products(&all, "", &select(&[("cert", &["fsc"]), ("essence", &["pine"])]));
        assert_eq!(ids(&out), ["2"]);
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let out = filter_products(&catalog(), "chêne", &Selection::new());
        assert_eq!(ids(&out), ["4"]);

        // seller field
        let out = filter_products(&catalog(), "MOREAU", &Selection::new());
        assert_eq!(out.len(), 6);

        // numeric field (stock)
        let out = filter_products(&catalog(), "30", &Selection::new());
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn unmatched_query_yields_empty() {
        let out = filter_products(&catalog(), "mélèze", &Selection::new());
        assert!(out.is_empty());
    }

    #[test]
    fn stages_compose() {
        let out = filter_products(&catalog(), "planche", &select(&[("essence", &["oak"])]));
        assert_eq!(ids(&out), ["1", "5"]);
    }

    #[test]
    fn facet_names_round_trip() {
        assert_eq!(Facet::for_category("essence"), Some(Facet::Essence));
        assert_eq!(Facet::for_category("type"), Some(Facet::Type));
        assert_eq!(Facet::for_category("cert"), None);
        assert_eq!(Facet::Thickness.to_string(), "thickness");
    }
}
