//! Filter and sort engine shared by the search, collection, and category
//! pages.
//!
//! Each page hands the engine a [`FilterSelection`] and receives the
//! filtered, sorted product list. Predicates AND-compose across dimensions;
//! every dimension has a sentinel "match everything" value, so an
//! all-sentinel selection returns the input unchanged - the engine applies
//! no hidden default filtering.

use aurelia_core::Category;
use rust_decimal::Decimal;

use crate::catalog::Product;

/// Category dimension of a filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Sentinel: matches every product.
    #[default]
    All,
    /// Exact category match.
    Only(Category),
}

/// Material dimension of a filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MaterialFilter {
    /// Sentinel: matches every product.
    #[default]
    All,
    /// Case-insensitive substring match against the product material.
    Keyword(String),
}

/// Inclusive price band. `max: None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    /// Lower bound, inclusive.
    pub min: Decimal,
    /// Upper bound, inclusive; `None` is the unbounded sentinel.
    pub max: Option<Decimal>,
}

impl PriceBand {
    /// The unbounded band: matches every price.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: None,
        }
    }

    /// A band between `min` and `max`, both inclusive.
    #[must_use]
    pub const fn between(min: Decimal, max: Decimal) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && self.max.is_none_or(|max| amount <= max)
    }
}

impl Default for PriceBand {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Sort strategy, applied after filtering. All strategies are stable with
/// respect to ties.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// No reordering: preserve the filtered order.
    #[default]
    Featured,
    /// Numeric sort by price, ascending.
    PriceAsc,
    /// Numeric sort by price, descending.
    PriceDesc,
    /// Stable partition: new arrivals first.
    Newest,
    /// Stable partition: bestsellers first.
    Bestseller,
}

impl SortKey {
    /// Parse from URL parameter value. Unknown values fall back to featured.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-ascending" | "price-asc" => Self::PriceAsc,
            "price-descending" | "price-desc" => Self::PriceDesc,
            "newest" => Self::Newest,
            "bestseller" | "bestsellers" => Self::Bestseller,
            _ => Self::Featured,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-ascending",
            Self::PriceDesc => "price-descending",
            Self::Newest => "newest",
            Self::Bestseller => "bestseller",
        }
    }
}

/// A page's complete filter state.
///
/// The default value is all sentinels: it matches the whole catalog in
/// original order.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    /// Free-text query; empty always matches.
    pub query: String,
    /// Category constraint.
    pub category: CategoryFilter,
    /// Material constraint.
    pub material: MaterialFilter,
    /// Price constraint.
    pub price: PriceBand,
    /// Sort strategy.
    pub sort: SortKey,
}

impl FilterSelection {
    /// Whether a product passes every predicate dimension.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_query(product, &self.normalized_query())
    }

    /// Trimmed, lowercased text query, computed once per filter run rather
    /// than once per product.
    fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    fn matches_with_query(&self, product: &Product, query: &str) -> bool {
        Self::matches_text(product, query)
            && self.matches_category(product)
            && self.matches_material(product)
            && self.price.contains(product.price.amount())
    }

    /// Case-insensitive substring match against title, description,
    /// category tag, and material. Any one field containing the query is a
    /// match; an empty query always matches.
    fn matches_text(product: &Product, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        product.title.to_lowercase().contains(query)
            || product.description.to_lowercase().contains(query)
            || product.category.as_str().contains(query)
            || product.material.to_lowercase().contains(query)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == category,
        }
    }

    fn matches_material(&self, product: &Product) -> bool {
        match &self.material {
            MaterialFilter::All => true,
            MaterialFilter::Keyword(keyword) => product
                .material
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
        }
    }
}

/// Filter `products` by `selection` and apply its sort strategy.
///
/// Deterministic: equal inputs produce equal outputs, and every sort is
/// stable, so ties keep their filtered order. An empty result is a normal
/// outcome.
#[must_use]
pub fn run(products: &[Product], selection: &FilterSelection) -> Vec<Product> {
    let query = selection.normalized_query();
    let mut results: Vec<Product> = products
        .iter()
        .filter(|product| selection.matches_with_query(product, &query))
        .cloned()
        .collect();

    match selection.sort {
        SortKey::Featured => {}
        SortKey::PriceAsc => results.sort_by_key(|product| product.price.amount()),
        SortKey::PriceDesc => {
            results.sort_by(|a, b| b.price.amount().cmp(&a.price.amount()));
        }
        // sort_by_key is stable, so partitioning on the negated flag keeps
        // each group's relative order.
        SortKey::Newest => results.sort_by_key(|product| !product.is_new),
        SortKey::Bestseller => results.sort_by_key(|product| !product.is_bestseller),
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use aurelia_core::ProductId;

    use crate::catalog::seed_catalog;

    use super::*;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_all_sentinels_return_full_catalog_in_order() {
        let catalog = seed_catalog();
        let results = run(catalog.products(), &FilterSelection::default());
        assert_eq!(results, catalog.products());
    }

    #[test]
    fn test_category_filter_exact() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            category: CategoryFilter::Only(Category::Rings),
            ..Default::default()
        };
        let results = run(catalog.products(), &selection);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.category == Category::Rings));
    }

    #[test]
    fn test_material_filter_substring_case_insensitive() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            material: MaterialFilter::Keyword("VERMEIL".to_owned()),
            ..Default::default()
        };
        let results = run(catalog.products(), &selection);
        assert!(!results.is_empty());
        assert!(
            results
                .iter()
                .all(|p| p.material.to_lowercase().contains("vermeil"))
        );
    }

    #[test]
    fn test_text_match_spans_fields() {
        let catalog = seed_catalog();

        // Title hit
        let by_title = run(
            catalog.products(),
            &FilterSelection {
                query: "aurora".to_owned(),
                ..Default::default()
            },
        );
        assert!(by_title.iter().any(|p| p.id == ProductId::new("prod-001")));

        // Category tag hit
        let by_category = run(
            catalog.products(),
            &FilterSelection {
                query: "eyewear".to_owned(),
                ..Default::default()
            },
        );
        assert!(by_category.iter().all(|p| p.category == Category::Eyewear));
        assert!(!by_category.is_empty());

        // Material hit
        let by_material = run(
            catalog.products(),
            &FilterSelection {
                query: "acetate".to_owned(),
                ..Default::default()
            },
        );
        assert!(!by_material.is_empty());
    }

    #[test]
    fn test_query_normalized_once_per_run() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            query: "  PEARL ".to_owned(),
            ..Default::default()
        };

        // Trim and case-folding hold through the hoisted normalization,
        // and the standalone predicate agrees with the run pipeline.
        let results = run(catalog.products(), &selection);
        assert_eq!(ids(&results), vec!["prod-008"]);
        for product in catalog.products() {
            assert_eq!(
                selection.matches(product),
                results.iter().any(|p| p.id == product.id)
            );
        }
    }

    #[test]
    fn test_price_band_inclusive_at_both_bounds() {
        let catalog = seed_catalog();
        // prod-009 is exactly $290.00, prod-001 exactly $450.00
        let selection = FilterSelection {
            price: PriceBand::between(Decimal::new(290_00, 2), Decimal::new(450_00, 2)),
            ..Default::default()
        };
        let results = run(catalog.products(), &selection);
        let result_ids = ids(&results);
        assert!(result_ids.contains(&"prod-009"));
        assert!(result_ids.contains(&"prod-001"));
        assert!(
            results
                .iter()
                .all(|p| p.price.amount() >= Decimal::new(290_00, 2)
                    && p.price.amount() <= Decimal::new(450_00, 2))
        );
    }

    #[test]
    fn test_price_band_unbounded_max() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            price: PriceBand {
                min: Decimal::new(900_00, 2),
                max: None,
            },
            ..Default::default()
        };
        let results = run(catalog.products(), &selection);
        assert!(!results.is_empty());
        assert!(
            results
                .iter()
                .all(|p| p.price.amount() >= Decimal::new(900_00, 2))
        );
    }

    #[test]
    fn test_predicates_and_compose() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            category: CategoryFilter::Only(Category::Rings),
            price: PriceBand::between(Decimal::ZERO, Decimal::new(300_00, 2)),
            ..Default::default()
        };
        let results = run(catalog.products(), &selection);
        assert_eq!(ids(&results), vec!["prod-009"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let catalog = seed_catalog();
        let selection = FilterSelection {
            query: "no such piece anywhere".to_owned(),
            ..Default::default()
        };
        assert!(run(catalog.products(), &selection).is_empty());
    }

    #[test]
    fn test_sort_price_asc_desc() {
        let catalog = seed_catalog();
        let asc = run(
            catalog.products(),
            &FilterSelection {
                sort: SortKey::PriceAsc,
                ..Default::default()
            },
        );
        assert!(
            asc.windows(2)
                .all(|w| w[0].price.amount() <= w[1].price.amount())
        );

        let desc = run(
            catalog.products(),
            &FilterSelection {
                sort: SortKey::PriceDesc,
                ..Default::default()
            },
        );
        assert!(
            desc.windows(2)
                .all(|w| w[0].price.amount() >= w[1].price.amount())
        );
    }

    #[test]
    fn test_newest_is_stable_partition() {
        let catalog = seed_catalog();
        let sorted = run(
            catalog.products(),
            &FilterSelection {
                sort: SortKey::Newest,
                ..Default::default()
            },
        );

        let boundary = sorted.iter().take_while(|p| p.is_new).count();
        assert!(sorted.iter().skip(boundary).all(|p| !p.is_new));

        // Relative order within each partition matches catalog order.
        let new_ids: Vec<&str> = sorted.iter().filter(|p| p.is_new).map(|p| p.id.as_str()).collect();
        let expected_new: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| p.is_new)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(new_ids, expected_new);

        let old_ids: Vec<&str> = sorted
            .iter()
            .filter(|p| !p.is_new)
            .map(|p| p.id.as_str())
            .collect();
        let expected_old: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| !p.is_new)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(old_ids, expected_old);
    }

    #[test]
    fn test_bestseller_partition_front() {
        let catalog = seed_catalog();
        let sorted = run(
            catalog.products(),
            &FilterSelection {
                sort: SortKey::Bestseller,
                ..Default::default()
            },
        );
        let boundary = sorted.iter().take_while(|p| p.is_bestseller).count();
        assert!(boundary > 0);
        assert!(sorted.iter().skip(boundary).all(|p| !p.is_bestseller));
    }

    #[test]
    fn test_sort_key_parse_round_trip() {
        for sort in [
            SortKey::Featured,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::Newest,
            SortKey::Bestseller,
        ] {
            assert_eq!(SortKey::parse(sort.as_str()), sort);
        }
        assert_eq!(SortKey::parse("garbage"), SortKey::Featured);
    }
}
