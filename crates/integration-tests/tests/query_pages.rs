//! The filter engine as the search, collection, and category pages use it:
//! one selection in, one deterministic product list out.

#![allow(clippy::unwrap_used)]

use aurelia_core::Category;
use aurelia_integration_tests::catalog;
use aurelia_storefront::catalog::Product;
use aurelia_storefront::query::{
    CategoryFilter, FilterSelection, MaterialFilter, PriceBand, SortKey, run,
};
use rust_decimal::Decimal;

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn default_selection_returns_catalog_unchanged() {
    let catalog = catalog();
    let results = run(catalog.products(), &FilterSelection::default());
    assert_eq!(ids(&results), ids(catalog.products()));
}

#[test]
fn category_page_with_price_band() {
    // The rings page with the band capped at the signet ring's price.
    let catalog = catalog();
    let selection = FilterSelection {
        category: CategoryFilter::Only(Category::Rings),
        price: PriceBand::between(Decimal::ZERO, Decimal::new(45_000, 2)),
        ..FilterSelection::default()
    };

    let results = run(catalog.products(), &selection);
    assert_eq!(ids(&results), vec!["prod-001", "prod-009"]);
}

#[test]
fn search_page_text_query_reaches_material_and_description() {
    let catalog = catalog();

    // "pearl" appears in one title and one material list.
    let selection = FilterSelection {
        query: "pearl".to_owned(),
        ..FilterSelection::default()
    };
    assert_eq!(ids(&run(catalog.products(), &selection)), vec!["prod-008"]);

    // "acetate" only ever appears as a material.
    let selection = FilterSelection {
        query: "Acetate".to_owned(),
        ..FilterSelection::default()
    };
    assert_eq!(
        ids(&run(catalog.products(), &selection)),
        vec!["prod-006", "prod-007"]
    );
}

#[test]
fn every_dimension_composes_with_and() {
    let catalog = catalog();
    let selection = FilterSelection {
        query: "band".to_owned(),
        category: CategoryFilter::Only(Category::Rings),
        material: MaterialFilter::Keyword("silver".to_owned()),
        price: PriceBand::between(Decimal::ZERO, Decimal::new(30_000, 2)),
        ..FilterSelection::default()
    };
    assert_eq!(ids(&run(catalog.products(), &selection)), vec!["prod-009"]);
}

#[test]
fn price_sort_orders_the_full_catalog() {
    let catalog = catalog();
    let selection = FilterSelection {
        sort: SortKey::PriceAsc,
        ..FilterSelection::default()
    };
    let results = run(catalog.products(), &selection);

    let amounts: Vec<Decimal> = results.iter().map(|p| p.price.amount()).collect();
    let mut sorted = amounts.clone();
    sorted.sort();
    assert_eq!(amounts, sorted);
    assert_eq!(results.first().unwrap().id.as_str(), "prod-009");
    assert_eq!(results.last().unwrap().id.as_str(), "prod-008");
}

#[test]
fn newest_sort_is_a_stable_partition() {
    let catalog = catalog();
    let selection = FilterSelection {
        sort: SortKey::Newest,
        ..FilterSelection::default()
    };
    let results = run(catalog.products(), &selection);

    let boundary = results.iter().position(|p| !p.is_new).unwrap();
    assert!(results.iter().take(boundary).all(|p| p.is_new));
    assert!(results.iter().skip(boundary).all(|p| !p.is_new));

    // Within each group, catalog order is preserved.
    assert_eq!(
        ids(&results),
        vec![
            "prod-001",
            "prod-004",
            "prod-006",
            "prod-008",
            "prod-010",
            "prod-002",
            "prod-003",
            "prod-005",
            "prod-007",
            "prod-009",
        ]
    );
}

#[test]
fn sort_key_survives_url_round_trip() {
    for sort in [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Newest,
        SortKey::Bestseller,
    ] {
        assert_eq!(SortKey::parse(sort.as_str()), sort);
    }
    assert_eq!(SortKey::parse("handmade"), SortKey::Featured);
}

#[test]
fn empty_result_is_a_normal_outcome() {
    let catalog = catalog();
    let selection = FilterSelection {
        query: "tiara".to_owned(),
        ..FilterSelection::default()
    };
    assert!(run(catalog.products(), &selection).is_empty());
}
