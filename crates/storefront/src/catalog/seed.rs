//! Static product data bundled with the storefront.

use aurelia_core::{Category, CurrencyCode, Handle, Price, ProductId};

use super::{Catalog, Product};

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    handle: &str,
    title: &str,
    description: &str,
    price_cents: i64,
    compare_at_cents: Option<i64>,
    category: Category,
    material: &str,
    collections: &[&str],
    is_new: bool,
    is_bestseller: bool,
    care: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        handle: Handle::parse(handle).expect("seed handle is statically valid"),
        title: title.to_owned(),
        description: description.to_owned(),
        price: Price::from_cents(price_cents, CurrencyCode::USD),
        compare_at_price: compare_at_cents
            .map(|cents| Price::from_cents(cents, CurrencyCode::USD)),
        category,
        material: material.to_owned(),
        collections: collections.iter().map(|&c| c.to_owned()).collect(),
        is_new,
        is_bestseller,
        care: care.to_owned(),
    }
}

/// The catalog the storefront ships with.
///
/// # Panics
///
/// Panics only if the static data violates the uniqueness invariant, which
/// is caught by tests.
#[must_use]
pub fn seed_catalog() -> Catalog {
    let products = vec![
        product(
            "prod-001",
            "aurora-signet-ring",
            "Aurora Signet Ring",
            "A hand-finished signet ring with a brushed oval face, cast in recycled gold vermeil.",
            45_000,
            None,
            Category::Rings,
            "18k gold vermeil",
            &["signature", "runway"],
            true,
            true,
            "Wipe with a soft cloth; avoid perfume contact.",
        ),
        product(
            "prod-002",
            "celeste-drop-earrings",
            "Celeste Drop Earrings",
            "Slender pave drops that catch the light with every turn of the head.",
            62_000,
            Some(78_000),
            Category::Earrings,
            "sterling silver, white sapphire",
            &["signature"],
            false,
            true,
            "Store in the provided pouch away from moisture.",
        ),
        product(
            "prod-003",
            "meridian-chain-necklace",
            "Meridian Chain Necklace",
            "A sculptural curb chain with a high-polish clasp, sized to sit at the collarbone.",
            88_000,
            None,
            Category::Necklaces,
            "18k gold vermeil",
            &["heritage"],
            false,
            false,
            "Remove before swimming; polish with a jewelry cloth.",
        ),
        product(
            "prod-004",
            "solstice-bangle",
            "Solstice Bangle",
            "A seamless dome bangle, weighted to rest still on the wrist.",
            54_000,
            None,
            Category::Bangles,
            "polished brass, gold plated",
            &["runway"],
            true,
            false,
            "Keep dry; re-plate after extended wear.",
        ),
        product(
            "prod-005",
            "lumen-cuff-bracelet",
            "Lumen Cuff Bracelet",
            "An open cuff with hand-set baguettes along the leading edge.",
            73_000,
            Some(91_000),
            Category::Bracelets,
            "sterling silver, topaz",
            &["signature", "heritage"],
            false,
            true,
            "Avoid contact with lotions; store flat.",
        ),
        product(
            "prod-006",
            "riviera-round-sunglasses",
            "Riviera Round Sunglasses",
            "Hand-polished acetate rounds with gradient lenses and gold-tone pin hinges.",
            38_000,
            None,
            Category::Eyewear,
            "italian acetate, mineral glass",
            &["riviera"],
            true,
            false,
            "Clean lenses with the supplied microfiber cloth only.",
        ),
        product(
            "prod-007",
            "vespera-cat-eye-sunglasses",
            "Vespera Cat-Eye Sunglasses",
            "An upswept cat-eye silhouette in tortoise acetate with smoked lenses.",
            41_000,
            Some(49_000),
            Category::Eyewear,
            "tortoise acetate",
            &["riviera", "runway"],
            false,
            true,
            "Store in the hard case; keep away from heat.",
        ),
        product(
            "prod-008",
            "ondine-pearl-necklace",
            "Ondine Pearl Necklace",
            "Freshwater pearls knotted by hand on silk, finished with a toggle clasp.",
            96_000,
            None,
            Category::Necklaces,
            "freshwater pearl, sterling silver",
            &["heritage"],
            true,
            false,
            "Pearls last longest worn often and stored alone.",
        ),
        product(
            "prod-009",
            "atlas-band-ring",
            "Atlas Band Ring",
            "A faceted band with a matte interior, made to stack or stand alone.",
            29_000,
            None,
            Category::Rings,
            "sterling silver",
            &["atelier"],
            false,
            false,
            "Polish with a silver cloth as needed.",
        ),
        product(
            "prod-010",
            "faro-hoop-earrings",
            "Faro Hoop Earrings",
            "Bold tapered hoops with a hinged closure, light enough for all-day wear.",
            51_000,
            None,
            Category::Earrings,
            "18k gold vermeil",
            &["atelier", "runway"],
            true,
            false,
            "Remove before sleeping; wipe after wear.",
        ),
    ];

    Catalog::new(products).expect("seed catalog is statically valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_builds() {
        let catalog = seed_catalog();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_seed_compare_at_always_above_price() {
        for product in seed_catalog().products() {
            if let Some(compare_at) = product.compare_at_price {
                assert!(compare_at > product.price, "{}", product.handle);
            }
        }
    }

    #[test]
    fn test_seed_covers_every_category() {
        let catalog = seed_catalog();
        for category in Category::ALL {
            assert!(
                catalog.products().iter().any(|p| p.category == category),
                "no seed product for {category}"
            );
        }
    }
}
