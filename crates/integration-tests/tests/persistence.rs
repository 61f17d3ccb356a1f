//! Engines over the file-backed store: state written by one process
//! generation must rehydrate in the next.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use aurelia_core::Category;
use aurelia_integration_tests::catalog;
use aurelia_storefront::cart::CartEngine;
use aurelia_storefront::persist::{FileStore, KeyValueStore, TryOnGallery};
use aurelia_storefront::wishlist::WishlistEngine;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("aurelia-it-{}", uuid::Uuid::new_v4()))
}

fn open_store(dir: &PathBuf) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(dir.clone()).unwrap())
}

#[test]
fn cart_and_wishlist_share_a_store_without_collisions() {
    let dir = temp_dir();
    let catalog = catalog();
    let ring = catalog.products().first().unwrap().clone();
    let earrings = catalog.products().get(1).unwrap().clone();

    {
        let store = open_store(&dir);
        let cart = CartEngine::new(Arc::clone(&store));
        let wishlist = WishlistEngine::new(store);
        cart.add_item(ring.clone(), 2).unwrap();
        wishlist.add_item(earrings.clone()).unwrap();
    }

    let store = open_store(&dir);
    let cart = CartEngine::load(Arc::clone(&store));
    let wishlist = WishlistEngine::load(store);

    assert_eq!(cart.total_items(), 2);
    assert!(cart.lines().iter().any(|line| line.product.id == ring.id));
    assert_eq!(wishlist.len(), 1);
    assert!(wishlist.is_in_wishlist(&earrings.id));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn gallery_cap_holds_across_reopen() {
    let dir = temp_dir();

    let saved: Vec<uuid::Uuid> = {
        let gallery = TryOnGallery::with_cap(open_store(&dir), 3);
        (0..5)
            .map(|n| {
                gallery
                    .save_photo(
                        format!("data:image/png;base64,frame-{n}"),
                        "Riviera Round Sunglasses",
                        Category::Eyewear,
                    )
                    .unwrap()
            })
            .collect()
    };

    let gallery = TryOnGallery::with_cap(open_store(&dir), 3);
    let kept: Vec<uuid::Uuid> = gallery.photos().iter().map(|p| p.id).collect();

    // Oldest two were evicted at save time; the survivors kept their order.
    assert_eq!(kept, saved.iter().skip(2).copied().collect::<Vec<_>>());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn deleting_a_capture_persists() {
    let dir = temp_dir();

    let gallery = TryOnGallery::new(open_store(&dir));
    let first = gallery
        .save_photo("data:image/png;base64,one", "Aurora Signet Ring", Category::Rings)
        .unwrap();
    let second = gallery
        .save_photo("data:image/png;base64,two", "Atlas Band Ring", Category::Rings)
        .unwrap();
    gallery.delete_photo(first).unwrap();

    let reopened = TryOnGallery::new(open_store(&dir));
    let kept: Vec<uuid::Uuid> = reopened.photos().iter().map(|p| p.id).collect();
    assert_eq!(kept, vec![second]);

    std::fs::remove_dir_all(&dir).unwrap();
}
