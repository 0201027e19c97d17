//! Admin edits must reach the storefront listing immediately. The grouped
//! listing cache is keyed by store revision, and every mutation bumps the
//! revision, so a grouping computed before an edit can never be served
//! after it.

use std::sync::Arc;

use marigold_admin::models::ProductPatch;
use marigold_core::Price;
use marigold_integration_tests::{init_tracing, seed_store};
use marigold_storefront::catalog_index::{CatalogIndex, FilterCriteria, GENERAL_GROUP};

#[test]
fn test_unchanged_store_serves_the_cached_grouping() {
    init_tracing();
    let seeded = seed_store();
    let service = &seeded.service;
    let index = CatalogIndex::new();
    let criteria = FilterCriteria::default();

    let first = index.grouped(
        service.revision(),
        service.products(),
        service.categories(),
        &criteria,
    );
    let second = index.grouped(
        service.revision(),
        service.products(),
        service.categories(),
        &criteria,
    );

    assert!(
        Arc::ptr_eq(&first, &second),
        "repeat renders of an unchanged store share one grouping"
    );
    assert_eq!(index.cached_listings(), 1);
}

#[test]
fn test_category_rename_invalidates_the_grouping() {
    init_tracing();
    let mut seeded = seed_store();
    let index = CatalogIndex::new();
    let criteria = FilterCriteria::default();

    let before = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &criteria,
    );
    assert!(before.contains_key("Stationery"));

    seeded
        .service
        .rename_category(seeded.stationery, "Desk Goods")
        .expect("rename");

    let after = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &criteria,
    );

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.get("Desk Goods").map(Vec::len), Some(2));
    assert!(!after.contains_key("Stationery"));
}

#[test]
fn test_price_update_shows_in_the_next_listing() {
    init_tracing();
    let mut seeded = seed_store();
    let index = CatalogIndex::new();
    let criteria = FilterCriteria::default();

    // Prime the cache, then reprice the pen.
    let _ = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &criteria,
    );
    seeded
        .service
        .update_product(
            seeded.pen,
            ProductPatch {
                price: Some(Price::from_cents(450)),
                ..ProductPatch::default()
            },
        )
        .expect("reprice");

    let groups = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &criteria,
    );
    let pen = groups
        .get("Stationery")
        .and_then(|products| products.iter().find(|p| p.id == seeded.pen))
        .expect("pen listed");
    assert_eq!(pen.price, Price::from_cents(450));
}

#[test]
fn test_deleted_category_moves_products_to_general() {
    init_tracing();
    let mut seeded = seed_store();
    let index = CatalogIndex::new();

    seeded
        .service
        .remove_category(seeded.kitchen)
        .expect("remove category");

    let groups = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &FilterCriteria::default(),
    );

    let general = groups.get(GENERAL_GROUP).expect("fallback group");
    let names: Vec<_> = general.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Mug"], "orphaned products fall back to General");
    assert!(!groups.contains_key("Kitchen"));
}

#[test]
fn test_removed_product_disappears_from_listing_and_catalog() {
    init_tracing();
    let mut seeded = seed_store();
    let index = CatalogIndex::new();

    seeded.service.remove_product(seeded.pen).expect("remove");

    let groups = index.grouped(
        seeded.service.revision(),
        seeded.service.products(),
        seeded.service.categories(),
        &FilterCriteria::default(),
    );
    let stationery = groups.get("Stationery").expect("notebook remains");
    assert_eq!(stationery.len(), 1);
    assert_eq!(stationery.first().map(|p| p.name.as_str()), Some("Notebook"));

    // The curated catalog no longer lists it either.
    let curated = seeded
        .service
        .catalog_products(seeded.summer_picks)
        .expect("catalog resolves");
    let names: Vec<_> = curated.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Mug"]);
}
