//! End-to-end visitor journey: browse a curated catalog, inspect a
//! product, fill a cart, walk the checkout wizard, and share the order.

use marigold_integration_tests::{init_tracing, seed_store};
use marigold_storefront::catalog_index::{CatalogIndex, FilterCriteria, GENERAL_GROUP};
use marigold_storefront::checkout::{CheckoutStep, ShippingAddress};
use marigold_storefront::clipboard::MemoryClipboard;
use marigold_storefront::gallery::GalleryView;
use marigold_storefront::session::StorefrontSession;

#[tokio::test]
async fn test_full_checkout_journey_produces_exact_summary() {
    init_tracing();
    let seeded = seed_store();
    let service = &seeded.service;

    let catalog_name = service
        .catalog(seeded.summer_picks)
        .expect("catalog exists")
        .name
        .clone();
    let mut session = StorefrontSession::new(catalog_name);

    // Browse the curated catalog: curation order, dangling-free.
    let curated = service
        .catalog_products(seeded.summer_picks)
        .expect("catalog resolves");
    let names: Vec<_> = curated.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pen", "Mug"]);

    // Inspect the pen; its carousel starts at the first of three images.
    let pen = curated.first().expect("pen is curated").clone();
    session.open_product(&pen);
    assert_eq!(session.gallery().map(GalleryView::product_id), Some(pen.id));
    session.previous_image();
    session.previous_image();
    assert_eq!(
        session.gallery().map(GalleryView::active_image_index),
        Some(1),
        "two previous() from the start wrap to the second image"
    );

    // Buy it, then bump the quantity from the review step.
    session.buy_now(&pen);
    assert!(session.is_cart_open());
    assert_eq!(session.wizard().step(), CheckoutStep::Review);
    session.update_quantity(pen.id, 1);
    assert_eq!(session.cart().unit_count(), 2);

    // Walk the wizard with a full address.
    assert!(session.proceed_to_shipping());
    session.set_shipping_address(ShippingAddress {
        street: "Elm St".to_string(),
        city: "Springfield".to_string(),
        zip: "00000".to_string(),
    });
    assert!(session.finish_shipping());
    assert_eq!(session.wizard().step(), CheckoutStep::Summary);

    // Share: the summary is byte-exact and lands on the clipboard.
    let clipboard = MemoryClipboard::new();
    let summary = session.share_order(&clipboard);
    assert_eq!(
        summary,
        "Order Summary from Summer Picks:\n\
         Pen x2 - $6.00\n\
         Total: $6.00\n\
         Shipping to: Elm St, Springfield 00000"
    );
    assert_eq!(clipboard.last().as_deref(), Some(summary.as_str()));
    assert!(session.order_copied());

    // Closing from Summary completes the order.
    session.close_cart();
    assert!(session.cart().is_empty());
    assert!(session.wizard().address().is_blank());
}

#[tokio::test]
async fn test_skipping_shipping_omits_the_shipping_line() {
    init_tracing();
    let seeded = seed_store();
    let pen = seeded
        .service
        .state()
        .product(seeded.pen)
        .expect("pen exists")
        .clone();

    let mut session = StorefrontSession::new("Summer Picks");
    session.add_to_cart(&pen, 2);
    session.open_cart();
    assert!(session.proceed_to_shipping());
    assert!(session.skip_shipping());

    let clipboard = MemoryClipboard::new();
    let summary = session.share_order(&clipboard);
    assert_eq!(
        summary,
        "Order Summary from Summer Picks:\nPen x2 - $6.00\nTotal: $6.00"
    );
}

#[test]
fn test_grouped_listing_follows_criteria() {
    init_tracing();
    let seeded = seed_store();
    let service = &seeded.service;
    let index = CatalogIndex::new();

    // Unfiltered: two category groups, all three products.
    let all = index.grouped(
        service.revision(),
        service.products(),
        service.categories(),
        &FilterCriteria::default(),
    );
    assert_eq!(all.get("Stationery").map(Vec::len), Some(2));
    assert_eq!(all.get("Kitchen").map(Vec::len), Some(1));
    assert!(!all.contains_key(GENERAL_GROUP));

    // Search narrows by name or description, case-insensitively.
    let ink = index.grouped(
        service.revision(),
        service.products(),
        service.categories(),
        &FilterCriteria {
            search: "INK".to_string(),
            ..FilterCriteria::default()
        },
    );
    let stationery = ink.get("Stationery").expect("pen matches on description");
    assert_eq!(stationery.len(), 1);
    assert_eq!(stationery.first().map(|p| p.id), Some(seeded.pen));

    // Location and category dimensions combine.
    let kitchen_in_back = index.grouped(
        service.revision(),
        service.products(),
        service.categories(),
        &FilterCriteria {
            category: Some(seeded.kitchen),
            location: Some(seeded.back_room),
            search: String::new(),
        },
    );
    let kitchen = kitchen_in_back.get("Kitchen").expect("mug matches");
    assert_eq!(kitchen.first().map(|p| p.id), Some(seeded.mug));
    assert_eq!(kitchen_in_back.len(), 1);
}

#[test]
fn test_abandoned_checkout_resumes_at_review() {
    init_tracing();
    let seeded = seed_store();
    let pen = seeded
        .service
        .state()
        .product(seeded.pen)
        .expect("pen exists")
        .clone();

    let mut session = StorefrontSession::new("Summer Picks");
    session.add_to_cart(&pen, 1);
    session.open_cart();
    session.proceed_to_shipping();
    session.set_shipping_address(ShippingAddress {
        street: "Elm St".to_string(),
        ..ShippingAddress::default()
    });

    // Wander off mid-checkout.
    session.close_cart();
    assert_eq!(session.cart().unit_count(), 1, "cart survives");

    // Coming back starts over at Review with the typed street intact.
    session.open_cart();
    assert_eq!(session.wizard().step(), CheckoutStep::Review);
    assert_eq!(session.wizard().address().street, "Elm St");
}
