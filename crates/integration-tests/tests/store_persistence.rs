//! Snapshot slot behavior across restarts: saved on every change, resumed
//! at boot, loud when corrupt.

use std::sync::Arc;

use marigold_admin::models::{NewCatalog, NewProduct, ProductPatch};
use marigold_admin::storage::{FileStore, MemoryStore, SNAPSHOT_FILE, StateStore, StorageError};
use marigold_admin::store::{StoreError, StoreService};
use marigold_core::Price;
use marigold_integration_tests::init_tracing;

fn pen() -> NewProduct {
    NewProduct {
        name: "Pen".to_string(),
        description: "Smooth blue ink".to_string(),
        price: Price::from_cents(300),
        ..NewProduct::default()
    }
}

#[test]
fn test_first_boot_starts_empty_without_writing() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let service = StoreService::open(Box::new(FileStore::new(dir.path())), "Marigold Bazaar")
        .expect("boot against empty data dir");

    assert_eq!(service.state().store_name, "Marigold Bazaar");
    assert!(service.products().is_empty());
    assert!(
        !dir.path().join(SNAPSHOT_FILE).exists(),
        "the slot is only written by a change"
    );
}

#[test]
fn test_restart_resumes_from_snapshot_file() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let (pen_id, back_room) = {
        let mut service =
            StoreService::open(Box::new(FileStore::new(dir.path())), "Marigold Bazaar")
                .expect("first boot");
        service.rename_store("Rosa's Bazaar").expect("rename");
        let back_room = service.add_location("Back room").expect("location");
        let pen_id = service.add_product(pen()).expect("add");
        service
            .create_catalog(NewCatalog {
                name: "Summer Picks".to_string(),
                description: String::new(),
                product_ids: vec![pen_id],
            })
            .expect("catalog");
        (pen_id, back_room)
    };

    let snapshot = dir.path().join(SNAPSHOT_FILE);
    assert!(snapshot.exists());
    assert!(
        !snapshot.with_extension("json.tmp").exists(),
        "saves must not leave a temp file behind"
    );

    // A second process sees the merchant's store, not the default.
    let service = StoreService::open(Box::new(FileStore::new(dir.path())), "Marigold Bazaar")
        .expect("second boot");
    assert_eq!(service.state().store_name, "Rosa's Bazaar");

    let product = service.state().product(pen_id).expect("pen survived");
    assert_eq!(product.price, Price::from_cents(300));
    assert_eq!(product.description, "Smooth blue ink");

    assert_eq!(service.locations().len(), 1);
    assert_eq!(
        service.state().location(back_room).map(|l| l.name.as_str()),
        Some("Back room")
    );
    assert_eq!(
        service.catalogs().first().map(|c| c.name.as_str()),
        Some("Summer Picks")
    );
}

#[test]
fn test_every_mutation_rewrites_the_slot() {
    init_tracing();
    let slot = Arc::new(MemoryStore::new());
    let mut service =
        StoreService::open(Box::new(Arc::clone(&slot)), "Test Bazaar").expect("open");
    assert_eq!(slot.save_count(), 0, "opening only reads");

    let pen_id = service.add_product(pen()).expect("add");
    assert_eq!(slot.save_count(), 1);

    service
        .update_product(
            pen_id,
            ProductPatch {
                price: Some(Price::from_cents(350)),
                ..ProductPatch::default()
            },
        )
        .expect("update");
    assert_eq!(slot.save_count(), 2);

    let stationery = service.add_category("Stationery", None).expect("category");
    assert_eq!(slot.save_count(), 3);

    service.remove_product(pen_id).expect("remove");
    assert_eq!(slot.save_count(), 4);

    // Rejected input never reaches the slot.
    let rejected = service.add_product(NewProduct::default());
    assert!(matches!(rejected, Err(StoreError::Validation(_))));
    assert_eq!(slot.save_count(), 4);

    // The slot always holds the latest state.
    let persisted = slot.load().expect("load").expect("slot written");
    assert!(persisted.products.is_empty());
    assert!(persisted.category(stationery).is_some());
}

#[test]
fn test_corrupt_snapshot_fails_the_boot() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    // An explicitly named slot, as an embedder migrating an old file
    // layout would use.
    let slot = dir.path().join("legacy-slot.json");
    std::fs::write(&slot, b"{ definitely not json").expect("plant corrupt slot");

    let result = StoreService::open(Box::new(FileStore::at_path(&slot)), "Test Bazaar");

    assert!(matches!(
        result,
        Err(StoreError::Storage(StorageError::Serde(_)))
    ));
}

#[test]
fn test_id_allocation_continues_across_restarts() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let first = {
        let mut service = StoreService::open(Box::new(FileStore::new(dir.path())), "Test Bazaar")
            .expect("first boot");
        service.add_product(pen()).expect("add")
    };

    let mut service = StoreService::open(Box::new(FileStore::new(dir.path())), "Test Bazaar")
        .expect("second boot");
    let second = service
        .add_product(NewProduct {
            name: "Notebook".to_string(),
            ..NewProduct::default()
        })
        .expect("add");

    assert!(
        second.as_i64() > first.as_i64(),
        "the id counter is part of the snapshot"
    );
}
