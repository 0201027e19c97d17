//! Domain models for the merchant's store.
//!
//! [`StoreState`] is the whole-application snapshot: everything the
//! merchant manages, and exactly what gets persisted. Entity types live in
//! `marigold-core`; this module adds the container plus the input/patch
//! types the store operations accept.

use chrono::{DateTime, Utc};
use marigold_core::{
    Catalog, CatalogId, Category, CategoryId, LocationId, Price, Product, ProductId, PromoTag,
    StorageLocation,
};
use serde::{Deserialize, Serialize};

/// The merchant's complete store: inventory, categories, locations, and
/// curated catalogs.
///
/// Persisted as one JSON document in a single slot, rewritten in full on
/// every mutation. Storefront session state (carts, checkout progress,
/// filters) is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    /// Merchant-facing store name.
    pub store_name: String,
    /// Full product inventory.
    pub products: Vec<Product>,
    /// Product categories.
    pub categories: Vec<Category>,
    /// Storage locations.
    pub locations: Vec<StorageLocation>,
    /// Curated, customer-facing catalogs.
    pub catalogs: Vec<Catalog>,
    /// Counter backing ID allocation. Monotonic across the store's life;
    /// IDs are never reused after deletion.
    next_id: i64,
    /// When this snapshot was written.
    pub updated_at: DateTime<Utc>,
}

impl StoreState {
    /// An empty store with the given display name.
    #[must_use]
    pub fn new(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            products: Vec::new(),
            categories: Vec::new(),
            locations: Vec::new(),
            catalogs: Vec::new(),
            next_id: 1,
            updated_at: Utc::now(),
        }
    }

    /// Hand out the next ID. IDs are shared across entity kinds; a product
    /// and a category never collide either.
    pub fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ===== Lookups =====

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id == id)
    }

    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&StorageLocation> {
        self.locations.iter().find(|location| location.id == id)
    }

    #[must_use]
    pub fn catalog(&self, id: CatalogId) -> Option<&Catalog> {
        self.catalogs.iter().find(|catalog| catalog.id == id)
    }

    pub fn catalog_mut(&mut self, id: CatalogId) -> Option<&mut Catalog> {
        self.catalogs.iter_mut().find(|catalog| catalog.id == id)
    }

    /// Resolve a product's category name, if its reference resolves.
    #[must_use]
    pub fn category_name_of(&self, product: &Product) -> Option<&str> {
        product
            .category_id
            .and_then(|id| self.category(id))
            .map(|category| category.name.as_str())
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub location_id: Option<LocationId>,
    pub images: Vec<String>,
    pub promo_tag: Option<PromoTag>,
}

/// Partial update for a product. `None` leaves a field untouched; for the
/// optional references, the outer `Option` is "change it or not" and the
/// inner one is the new value (including clearing with `Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<Option<CategoryId>>,
    pub location_id: Option<Option<LocationId>>,
    pub images: Option<Vec<String>>,
    pub promo_tag: Option<Option<PromoTag>>,
}

/// Input for creating a catalog.
#[derive(Debug, Clone, Default)]
pub struct NewCatalog {
    pub name: String,
    pub description: String,
    /// Initial curation; duplicates are dropped, order kept.
    pub product_ids: Vec<ProductId>,
}

/// Partial update for a catalog's name and description.
#[derive(Debug, Clone, Default)]
pub struct CatalogPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}
