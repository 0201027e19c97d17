//! The merchant store service: every mutation goes through here.
//!
//! Each operation validates its input, applies the change to the in-memory
//! [`StoreState`], bumps the revision, and rewrites the persisted snapshot.
//! The revision is what lets read-side caches (the storefront's catalog
//! index) key their entries to a specific state of the store.
//!
//! Deletions are lenient about references: removing a category or location
//! leaves products pointing at the dead ID, and readers resolve such
//! references to a fallback. Removing a product is the one exception; it is
//! also detached from every catalog so curated lists do not accumulate
//! tombstones.

use std::collections::HashSet;

use chrono::Utc;
use marigold_core::{
    Catalog, CatalogId, Category, CategoryId, LocationId, Product, ProductId, StorageLocation,
};
use thiserror::Error;
use tracing::{info, instrument};

use crate::models::{CatalogPatch, NewCatalog, NewProduct, ProductPatch, StoreState};
use crate::storage::{StateStore, StorageError};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Owns the store state and its persistence.
///
/// Construct one per application via [`StoreService::open`]. Operations
/// take `&mut self`; the embedding application serializes access the same
/// way it serializes every other state change.
pub struct StoreService {
    state: StoreState,
    revision: u64,
    store: Box<dyn StateStore>,
}

impl StoreService {
    /// Load the snapshot from `store`, or start a fresh store named
    /// `default_name` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    pub fn open(store: Box<dyn StateStore>, default_name: &str) -> Result<Self, StoreError> {
        let state = match store.load()? {
            Some(state) => {
                info!(
                    products = state.products.len(),
                    catalogs = state.catalogs.len(),
                    "loaded store snapshot"
                );
                state
            }
            None => {
                info!(name = default_name, "no snapshot found, starting empty store");
                StoreState::new(default_name)
            }
        };
        Ok(Self {
            state,
            revision: 0,
            store,
        })
    }

    // ===== Read side =====

    /// The complete current state.
    #[must_use]
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    /// Monotonic counter bumped by every mutation, even one whose save
    /// failed (the in-memory state changed either way). Cache keys derived
    /// from an older revision can never alias the current state.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// All products, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    /// All categories, in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    /// All storage locations, in insertion order.
    #[must_use]
    pub fn locations(&self) -> &[StorageLocation] {
        &self.state.locations
    }

    /// All catalogs, in insertion order.
    #[must_use]
    pub fn catalogs(&self) -> &[Catalog] {
        &self.state.catalogs
    }

    /// Look up a catalog by ID.
    #[must_use]
    pub fn catalog(&self, id: CatalogId) -> Option<&Catalog> {
        self.state.catalog(id)
    }

    /// A catalog's curated products in curation order. Entries whose
    /// product no longer exists are skipped.
    #[must_use]
    pub fn catalog_products(&self, id: CatalogId) -> Option<Vec<Product>> {
        let catalog = self.state.catalog(id)?;
        Some(
            catalog
                .product_ids
                .iter()
                .filter_map(|product_id| self.state.product(*product_id).cloned())
                .collect(),
        )
    }

    // ===== Products =====

    /// Add a product to inventory. The name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the save fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn add_product(&mut self, input: NewProduct) -> Result<ProductId, StoreError> {
        let name = require_name(&input.name, "product name")?;

        let id = ProductId::new(self.state.allocate_id());
        self.state.products.push(Product {
            id,
            name,
            description: input.description,
            price: input.price,
            category_id: input.category_id,
            location_id: input.location_id,
            images: input.images,
            promo_tag: input.promo_tag,
        });
        self.commit()?;

        info!(product = %id, "added product");
        Ok(id)
    }

    /// Apply `patch` to a product; `None` fields stay untouched. A patched
    /// name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown, if a patched name is
    /// blank, or if the save fails.
    #[instrument(skip(self, patch))]
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> Result<(), StoreError> {
        let name = patch
            .name
            .as_deref()
            .map(|name| require_name(name, "product name"))
            .transpose()?;

        let product = self
            .state
            .product_mut(id)
            .ok_or(StoreError::NotFound("product"))?;

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = category_id;
        }
        if let Some(location_id) = patch.location_id {
            product.location_id = location_id;
        }
        if let Some(images) = patch.images {
            product.images = images;
        }
        if let Some(promo_tag) = patch.promo_tag {
            product.promo_tag = promo_tag;
        }

        self.commit()
    }

    /// Remove a product from inventory and from every catalog curating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, id: ProductId) -> Result<(), StoreError> {
        let before = self.state.products.len();
        self.state.products.retain(|product| product.id != id);
        if self.state.products.len() == before {
            return Err(StoreError::NotFound("product"));
        }

        for catalog in &mut self.state.catalogs {
            catalog.product_ids.retain(|product_id| *product_id != id);
        }

        self.commit()?;
        info!(product = %id, "removed product");
        Ok(())
    }

    // ===== Categories =====

    /// Add a category. The name is stored trimmed; the parent, when given,
    /// must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, if the parent is unknown, or
    /// if the save fails.
    #[instrument(skip(self))]
    pub fn add_category(
        &mut self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<CategoryId, StoreError> {
        let name = require_name(name, "category name")?;
        if let Some(parent) = parent_id {
            if self.state.category(parent).is_none() {
                return Err(StoreError::NotFound("parent category"));
            }
        }

        let id = CategoryId::new(self.state.allocate_id());
        self.state.categories.push(Category { id, name, parent_id });
        self.commit()?;
        Ok(id)
    }

    /// Rename a category. The name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, if the category is unknown,
    /// or if the save fails.
    #[instrument(skip(self))]
    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> Result<(), StoreError> {
        let name = require_name(name, "category name")?;
        let category = self
            .state
            .category_mut(id)
            .ok_or(StoreError::NotFound("category"))?;
        category.name = name;
        self.commit()
    }

    /// Remove a category. Products referencing it keep their now-dangling
    /// reference and surface under the storefront's fallback group.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn remove_category(&mut self, id: CategoryId) -> Result<(), StoreError> {
        let before = self.state.categories.len();
        self.state.categories.retain(|category| category.id != id);
        if self.state.categories.len() == before {
            return Err(StoreError::NotFound("category"));
        }
        self.commit()
    }

    // ===== Locations =====

    /// Add a storage location. The name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the save fails.
    #[instrument(skip(self))]
    pub fn add_location(&mut self, name: &str) -> Result<LocationId, StoreError> {
        let name = require_name(name, "location name")?;
        let id = LocationId::new(self.state.allocate_id());
        self.state.locations.push(StorageLocation { id, name });
        self.commit()?;
        Ok(id)
    }

    /// Remove a location; product references dangle like category ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn remove_location(&mut self, id: LocationId) -> Result<(), StoreError> {
        let before = self.state.locations.len();
        self.state.locations.retain(|location| location.id != id);
        if self.state.locations.len() == before {
            return Err(StoreError::NotFound("location"));
        }
        self.commit()
    }

    // ===== Catalogs =====

    /// Create a catalog. The name is stored trimmed; duplicate curation
    /// entries are dropped, order kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the save fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_catalog(&mut self, input: NewCatalog) -> Result<CatalogId, StoreError> {
        let name = require_name(&input.name, "catalog name")?;

        let id = CatalogId::new(self.state.allocate_id());
        self.state.catalogs.push(Catalog {
            id,
            name,
            description: input.description,
            product_ids: dedup_keeping_order(input.product_ids),
        });
        self.commit()?;

        info!(catalog = %id, "created catalog");
        Ok(id)
    }

    /// Apply `patch` to a catalog's name and description. A patched name
    /// is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unknown, if a patched name is
    /// blank, or if the save fails.
    #[instrument(skip(self, patch))]
    pub fn update_catalog(&mut self, id: CatalogId, patch: CatalogPatch) -> Result<(), StoreError> {
        let name = patch
            .name
            .as_deref()
            .map(|name| require_name(name, "catalog name"))
            .transpose()?;

        let catalog = self
            .state
            .catalog_mut(id)
            .ok_or(StoreError::NotFound("catalog"))?;
        if let Some(name) = name {
            catalog.name = name;
        }
        if let Some(description) = patch.description {
            catalog.description = description;
        }
        self.commit()
    }

    /// Remove a catalog. The products it curated are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn remove_catalog(&mut self, id: CatalogId) -> Result<(), StoreError> {
        let before = self.state.catalogs.len();
        self.state.catalogs.retain(|catalog| catalog.id != id);
        if self.state.catalogs.len() == before {
            return Err(StoreError::NotFound("catalog"));
        }
        self.commit()
    }

    /// Append a product to a catalog's curation. The product must exist;
    /// curating it twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either ID is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn add_to_catalog(
        &mut self,
        catalog_id: CatalogId,
        product_id: ProductId,
    ) -> Result<(), StoreError> {
        if self.state.product(product_id).is_none() {
            return Err(StoreError::NotFound("product"));
        }
        let catalog = self
            .state
            .catalog_mut(catalog_id)
            .ok_or(StoreError::NotFound("catalog"))?;

        if catalog.product_ids.contains(&product_id) {
            return Ok(());
        }
        catalog.product_ids.push(product_id);
        self.commit()
    }

    /// Drop a product from a catalog's curation; absent entries are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unknown or the save fails.
    #[instrument(skip(self))]
    pub fn remove_from_catalog(
        &mut self,
        catalog_id: CatalogId,
        product_id: ProductId,
    ) -> Result<(), StoreError> {
        let catalog = self
            .state
            .catalog_mut(catalog_id)
            .ok_or(StoreError::NotFound("catalog"))?;
        catalog.product_ids.retain(|id| *id != product_id);
        self.commit()
    }

    /// Replace a catalog's curation wholesale, keeping the given order.
    /// IDs that do not resolve are accepted; readers skip them.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unknown or the save fails.
    #[instrument(skip(self, product_ids))]
    pub fn set_catalog_products(
        &mut self,
        catalog_id: CatalogId,
        product_ids: Vec<ProductId>,
    ) -> Result<(), StoreError> {
        let catalog = self
            .state
            .catalog_mut(catalog_id)
            .ok_or(StoreError::NotFound("catalog"))?;
        catalog.product_ids = dedup_keeping_order(product_ids);
        self.commit()
    }

    // ===== Store =====

    /// Rename the store. The name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the save fails.
    #[instrument(skip(self))]
    pub fn rename_store(&mut self, name: &str) -> Result<(), StoreError> {
        self.state.store_name = require_name(name, "store name")?;
        self.commit()
    }

    /// Stamp, bump, persist. The revision moves before the save so that a
    /// failed write still invalidates read-side caches of the (changed)
    /// in-memory state.
    fn commit(&mut self) -> Result<(), StoreError> {
        self.state.updated_at = Utc::now();
        self.revision += 1;
        self.store.save(&self.state)?;
        Ok(())
    }
}

/// Reject blank names; an accepted name comes back trimmed, and that is
/// the form that gets stored.
fn require_name(name: &str, what: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{what} is required")));
    }
    Ok(trimmed.to_string())
}

fn dedup_keeping_order(ids: Vec<ProductId>) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
