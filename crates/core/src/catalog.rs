//! Domain entities for the merchant's store.
//!
//! These types are plain data: the admin crate owns mutation and
//! persistence, the storefront crate owns filtering and presentation.
//! References between entities are by ID and are allowed to dangle; readers
//! resolve them leniently instead of assuming integrity.

use serde::{Deserialize, Serialize};

use crate::types::{CatalogId, CategoryId, LocationId, Price, ProductId};

// =============================================================================
// Products
// =============================================================================

/// Promotional tag shown on a product card (e.g. "Sale" on red).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoTag {
    /// Short display label.
    pub label: String,
    /// CSS color for the badge background.
    pub color: String,
}

/// A product in the merchant's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID, unique within the store.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing description; may be merchant-written or generated.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Category reference. `None` means uncategorized; a value may point at
    /// a category that has since been deleted.
    pub category_id: Option<CategoryId>,
    /// Storage location reference; same dangling rules as `category_id`.
    pub location_id: Option<LocationId>,
    /// Ordered image references (URLs or data URLs). May be empty.
    #[serde(default)]
    pub images: Vec<String>,
    /// Optional promotional tag.
    #[serde(default)]
    pub promo_tag: Option<PromoTag>,
}

// =============================================================================
// Categories and Locations
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name; used as the storefront group heading.
    pub name: String,
    /// Optional parent category. Stored and round-tripped; no grouping or
    /// lookup traverses the hierarchy.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// A physical storage location products can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    /// Location ID.
    pub id: LocationId,
    /// Display name (e.g. "Back room", "Warehouse B").
    pub name: String,
}

// =============================================================================
// Catalogs
// =============================================================================

/// A curated, customer-facing collection of products.
///
/// `product_ids` preserves curation order and may reference products that
/// no longer exist; readers skip unresolvable entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog ID.
    pub id: CatalogId,
    /// Display name (e.g. "Summer Picks").
    pub name: String,
    /// Storefront introduction text; may be generated.
    pub description: String,
    /// Curated product references in display order.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
}
