//! Filtered, category-grouped product listings.
//!
//! The storefront grid is derived data: the full product list narrowed by
//! the visitor's [`FilterCriteria`], then grouped under category headings.
//! [`filter_and_group`] is the pure derivation; [`CatalogIndex`] memoizes it
//! per store revision so repeated renders of an unchanged store reuse the
//! same grouping.

use std::collections::HashMap;
use std::sync::Arc;

use marigold_core::{Category, CategoryId, LocationId, Product};
use moka::sync::Cache;

/// Group heading for products whose category reference does not resolve,
/// either because it is unset or because the category was deleted.
pub const GENERAL_GROUP: &str = "General";

/// Grouped listing: category heading to matching products in input order.
pub type GroupedProducts = HashMap<String, Vec<Product>>;

/// The visitor's active filters.
///
/// `None` on a reference dimension means that dimension does not restrict
/// the listing; an empty `search` string matches every product. All active
/// dimensions must match at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Restrict to products in this category.
    pub category: Option<CategoryId>,
    /// Restrict to products stored at this location.
    pub location: Option<LocationId>,
    /// Case-insensitive substring match over product name and description.
    pub search: String,
}

impl FilterCriteria {
    /// True when no dimension restricts the listing.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.search.is_empty()
    }

    /// Criteria with lowercased search text. Used as the cache key so
    /// queries differing only in letter case share one entry.
    fn normalized(&self) -> Self {
        Self {
            category: self.category,
            location: self.location,
            search: self.search.to_lowercase(),
        }
    }
}

/// Whether `product` satisfies every active dimension of `criteria`.
#[must_use]
pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    if let Some(category) = criteria.category {
        if product.category_id != Some(category) {
            return false;
        }
    }
    if let Some(location) = criteria.location {
        if product.location_id != Some(location) {
            return false;
        }
    }
    if criteria.search.is_empty() {
        return true;
    }
    let needle = criteria.search.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Filter `products` by `criteria` and group the matches by category name.
///
/// Each matching product lands in exactly one group: its category's name
/// when the reference resolves against `categories`, otherwise
/// [`GENERAL_GROUP`]. Products keep their input order within a group; the
/// map's key order is unspecified.
#[must_use]
pub fn filter_and_group(
    products: &[Product],
    categories: &[Category],
    criteria: &FilterCriteria,
) -> GroupedProducts {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();

    let mut groups = GroupedProducts::new();
    for product in products.iter().filter(|product| matches(product, criteria)) {
        let heading = product
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(GENERAL_GROUP);
        groups
            .entry(heading.to_string())
            .or_default()
            .push(product.clone());
    }
    groups
}

/// Memoized grouped listings.
///
/// Entries are keyed by `(store revision, normalized criteria)`. Callers
/// pass the current revision of the admin store; any mutation bumps it, so
/// a grouping computed against an older state can never be served for the
/// new one. Old-revision entries age out by capacity.
pub struct CatalogIndex {
    cache: Cache<(u64, FilterCriteria), Arc<GroupedProducts>>,
}

impl CatalogIndex {
    const MAX_CACHED_LISTINGS: u64 = 64;

    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::new(Self::MAX_CACHED_LISTINGS),
        }
    }

    /// The grouped listing for `criteria` against the given store state,
    /// computed on first use and cached for the lifetime of `revision`.
    pub fn grouped(
        &self,
        revision: u64,
        products: &[Product],
        categories: &[Category],
        criteria: &FilterCriteria,
    ) -> Arc<GroupedProducts> {
        self.cache
            .get_with((revision, criteria.normalized()), || {
                Arc::new(filter_and_group(products, categories, criteria))
            })
    }

    /// Number of listings currently cached. Test and diagnostics hook.
    #[must_use]
    pub fn cached_listings(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
