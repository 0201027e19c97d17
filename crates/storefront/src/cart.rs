//! In-memory shopping cart for one storefront session.
//!
//! The cart holds at most one line per product. Lines snapshot the product
//! at add time, so a later admin edit does not change what the visitor saw
//! priced. Totals are always derived from the lines, never stored.

use marigold_core::{Price, Product, ProductId};

/// One cart entry: a distinct product and its requested quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Requested quantity; never below 1.
    pub quantity: u32,
    /// The product as it was when added. Not re-validated against the
    /// live catalog.
    pub product: Product,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.line_total(self.quantity)
    }
}

/// Insertion-ordered cart with one line per product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines, not total units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines; drives the cart badge.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line when one exists for this product,
    /// otherwise appends a new line snapshotting the product. A zero
    /// quantity is treated as 1.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                quantity,
                product: product.clone(),
            });
        }
    }

    /// Adjust the quantity of an existing line by `delta`, clamping at 1.
    ///
    /// Decrementing can never remove a line; removal is its own operation
    /// ([`Cart::remove`]). Unknown product IDs are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            let adjusted = i64::from(line.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX));
            line.quantity = u32::try_from(adjusted).unwrap_or(1);
        }
    }

    /// Delete the line for `product_id`. Unknown IDs are ignored.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Order total, recomputed from the current lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Empty the cart. The only way a cart reaches zero lines besides
    /// removing each line individually.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
