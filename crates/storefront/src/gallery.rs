//! Product detail view with a wraparound image carousel.
//!
//! Opening a product starts the carousel at its first image. Next and
//! previous wrap around modulo the image count and do nothing for products
//! with fewer than two images, so the index can never leave bounds.

use marigold_core::{Product, ProductId};

/// State of the open product detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    product: Product,
    active_image: usize,
}

impl GalleryView {
    /// Open the detail view for `product`, showing its first image.
    #[must_use]
    pub fn open(product: Product) -> Self {
        Self {
            product,
            active_image: 0,
        }
    }

    /// The product on display.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// ID of the product on display.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Index of the image currently shown.
    #[must_use]
    pub const fn active_image_index(&self) -> usize {
        self.active_image
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.product.images.len()
    }

    /// The image reference currently shown, if the product has any images.
    #[must_use]
    pub fn active_image(&self) -> Option<&str> {
        self.product.images.get(self.active_image).map(String::as_str)
    }

    /// Advance to the next image, wrapping past the last back to the first.
    pub fn next(&mut self) {
        let count = self.image_count();
        if count > 1 {
            self.active_image = (self.active_image + 1) % count;
        }
    }

    /// Step back to the previous image, wrapping before the first to the last.
    pub fn previous(&mut self) {
        let count = self.image_count();
        if count > 1 {
            self.active_image = (self.active_image + count - 1) % count;
        }
    }
}
