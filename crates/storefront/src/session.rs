//! Storefront session: the explicit state container for one visitor.
//!
//! Every user action on the storefront maps to one named operation here;
//! nothing else mutates session state. Operations run to completion before
//! the next one starts, so no locking is needed inside the session. The
//! only background work is the copied-indicator timer, which touches
//! nothing but its own flag.
//!
//! Session state is transient. The merchant's store snapshot never includes
//! a cart, a wizard step, or filter criteria.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use marigold_core::{CategoryId, LocationId, Product, ProductId};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cart::Cart;
use crate::catalog_index::FilterCriteria;
use crate::checkout::{CheckoutStep, CheckoutWizard, ShippingAddress, order_summary};
use crate::clipboard::Clipboard;
use crate::gallery::GalleryView;

/// How long the transient "copied" indicator stays set.
pub const COPIED_RESET: Duration = Duration::from_millis(2000);

/// Transient copied-to-clipboard indicator with a self-clearing timer.
///
/// Setting the flag while a clear is already pending aborts that clear and
/// arms a fresh one, so rapid repeated copies extend the indicator instead
/// of letting a stale timer clear it early. At most one clear is in flight.
#[derive(Debug, Default)]
struct CopiedFlag {
    set: Arc<AtomicBool>,
    pending_clear: Option<JoinHandle<()>>,
}

impl CopiedFlag {
    fn get(&self) -> bool {
        self.set.load(Ordering::Relaxed)
    }

    /// Set the flag and (re)arm the auto-clear.
    ///
    /// Must be called from within a tokio runtime.
    fn set(&mut self) {
        if let Some(pending) = self.pending_clear.take() {
            pending.abort();
        }
        self.set.store(true, Ordering::Relaxed);

        let set = Arc::clone(&self.set);
        self.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(COPIED_RESET).await;
            set.store(false, Ordering::Relaxed);
        }));
    }
}

impl Drop for CopiedFlag {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_clear.take() {
            pending.abort();
        }
    }
}

/// State container for one visitor's storefront session.
///
/// Owns the filter criteria, cart, checkout wizard, the optional open
/// product detail view, and the cart panel's open/closed state. Reads go
/// through accessors; writes go through the named operations below.
#[derive(Debug)]
pub struct StorefrontSession {
    catalog_name: String,
    criteria: FilterCriteria,
    cart: Cart,
    wizard: CheckoutWizard,
    gallery: Option<GalleryView>,
    cart_open: bool,
    copied: CopiedFlag,
}

impl StorefrontSession {
    /// Start a session browsing the catalog named `catalog_name`.
    #[must_use]
    pub fn new(catalog_name: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            criteria: FilterCriteria::default(),
            cart: Cart::new(),
            wizard: CheckoutWizard::new(),
            gallery: None,
            cart_open: false,
            copied: CopiedFlag::default(),
        }
    }

    // ===== Accessors =====

    #[must_use]
    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn wizard(&self) -> &CheckoutWizard {
        &self.wizard
    }

    #[must_use]
    pub const fn gallery(&self) -> Option<&GalleryView> {
        self.gallery.as_ref()
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Whether the transient copied indicator is currently showing.
    #[must_use]
    pub fn order_copied(&self) -> bool {
        self.copied.get()
    }

    // ===== Filtering =====

    pub fn set_category_filter(&mut self, category: Option<CategoryId>) {
        self.criteria.category = category;
    }

    pub fn set_location_filter(&mut self, location: Option<LocationId>) {
        self.criteria.location = location;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search = text.into();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    // ===== Product detail view =====

    /// Open the detail view for `product`; its carousel starts at the
    /// first image, even if the same product was open before.
    pub fn open_product(&mut self, product: &Product) {
        self.gallery = Some(GalleryView::open(product.clone()));
    }

    pub fn close_product(&mut self) {
        self.gallery = None;
    }

    /// Advance the open detail view's carousel; inert when no view is open.
    pub fn next_image(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.next();
        }
    }

    /// Step the open detail view's carousel back; inert when no view is open.
    pub fn previous_image(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.previous();
        }
    }

    // ===== Cart =====

    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        self.cart.add(product, quantity);
    }

    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) {
        self.cart.update_quantity(product_id, delta);
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
    }

    /// From the detail view: add one unit and jump straight to checkout.
    /// The detail view closes and the cart panel opens on Review.
    pub fn buy_now(&mut self, product: &Product) {
        self.cart.add(product, 1);
        self.gallery = None;
        self.open_cart();
    }

    /// From the detail view: add one unit and keep browsing. The detail
    /// view closes; the cart panel stays as it was.
    pub fn add_and_continue(&mut self, product: &Product) {
        self.cart.add(product, 1);
        self.gallery = None;
    }

    // ===== Cart panel and checkout =====

    /// Open the cart panel. Entering checkout always starts at Review;
    /// an address typed on an earlier pass is kept.
    pub fn open_cart(&mut self) {
        self.cart_open = true;
        self.wizard.restart();
    }

    /// Close the cart panel.
    ///
    /// Closing from the Summary step completes the order: the cart empties
    /// and the wizard resets fully, address included. Closing from any
    /// other step just hides the panel.
    pub fn close_cart(&mut self) {
        if self.cart_open && self.wizard.step() == CheckoutStep::Summary {
            debug!(lines = self.cart.len(), "order completed, clearing cart");
            self.cart.clear();
            self.wizard.reset();
        }
        self.cart_open = false;
    }

    pub fn proceed_to_shipping(&mut self) -> bool {
        self.wizard.proceed_to_shipping(&self.cart)
    }

    pub fn skip_shipping(&mut self) -> bool {
        self.wizard.skip_shipping()
    }

    pub fn finish_shipping(&mut self) -> bool {
        self.wizard.finish_shipping()
    }

    pub fn review_items(&mut self) -> bool {
        self.wizard.review_items()
    }

    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.wizard.set_address(address);
    }

    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.wizard.can_proceed(&self.cart)
    }

    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.wizard.can_finish()
    }

    // ===== Sharing =====

    /// The shareable summary for the current cart and address.
    #[must_use]
    pub fn order_summary(&self) -> String {
        order_summary(&self.catalog_name, &self.cart, self.wizard.address())
    }

    /// Share the order: compose the summary, write it to the clipboard,
    /// and show the copied indicator for [`COPIED_RESET`].
    ///
    /// A clipboard failure is logged and swallowed; the indicator only
    /// shows after a successful write. Returns the summary either way.
    /// Must be called from within a tokio runtime.
    pub fn share_order(&mut self, clipboard: &dyn Clipboard) -> String {
        let summary = self.order_summary();
        self.copy_text(clipboard, &summary);
        summary
    }

    /// Copy an externally built share link (the embedder knows its URL
    /// scheme); drives the same copied indicator as sharing an order.
    pub fn copy_link(&mut self, clipboard: &dyn Clipboard, link: &str) {
        self.copy_text(clipboard, link);
    }

    fn copy_text(&mut self, clipboard: &dyn Clipboard, text: &str) {
        match clipboard.write_text(text) {
            Ok(()) => self.copied.set(),
            Err(error) => warn!(%error, "clipboard write failed"),
        }
    }
}
