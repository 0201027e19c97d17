//! Linear checkout wizard and the shareable order summary.
//!
//! Checkout is a three-step flow inside the cart panel:
//!
//! ```text
//! Review --proceed--> Shipping --skip/finish--> Summary --review items--> Review
//! ```
//!
//! Triggers whose guard fails are inert: the transition method returns
//! `false` and nothing changes. The shipping address is free text with no
//! format validation; "finish" merely requires all three fields non-empty,
//! while "skip" requires nothing.

use crate::cart::Cart;

/// Steps of the checkout flow, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Cart contents with quantity controls.
    #[default]
    Review,
    /// Optional shipping address form.
    Shipping,
    /// Read-only recap with the share action.
    Summary,
}

/// Free-text shipping address collected on the [`CheckoutStep::Shipping`] step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl ShippingAddress {
    /// True once all three fields are non-empty. Gates the finish trigger;
    /// no format checks beyond presence.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.street.is_empty() && !self.city.is_empty() && !self.zip.is_empty()
    }

    /// True when nothing was entered at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.street.is_empty() && self.city.is_empty() && self.zip.is_empty()
    }
}

/// State of one pass through checkout: the current step plus whatever has
/// been typed into the address form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    address: ShippingAddress,
}

impl CheckoutWizard {
    /// A wizard at the first step with a blank address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn address(&self) -> &ShippingAddress {
        &self.address
    }

    /// Replace the address with the form's current contents.
    pub fn set_address(&mut self, address: ShippingAddress) {
        self.address = address;
    }

    /// Whether the proceed trigger is available: on Review with a
    /// non-empty cart.
    #[must_use]
    pub fn can_proceed(&self, cart: &Cart) -> bool {
        self.step == CheckoutStep::Review && !cart.is_empty()
    }

    /// Review to Shipping. Inert while the cart is empty.
    pub fn proceed_to_shipping(&mut self, cart: &Cart) -> bool {
        if !self.can_proceed(cart) {
            return false;
        }
        self.step = CheckoutStep::Shipping;
        true
    }

    /// Shipping to Summary without requiring an address. Partial input in
    /// the form is kept, not cleared.
    pub fn skip_shipping(&mut self) -> bool {
        if self.step != CheckoutStep::Shipping {
            return false;
        }
        self.step = CheckoutStep::Summary;
        true
    }

    /// Whether the finish trigger is available: on Shipping with all three
    /// address fields filled.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.step == CheckoutStep::Shipping && self.address.is_complete()
    }

    /// Shipping to Summary, keeping the completed address.
    pub fn finish_shipping(&mut self) -> bool {
        if !self.can_finish() {
            return false;
        }
        self.step = CheckoutStep::Summary;
        true
    }

    /// Summary back to Review for edits. The cart and address are untouched.
    pub fn review_items(&mut self) -> bool {
        if self.step != CheckoutStep::Summary {
            return false;
        }
        self.step = CheckoutStep::Review;
        true
    }

    /// Back to the first step, keeping the typed address. Used when the
    /// cart panel is reopened mid-checkout.
    pub fn restart(&mut self) {
        self.step = CheckoutStep::Review;
    }

    /// Full reset after a completed order: first step, blank address.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Compose the shareable plain-text order summary.
///
/// Lines are newline-joined with no trailing newline:
///
/// ```text
/// Order Summary from {catalog name}:
/// {product name} x{quantity} - {line total}     (one per cart line)
/// Total: {order total}
/// Shipping to: {street}, {city} {zip}           (only when street is non-empty)
/// ```
///
/// Amounts render as `$X.XX`. The shipping line keys off the street field
/// alone; city and zip appear as-is even when empty.
#[must_use]
pub fn order_summary(catalog_name: &str, cart: &Cart, address: &ShippingAddress) -> String {
    let mut lines = vec![format!("Order Summary from {catalog_name}:")];
    for line in cart.lines() {
        lines.push(format!(
            "{} x{} - {}",
            line.product.name,
            line.quantity,
            line.line_total()
        ));
    }
    lines.push(format!("Total: {}", cart.total()));
    if !address.street.is_empty() {
        lines.push(format!(
            "Shipping to: {}, {} {}",
            address.street, address.city, address.zip
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use marigold_core::{Price, Product, ProductId};

    use super::*;

    fn product(id: i64, name: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::from_cents(cents),
            category_id: None,
            location_id: None,
            images: Vec::new(),
            promo_tag: None,
        }
    }

    fn cart_with_pens() -> Cart {
        let mut cart = Cart::new();
        cart.add(&product(1, "Pen", 300), 2);
        cart
    }

    fn address(street: &str, city: &str, zip: &str) -> ShippingAddress {
        ShippingAddress {
            street: street.to_string(),
            city: city.to_string(),
            zip: zip.to_string(),
        }
    }

    #[test]
    fn test_proceed_requires_items_in_cart() {
        let mut wizard = CheckoutWizard::new();
        let empty = Cart::new();

        assert!(!wizard.proceed_to_shipping(&empty));
        assert_eq!(wizard.step(), CheckoutStep::Review);

        let cart = cart_with_pens();
        assert!(wizard.proceed_to_shipping(&cart));
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_skip_needs_no_address_but_finish_does() {
        let cart = cart_with_pens();

        let mut wizard = CheckoutWizard::new();
        wizard.proceed_to_shipping(&cart);
        wizard.set_address(address("Elm St", "", ""));

        // Incomplete address: skip is available, finish is not.
        assert!(!wizard.can_finish());
        assert!(!wizard.finish_shipping());
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        assert!(wizard.skip_shipping());
        assert_eq!(wizard.step(), CheckoutStep::Summary);

        // Complete address: finish is available.
        let mut wizard = CheckoutWizard::new();
        wizard.proceed_to_shipping(&cart);
        wizard.set_address(address("Elm St", "Springfield", "00000"));
        assert!(wizard.can_finish());
        assert!(wizard.finish_shipping());
        assert_eq!(wizard.step(), CheckoutStep::Summary);
    }

    #[test]
    fn test_triggers_are_inert_on_the_wrong_step() {
        let cart = cart_with_pens();
        let mut wizard = CheckoutWizard::new();

        // On Review, only proceed fires.
        assert!(!wizard.skip_shipping());
        assert!(!wizard.finish_shipping());
        assert!(!wizard.review_items());
        assert_eq!(wizard.step(), CheckoutStep::Review);

        wizard.proceed_to_shipping(&cart);

        // On Shipping, proceed and review-items are inert.
        assert!(!wizard.proceed_to_shipping(&cart));
        assert!(!wizard.review_items());
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_review_items_returns_without_losing_anything() {
        let cart = cart_with_pens();
        let mut wizard = CheckoutWizard::new();
        wizard.proceed_to_shipping(&cart);
        wizard.set_address(address("Elm St", "Springfield", "00000"));
        wizard.finish_shipping();

        assert!(wizard.review_items());
        assert_eq!(wizard.step(), CheckoutStep::Review);
        assert_eq!(wizard.address(), &address("Elm St", "Springfield", "00000"));
    }

    #[test]
    fn test_skip_keeps_partial_address() {
        let cart = cart_with_pens();
        let mut wizard = CheckoutWizard::new();
        wizard.proceed_to_shipping(&cart);
        wizard.set_address(address("Elm St", "", ""));

        wizard.skip_shipping();

        assert_eq!(wizard.address().street, "Elm St");
    }

    #[test]
    fn test_restart_keeps_address_reset_clears_it() {
        let cart = cart_with_pens();
        let mut wizard = CheckoutWizard::new();
        wizard.proceed_to_shipping(&cart);
        wizard.set_address(address("Elm St", "Springfield", "00000"));
        wizard.finish_shipping();

        wizard.restart();
        assert_eq!(wizard.step(), CheckoutStep::Review);
        assert!(!wizard.address().is_blank());

        wizard.reset();
        assert_eq!(wizard.step(), CheckoutStep::Review);
        assert!(wizard.address().is_blank());
    }

    #[test]
    fn test_summary_without_shipping_line() {
        let cart = cart_with_pens();

        let summary = order_summary("Summer Picks", &cart, &ShippingAddress::default());

        assert_eq!(
            summary,
            "Order Summary from Summer Picks:\nPen x2 - $6.00\nTotal: $6.00"
        );
    }

    #[test]
    fn test_summary_with_shipping_line() {
        let cart = cart_with_pens();
        let shipping = address("Elm St", "Springfield", "00000");

        let summary = order_summary("Summer Picks", &cart, &shipping);

        assert_eq!(
            summary,
            "Order Summary from Summer Picks:\nPen x2 - $6.00\nTotal: $6.00\nShipping to: Elm St, Springfield 00000"
        );
    }

    #[test]
    fn test_summary_shipping_line_keys_off_street_only() {
        let cart = cart_with_pens();

        // City without street: no shipping line.
        let no_street = address("", "Springfield", "00000");
        let summary = order_summary("Summer Picks", &cart, &no_street);
        assert!(!summary.contains("Shipping to"));

        // Street alone: shipping line appears with the empty fields as-is.
        let street_only = address("Elm St", "", "");
        let summary = order_summary("Summer Picks", &cart, &street_only);
        assert!(summary.ends_with("Shipping to: Elm St,  "));
    }

    #[test]
    fn test_summary_lists_lines_in_cart_order() {
        let mut cart = Cart::new();
        cart.add(&product(2, "Ink", 800), 1);
        cart.add(&product(1, "Pen", 300), 2);

        let summary = order_summary("Summer Picks", &cart, &ShippingAddress::default());

        assert_eq!(
            summary,
            "Order Summary from Summer Picks:\nInk x1 - $8.00\nPen x2 - $6.00\nTotal: $14.00"
        );
    }

    #[test]
    fn test_summary_for_empty_cart_still_has_header_and_total() {
        let summary = order_summary("Summer Picks", &Cart::new(), &ShippingAddress::default());
        assert_eq!(summary, "Order Summary from Summer Picks:\nTotal: $0.00");
    }
}
