//! Marigold Storefront library.
//!
//! The customer-facing half of Marigold: filtered catalog browsing, an
//! in-memory cart, a linear checkout wizard, and the shareable order
//! summary. Everything here is session state for one visitor; nothing is
//! persisted and nothing touches the network.
//!
//! [`session::StorefrontSession`] is the entry point: it owns the cart,
//! wizard, filter criteria, and open product view, and exposes one named
//! operation per user action.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog_index;
pub mod checkout;
pub mod clipboard;
pub mod gallery;
pub mod session;
