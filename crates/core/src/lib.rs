//! Marigold Core - Shared types library.
//!
//! This crate provides common types used across all Marigold components:
//! - `storefront` - Customer-facing catalog browsing and checkout session
//! - `admin` - Merchant-side inventory, catalog, and store management
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no
//! persistence, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Product, category, location, and catalog entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
