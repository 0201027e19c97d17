//! Marigold Admin library.
//!
//! The merchant-side half of Marigold: the store state (products,
//! categories, storage locations, curated catalogs), the operations that
//! mutate it, single-slot persistence, and the generative copywriter.
//!
//! [`state::AppState`] wires everything together from configuration;
//! [`store::StoreService`] is where every mutation goes through, so that
//! each change bumps the revision and rewrites the persisted snapshot.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod copywriter;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
